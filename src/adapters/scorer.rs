use crate::domain::ports::SentimentScorer;
use crate::utils::error::ScoringError;
#[cfg(feature = "vader")]
use std::panic::{self, AssertUnwindSafe};

/// Adapts a closure into a [`SentimentScorer`].
#[derive(Clone, Copy)]
pub struct FnScorer<F>(F);

pub fn scorer_fn<F>(f: F) -> FnScorer<F>
where
    F: Fn(&str) -> Result<f64, ScoringError>,
{
    FnScorer(f)
}

impl<F> SentimentScorer for FnScorer<F>
where
    F: Fn(&str) -> Result<f64, ScoringError>,
{
    fn polarity(&self, text: &str) -> Result<f64, ScoringError> {
        (self.0)(text)
    }
}

/// Polarity from the VADER lexicon's normalised `compound` score.
///
/// The analyzer only borrows the crate's static lexicons, so one is built
/// per call.
#[cfg(feature = "vader")]
#[derive(Debug, Default, Clone, Copy)]
pub struct VaderScorer;

#[cfg(feature = "vader")]
impl VaderScorer {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "vader")]
impl SentimentScorer for VaderScorer {
    fn polarity(&self, text: &str) -> Result<f64, ScoringError> {
        // 第三方函式庫的內部錯誤只影響該筆記錄
        let compound = panic::catch_unwind(AssertUnwindSafe(|| {
            let analyzer = vader_sentiment::SentimentIntensityAnalyzer::new();
            let scores = analyzer.polarity_scores(text);
            scores.get("compound").copied()
        }))
        .map_err(|payload| ScoringError::Panicked(panic_message(payload.as_ref())))?;

        compound.ok_or_else(|| ScoringError::Backend("VADER returned no compound score".to_string()))
    }
}

#[cfg(feature = "vader")]
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
