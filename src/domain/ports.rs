use crate::domain::model::{InputFormat, OutputFormat, SkippedRecord};
use crate::utils::error::{Result, ScoringError};

/// External polarity scorer. The scoring algorithm itself lives behind this seam.
pub trait SentimentScorer {
    /// Returns a polarity in [-1.0, 1.0] for `text`.
    fn polarity(&self, text: &str) -> std::result::Result<f64, ScoringError>;
}

impl<S: SentimentScorer + ?Sized> SentimentScorer for &S {
    fn polarity(&self, text: &str) -> std::result::Result<f64, ScoringError> {
        (**self).polarity(text)
    }
}

impl<S: SentimentScorer + ?Sized> SentimentScorer for Box<S> {
    fn polarity(&self, text: &str) -> std::result::Result<f64, ScoringError> {
        (**self).polarity(text)
    }
}

/// Receives one diagnostic per skipped record.
pub trait DiagnosticSink {
    fn emit(&mut self, skipped: &SkippedRecord);
}

pub trait Storage {
    fn read_input(&self, path: &str) -> Result<Vec<u8>>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn input_format(&self) -> InputFormat;
    fn output_format(&self) -> OutputFormat;
    fn text_field(&self) -> &str;
    fn pretty(&self) -> bool;
}
