use crate::utils::error::EnrichError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Polarity strictly above this is positive.
pub const POSITIVE_THRESHOLD: f64 = 0.1;
/// Polarity strictly below this is negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

pub const SCORE_FIELD: &str = "sentiment_score";
pub const LABEL_FIELD: &str = "sentiment_label";

/// One incoming message: an open mapping of field name to JSON value.
///
/// Fields keep their input order, so output is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: Map<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from a JSON object; any other JSON value yields `None`.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(data) => Some(Self { data }),
            _ => None,
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// `null` counts as absent.
    pub fn has_field(&self, key: &str) -> bool {
        matches!(self.data.get(key), Some(v) if !v.is_null())
    }

    /// Reads `key` and coerces it to a string.
    ///
    /// Strings are returned as-is; every other JSON value is rendered in its
    /// JSON text form (`42`, `true`, `[1,2]`). This intentionally differs from
    /// Python-style `str()` rendering (`True`, `[1, 2]`, `None`): `null` is
    /// never scored and is reported as a missing field instead.
    pub fn text_of(&self, key: &str) -> Option<String> {
        match self.data.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Thresholds are strict, so exactly ±0.1 stays neutral.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if polarity < NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record that was scored successfully.
///
/// Serialises as the original object with `sentiment_score` and
/// `sentiment_label` added alongside the original fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub record: Record,
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
}

impl EnrichedRecord {
    pub fn new(mut record: Record, polarity: f64) -> Self {
        // 舊的情緒欄位由新計算的值取代，避免序列化時出現重複鍵
        record.data.shift_remove(SCORE_FIELD);
        record.data.shift_remove(LABEL_FIELD);

        Self {
            record,
            sentiment_score: polarity,
            sentiment_label: SentimentLabel::from_polarity(polarity),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Json,
    Jsonl,
    Csv,
}

impl InputFormat {
    /// Infers the format from a file extension, if it is a known one.
    pub fn from_path(path: &str) -> Option<Self> {
        let extension = std::path::Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())?
            .to_ascii_lowercase();

        match extension.as_str() {
            "json" => Some(InputFormat::Json),
            "jsonl" | "ndjson" => Some(InputFormat::Jsonl),
            "csv" => Some(InputFormat::Csv),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Jsonl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Warning,
    Error,
}

/// A record left out of the output, returned untouched with the reason.
#[derive(Debug)]
pub struct SkippedRecord {
    /// Position in the input batch.
    pub index: usize,
    pub record: Record,
    pub reason: EnrichError,
}

impl SkippedRecord {
    pub fn level(&self) -> DiagnosticLevel {
        match self.reason {
            EnrichError::MissingField { .. } => DiagnosticLevel::Warning,
            _ => DiagnosticLevel::Error,
        }
    }
}

#[derive(Debug)]
pub enum RecordOutcome {
    Enriched(EnrichedRecord),
    Skipped(SkippedRecord),
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub enriched: Vec<EnrichedRecord>,
    pub skipped: Vec<SkippedRecord>,
}

impl BatchReport {
    pub fn push(&mut self, outcome: RecordOutcome) {
        match outcome {
            RecordOutcome::Enriched(record) => self.enriched.push(record),
            RecordOutcome::Skipped(skipped) => self.skipped.push(skipped),
        }
    }

    pub fn total(&self) -> usize {
        self.enriched.len() + self.skipped.len()
    }

    pub fn enriched_count(&self) -> usize {
        self.enriched.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}
