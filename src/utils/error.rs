use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnrichError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Input decode error at line {line}: {message}")]
    DecodeError { line: usize, message: String },

    #[error("Missing required field '{field}'")]
    MissingField { field: String },

    #[error("Sentiment scoring failed for text {text:?}: {source}")]
    Scoring {
        text: String,
        #[source]
        source: ScoringError,
    },
}

/// Failure of a [`SentimentScorer`](crate::domain::ports::SentimentScorer) backend.
///
/// Every cause is collapsed into this one kind from the enricher's point of
/// view; the variant only changes what ends up in the diagnostic.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("scoring backend failed: {0}")]
    Backend(String),

    #[error("scoring backend panicked: {0}")]
    Panicked(String),

    #[error("scorer returned a non-finite polarity ({0})")]
    NonFinite(f64),

    #[error("scorer returned polarity {0} outside [-1.0, 1.0]")]
    OutOfRange(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EnrichError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EnrichError::MissingField { .. } => ErrorSeverity::Low,
            EnrichError::Scoring { .. } | EnrichError::DecodeError { .. } => {
                ErrorSeverity::Medium
            }
            EnrichError::ConfigError { .. }
            | EnrichError::ConfigValidationError { .. }
            | EnrichError::InvalidConfigValueError { .. }
            | EnrichError::CsvError(_)
            | EnrichError::SerializationError(_) => ErrorSeverity::High,
            EnrichError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EnrichError::IoError(_) => {
                "Check that the input path exists and is readable".to_string()
            }
            EnrichError::SerializationError(_) | EnrichError::DecodeError { .. } => {
                "Check that the input matches --input-format (json, jsonl or csv)".to_string()
            }
            EnrichError::CsvError(_) => {
                "Check that the CSV input has a header row and consistent columns".to_string()
            }
            EnrichError::ConfigError { .. }
            | EnrichError::ConfigValidationError { .. }
            | EnrichError::InvalidConfigValueError { .. } => {
                "Review the CLI flags and the TOML configuration file".to_string()
            }
            EnrichError::MissingField { field } => {
                format!("Add a '{}' field to the record and resubmit it", field)
            }
            EnrichError::Scoring { .. } => {
                "Resubmit the record; scoring failures are not retried".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EnrichError::IoError(e) => format!("Could not read input: {}", e),
            EnrichError::SerializationError(e) => format!("Input is not valid JSON: {}", e),
            EnrichError::CsvError(e) => format!("Input is not valid CSV: {}", e),
            EnrichError::DecodeError { line, .. } => {
                format!("Input could not be decoded (line {})", line)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EnrichError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_level_errors_rank_below_config_errors() {
        let missing = EnrichError::MissingField {
            field: "text".to_string(),
        };
        let scoring = EnrichError::Scoring {
            text: "bad".to_string(),
            source: ScoringError::Backend("boom".to_string()),
        };

        assert_eq!(missing.severity(), ErrorSeverity::Low);
        assert_eq!(scoring.severity(), ErrorSeverity::Medium);

        let config = EnrichError::ConfigError {
            message: "bad".to_string(),
        };
        assert!(config.severity() > scoring.severity());
    }

    #[test]
    fn test_scoring_error_message_carries_text_and_cause() {
        let err = EnrichError::Scoring {
            text: "bad".to_string(),
            source: ScoringError::OutOfRange(1.5),
        };
        let message = err.to_string();
        assert!(message.contains("\"bad\""));
        assert!(message.contains("1.5"));
    }
}
