use crate::domain::model::{DiagnosticLevel, SkippedRecord};
use crate::domain::ports::DiagnosticSink;
use crate::utils::error::EnrichError;

/// What operators need to understand a skip without re-running the batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub index: usize,
    pub message: String,
    /// The offending record (as JSON) for missing fields, the text for scoring failures.
    pub context: String,
}

impl Diagnostic {
    pub fn from_skipped(skipped: &SkippedRecord) -> Self {
        let context = match &skipped.reason {
            EnrichError::Scoring { text, .. } => text.clone(),
            _ => serde_json::to_string(&skipped.record)
                .unwrap_or_else(|_| format!("{:?}", skipped.record.data)),
        };

        Self {
            level: skipped.level(),
            index: skipped.index,
            message: skipped.reason.to_string(),
            context,
        }
    }
}

/// Forwards diagnostics to `tracing` at warn / error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, skipped: &SkippedRecord) {
        let diagnostic = Diagnostic::from_skipped(skipped);

        match &skipped.reason {
            EnrichError::MissingField { field } => {
                tracing::warn!(
                    index = diagnostic.index,
                    field = %field,
                    record = %diagnostic.context,
                    "⚠️ Skipping message: missing required '{}' field: {}",
                    field,
                    diagnostic.context
                );
            }
            EnrichError::Scoring { text, source } => {
                tracing::error!(
                    index = diagnostic.index,
                    text = %text,
                    error = %source,
                    "❌ Sentiment processing failed for text: {} | Error: {}",
                    text,
                    source
                );
            }
            other => match diagnostic.level {
                DiagnosticLevel::Warning => {
                    tracing::warn!(index = diagnostic.index, "⚠️ Skipping message: {}", other)
                }
                DiagnosticLevel::Error => {
                    tracing::error!(index = diagnostic.index, "❌ Skipping message: {}", other)
                }
            },
        }
    }
}

/// Keeps diagnostics in memory so the caller decides how to surface them.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn count(&self, level: DiagnosticLevel) -> usize {
        self.diagnostics.iter().filter(|d| d.level == level).count()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&mut self, skipped: &SkippedRecord) {
        self.diagnostics.push(Diagnostic::from_skipped(skipped));
    }
}

/// Fans each diagnostic out to two sinks.
pub struct Tee<A, B>(pub A, pub B);

impl<A: DiagnosticSink, B: DiagnosticSink> DiagnosticSink for Tee<A, B> {
    fn emit(&mut self, skipped: &SkippedRecord) {
        self.0.emit(skipped);
        self.1.emit(skipped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Record;
    use crate::utils::error::ScoringError;

    #[test]
    fn test_collecting_sink_levels() {
        let mut sink = CollectingSink::default();
        sink.emit(&SkippedRecord {
            index: 0,
            record: Record::new().with("id", 1),
            reason: EnrichError::MissingField {
                field: "text".to_string(),
            },
        });
        sink.emit(&SkippedRecord {
            index: 1,
            record: Record::new().with("text", "bad"),
            reason: EnrichError::Scoring {
                text: "bad".to_string(),
                source: ScoringError::Panicked("index out of bounds".to_string()),
            },
        });

        assert_eq!(sink.count(DiagnosticLevel::Warning), 1);
        assert_eq!(sink.count(DiagnosticLevel::Error), 1);

        let diagnostics = sink.into_diagnostics();
        assert_eq!(diagnostics[0].context, r#"{"id":1}"#);
        assert_eq!(diagnostics[1].context, "bad");
        assert!(diagnostics[1].message.contains("index out of bounds"));
    }

    #[test]
    fn test_missing_field_context_keeps_field_order() {
        let diagnostic = Diagnostic::from_skipped(&SkippedRecord {
            index: 0,
            record: Record::new().with("user", "u9").with("id", 7).with("body", "hi"),
            reason: EnrichError::MissingField {
                field: "text".to_string(),
            },
        });

        assert_eq!(diagnostic.context, r#"{"user":"u9","id":7,"body":"hi"}"#);
    }

    #[test]
    fn test_tee_forwards_to_both_sinks() {
        let mut tee = Tee(CollectingSink::default(), TracingSink);
        tee.emit(&SkippedRecord {
            index: 3,
            record: Record::new(),
            reason: EnrichError::MissingField {
                field: "text".to_string(),
            },
        });

        assert_eq!(tee.0.len(), 1);
        assert_eq!(tee.0.diagnostics()[0].index, 3);
    }
}
