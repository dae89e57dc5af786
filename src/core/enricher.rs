use crate::adapters::diagnostics::TracingSink;
use crate::domain::model::{BatchReport, EnrichedRecord, Record, RecordOutcome, SkippedRecord};
use crate::domain::ports::{DiagnosticSink, SentimentScorer};
use crate::utils::error::{EnrichError, Result, ScoringError};
use crate::utils::validation::validate_fields;

pub const DEFAULT_TEXT_FIELD: &str = "text";

/// Scores and labels a batch of records in a single sequential pass.
///
/// Each record is validated, scored, labelled and collected before the next
/// one is looked at. Failures skip only the offending record.
pub struct SentimentEnricher<S: SentimentScorer> {
    scorer: S,
    text_field: String,
}

impl<S: SentimentScorer> SentimentEnricher<S> {
    pub fn new(scorer: S) -> Self {
        Self {
            scorer,
            text_field: DEFAULT_TEXT_FIELD.to_string(),
        }
    }

    pub fn with_text_field(mut self, field: impl Into<String>) -> Self {
        self.text_field = field.into();
        self
    }

    pub fn text_field(&self) -> &str {
        &self.text_field
    }

    /// Enriches one record, or explains why it cannot be.
    ///
    /// The record is only borrowed so a failure leaves it with the caller
    /// untouched.
    pub fn enrich_one(&self, record: &Record) -> Result<EnrichedRecord> {
        let polarity = self.polarity_of(record)?;
        Ok(EnrichedRecord::new(record.clone(), polarity))
    }

    fn polarity_of(&self, record: &Record) -> Result<f64> {
        validate_fields(record, &[self.text_field.as_str()])?;

        let text = record.text_of(&self.text_field).unwrap_or_default();
        self.score(&text)
            .map_err(|source| EnrichError::Scoring { text, source })
    }

    fn score(&self, text: &str) -> std::result::Result<f64, ScoringError> {
        let polarity = self.scorer.polarity(text)?;

        if !polarity.is_finite() {
            return Err(ScoringError::NonFinite(polarity));
        }
        if !(-1.0..=1.0).contains(&polarity) {
            return Err(ScoringError::OutOfRange(polarity));
        }

        Ok(polarity)
    }

    pub fn outcome(&self, index: usize, record: Record) -> RecordOutcome {
        match self.polarity_of(&record) {
            Ok(polarity) => RecordOutcome::Enriched(EnrichedRecord::new(record, polarity)),
            Err(reason) => RecordOutcome::Skipped(SkippedRecord {
                index,
                record,
                reason,
            }),
        }
    }

    /// Runs the batch and returns every outcome, emitting nothing.
    pub fn process_with_report(&self, records: Vec<Record>) -> BatchReport {
        let mut report = BatchReport::default();
        for (index, record) in records.into_iter().enumerate() {
            report.push(self.outcome(index, record));
        }
        report
    }

    /// Runs the batch, reporting each skipped record to `sink`.
    ///
    /// Returns the enriched records in their original relative order.
    pub fn process<D: DiagnosticSink + ?Sized>(
        &self,
        records: Vec<Record>,
        sink: &mut D,
    ) -> Vec<EnrichedRecord> {
        let mut enriched = Vec::with_capacity(records.len());

        for (index, record) in records.into_iter().enumerate() {
            match self.outcome(index, record) {
                RecordOutcome::Enriched(record) => enriched.push(record),
                RecordOutcome::Skipped(skipped) => sink.emit(&skipped),
            }
        }

        tracing::debug!(
            "Enriched {} records using field '{}'",
            enriched.len(),
            self.text_field
        );
        enriched
    }
}

/// Enriches `payloads` with `scorer`, logging skipped records through `tracing`.
pub fn process<S: SentimentScorer>(payloads: Vec<Record>, scorer: S) -> Vec<EnrichedRecord> {
    SentimentEnricher::new(scorer).process(payloads, &mut TracingSink)
}
