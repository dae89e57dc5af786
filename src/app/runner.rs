use crate::adapters::diagnostics::{CollectingSink, Tee, TracingSink};
use crate::adapters::records::{decode_records, encode_records};
use crate::core::enricher::SentimentEnricher;
use crate::domain::model::DiagnosticLevel;
use crate::domain::ports::{ConfigProvider, SentimentScorer, Storage};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub total: usize,
    pub enriched: usize,
    pub missing_field: usize,
    pub scoring_failed: usize,
}

impl RunSummary {
    pub fn skipped(&self) -> usize {
        self.missing_field + self.scoring_failed
    }
}

/// Reads one batch, enriches it and writes the survivors.
pub struct EnrichmentRunner<St: Storage, Sc: SentimentScorer> {
    storage: St,
    scorer: Sc,
    monitor_enabled: bool,
}

impl<St: Storage, Sc: SentimentScorer> EnrichmentRunner<St, Sc> {
    pub fn new(storage: St, scorer: Sc) -> Self {
        Self {
            storage,
            scorer,
            monitor_enabled: false,
        }
    }

    pub fn new_with_monitoring(storage: St, scorer: Sc, monitor_enabled: bool) -> Self {
        Self {
            storage,
            scorer,
            monitor_enabled,
        }
    }

    pub fn run<C: ConfigProvider, W: Write>(&self, config: &C, writer: W) -> Result<RunSummary> {
        let mut monitor = SystemMonitor::new(self.monitor_enabled);

        tracing::info!("📥 Reading input from {}", config.input_path());
        let raw = self.storage.read_input(config.input_path())?;
        let records = decode_records(&raw, config.input_format())?;
        tracing::info!("Read {} records", records.len());
        monitor.log_phase("Read");

        let enricher = SentimentEnricher::new(&self.scorer).with_text_field(config.text_field());
        let total = records.len();
        let mut sink = Tee(TracingSink, CollectingSink::default());
        let enriched = enricher.process(records, &mut sink);
        monitor.log_phase("Enrich");

        let summary = RunSummary {
            total,
            enriched: enriched.len(),
            missing_field: sink.1.count(DiagnosticLevel::Warning),
            scoring_failed: sink.1.count(DiagnosticLevel::Error),
        };

        encode_records(&enriched, config.output_format(), config.pretty(), writer)?;
        monitor.log_phase("Write");

        tracing::info!(
            "✅ Enriched {}/{} records ({} missing '{}', {} scoring failures)",
            summary.enriched,
            summary.total,
            summary.missing_field,
            config.text_field(),
            summary.scoring_failed
        );

        Ok(summary)
    }
}
