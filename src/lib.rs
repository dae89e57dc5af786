pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::Settings;

#[cfg(feature = "vader")]
pub use adapters::scorer::VaderScorer;
pub use adapters::diagnostics::{CollectingSink, TracingSink};
pub use adapters::scorer::scorer_fn;
pub use adapters::storage::LocalStorage;
pub use app::runner::{EnrichmentRunner, RunSummary};
pub use crate::core::enricher::{process, SentimentEnricher};
pub use domain::model::{
    BatchReport, EnrichedRecord, Record, RecordOutcome, SentimentLabel, SkippedRecord,
};
pub use domain::ports::{DiagnosticSink, SentimentScorer};
pub use utils::error::{EnrichError, Result, ScoringError};
