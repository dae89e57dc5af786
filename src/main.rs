use clap::Parser;
use sentiment_enricher::utils::error::ErrorSeverity;
use sentiment_enricher::utils::{logger, validation::Validate};
use sentiment_enricher::{CliConfig, EnrichmentRunner, LocalStorage, Settings, VaderScorer};

fn main() {
    let cli = CliConfig::parse();

    let settings = match Settings::resolve(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            // 日誌尚未初始化，直接輸出到 stderr
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(exit_code(e.severity()));
        }
    };

    if settings.json_logs() {
        logger::init_json_logger(settings.verbose, settings.log_level.as_deref());
    } else {
        logger::init_cli_logger(settings.verbose, settings.log_level.as_deref());
    }

    tracing::info!("Starting sentiment-enricher");
    tracing::debug!("Effective settings: {:?}", settings);

    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(exit_code(e.severity()));
    }

    if settings.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let runner = EnrichmentRunner::new_with_monitoring(
        LocalStorage::new(),
        VaderScorer::new(),
        settings.monitor,
    );
    let stdout = std::io::stdout();

    match runner.run(&settings, stdout.lock()) {
        Ok(summary) => {
            if summary.skipped() > 0 {
                tracing::warn!("⚠️ {} records were skipped", summary.skipped());
            }
        }
        Err(e) => {
            tracing::error!("❌ Enrichment failed: {} (Severity: {:?})", e, e.severity());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(exit_code(e.severity()));
        }
    }
}

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
