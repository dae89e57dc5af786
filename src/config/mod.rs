pub mod toml_config;

use crate::adapters::storage::STDIN_PATH;
use crate::core::enricher::DEFAULT_TEXT_FIELD;
use crate::domain::model::{InputFormat, OutputFormat};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_one_of, validate_path, Validate};
use toml_config::{TomlConfig, LOG_FORMATS, LOG_LEVELS};

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "sentiment-enricher")]
#[command(about = "Adds sentiment_score and sentiment_label to a batch of message records")]
pub struct CliConfig {
    #[arg(help = "Input file, or '-' for stdin [default: -]")]
    pub input: Option<String>,

    #[arg(long, help = "TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, value_enum)]
    pub input_format: Option<InputFormat>,

    #[arg(long, value_enum)]
    pub output_format: Option<OutputFormat>,

    #[arg(long, help = "Field holding the message text [default: text]")]
    pub text_field: Option<String>,

    #[arg(long, help = "Pretty-print JSON output")]
    pub pretty: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,
}

/// Effective settings after merging the TOML file with CLI flags.
#[derive(Debug, Clone)]
pub struct Settings {
    pub input_path: String,
    pub input_format: InputFormat,
    pub output_format: OutputFormat,
    pub text_field: String,
    pub pretty: bool,
    pub log_format: String,
    pub log_level: Option<String>,
    pub verbose: bool,
    pub monitor: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_path: STDIN_PATH.to_string(),
            input_format: InputFormat::Json,
            output_format: OutputFormat::Json,
            text_field: DEFAULT_TEXT_FIELD.to_string(),
            pretty: false,
            log_format: "compact".to_string(),
            log_level: None,
            verbose: false,
            monitor: false,
        }
    }
}

impl Settings {
    /// Applies file values on top of the defaults.
    ///
    /// Without an explicit input format the path's extension decides,
    /// falling back to JSON.
    pub fn from_file(file: &TomlConfig) -> Self {
        let defaults = Self::default();
        let input_path = file.input.path.clone().unwrap_or(defaults.input_path);
        let input_format = file
            .input
            .format
            .or_else(|| InputFormat::from_path(&input_path))
            .unwrap_or(defaults.input_format);

        Self {
            input_format,
            input_path,
            output_format: file.output.format.unwrap_or(defaults.output_format),
            text_field: file.enricher.text_field.clone().unwrap_or(defaults.text_field),
            pretty: file.output.pretty.unwrap_or(defaults.pretty),
            log_format: file.logging.format.clone().unwrap_or(defaults.log_format),
            log_level: file.logging.level.clone(),
            verbose: defaults.verbose,
            monitor: defaults.monitor,
        }
    }

    /// CLI flags win over the configuration file.
    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                file
            }
            None => TomlConfig::default(),
        };

        let mut settings = Self::from_file(&file);

        if let Some(input) = &cli.input {
            settings.input_path = input.clone();
            if file.input.format.is_none() {
                settings.input_format =
                    InputFormat::from_path(input).unwrap_or(InputFormat::Json);
            }
        }
        if let Some(format) = cli.input_format {
            settings.input_format = format;
        }
        if let Some(format) = cli.output_format {
            settings.output_format = format;
        }
        if let Some(field) = &cli.text_field {
            settings.text_field = field.clone();
        }
        settings.pretty |= cli.pretty;
        if cli.json_logs {
            settings.log_format = "json".to_string();
        }
        settings.verbose = cli.verbose;
        settings.monitor = cli.monitor;

        Ok(settings)
    }

    pub fn json_logs(&self) -> bool {
        self.log_format == "json"
    }
}

impl ConfigProvider for Settings {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn input_format(&self) -> InputFormat {
        self.input_format
    }

    fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    fn text_field(&self) -> &str {
        &self.text_field
    }

    fn pretty(&self) -> bool {
        self.pretty
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input_path)?;
        validate_non_empty_string("text_field", &self.text_field)?;
        validate_one_of("log_format", &self.log_format, &LOG_FORMATS)?;
        if let Some(level) = &self.log_level {
            validate_one_of("log_level", level, &LOG_LEVELS)?;
        }
        Ok(())
    }
}
