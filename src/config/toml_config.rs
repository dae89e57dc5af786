use crate::domain::model::{InputFormat, OutputFormat};
use crate::utils::error::{EnrichError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_one_of, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const LOG_FORMATS: [&str; 2] = ["compact", "json"];
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub enricher: EnricherConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnricherConfig {
    pub text_field: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub path: Option<String>,
    pub format: Option<InputFormat>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub pretty: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: Option<String>,
    pub level: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EnrichError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TEXT_FIELD})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EnrichError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(field) = &self.enricher.text_field {
            validate_non_empty_string("enricher.text_field", field)?;
        }
        if let Some(format) = &self.logging.format {
            validate_one_of("logging.format", format, &LOG_FORMATS)?;
        }
        if let Some(level) = &self.logging.level {
            validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = TomlConfig::from_toml_str(
            r#"
[enricher]
text_field = "body"

[input]
path = "messages.jsonl"
format = "jsonl"

[output]
format = "json"
pretty = true

[logging]
format = "json"
level = "debug"
"#,
        )
        .unwrap();

        assert_eq!(config.enricher.text_field.as_deref(), Some("body"));
        assert_eq!(config.input.format, Some(InputFormat::Jsonl));
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert_eq!(config.output.pretty, Some(true));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.enricher.text_field.is_none());
        assert!(config.input.format.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("SENTIMENT_ENRICHER_TEST_FIELD", "message");
        let config = TomlConfig::from_toml_str(
            r#"
[enricher]
text_field = "${SENTIMENT_ENRICHER_TEST_FIELD}"
"#,
        )
        .unwrap();

        assert_eq!(config.enricher.text_field.as_deref(), Some("message"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            TomlConfig::from_toml_str("[input]\nformat = \"xml\"\n"),
            Err(EnrichError::ConfigValidationError { .. })
        ));

        let config = TomlConfig::from_toml_str("[logging]\nformat = \"yaml\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(EnrichError::InvalidConfigValueError { .. })
        ));

        let config = TomlConfig::from_toml_str("[enricher]\ntext_field = \"  \"\n").unwrap();
        assert!(config.validate().is_err());
    }
}
