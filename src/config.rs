use std::num::NonZeroU32;
use std::path::Path;

use error_stack::{Report, ResultExt};
use serde::Deserialize;

use crate::abucoins::http::{ABUCOINS_BASE_URL, DEFAULT_REQUESTS_PER_SECOND};
use crate::error::ConfigError;

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "text".into()
}

fn default_base_url() -> String {
    ABUCOINS_BASE_URL.into()
}

fn default_requests_per_second() -> u32 {
    DEFAULT_REQUESTS_PER_SECOND
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub exchange: ExchangeConfig,
}

#[derive(Debug, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Accepted values: `"text"` | `"json"`
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExchangeConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            requests_per_second: default_requests_per_second(),
        }
    }
}

impl ExchangeConfig {
    /// Request rate as a quota-ready value; zero is rejected by [`load`].
    pub fn rate(&self) -> Result<NonZeroU32, Report<ConfigError>> {
        NonZeroU32::new(self.requests_per_second).ok_or_else(|| {
            Report::new(ConfigError::Validation {
                field: "exchange.requests_per_second must be > 0".into(),
            })
        })
    }
}

/// Load and validate an `AppConfig` from a TOML file at `path`.
pub fn load(path: &Path) -> Result<AppConfig, Report<ConfigError>> {
    let content = std::fs::read_to_string(path)
        .change_context(ConfigError::ReadFile)
        .attach_with(|| format!("path: {}", path.display()))?;

    parse(&content)
}

/// Parse and validate config text.
pub fn parse(content: &str) -> Result<AppConfig, Report<ConfigError>> {
    let config: AppConfig = toml::from_str(content).change_context(ConfigError::Parse {
        reason: "invalid TOML syntax or schema mismatch".into(),
    })?;

    validate(&config)?;

    Ok(config)
}

const VALID_LOG_FORMATS: &[&str] = &["text", "json"];

fn validate(config: &AppConfig) -> Result<(), Report<ConfigError>> {
    validate_log_format(config)?;
    validate_base_url(config)?;
    config.exchange.rate()?;
    Ok(())
}

fn validate_log_format(config: &AppConfig) -> Result<(), Report<ConfigError>> {
    if !VALID_LOG_FORMATS.contains(&config.general.log_format.as_str()) {
        return Err(Report::new(ConfigError::Validation {
            field: format!(
                "general.log_format \"{}\" is not one of {:?}",
                config.general.log_format, VALID_LOG_FORMATS
            ),
        }));
    }
    Ok(())
}

fn validate_base_url(config: &AppConfig) -> Result<(), Report<ConfigError>> {
    let url = config.exchange.base_url.trim();
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(Report::new(ConfigError::Validation {
            field: format!("exchange.base_url \"{url}\" must be an http(s) URL"),
        }));
    }
    Ok(())
}
