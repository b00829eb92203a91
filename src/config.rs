use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};
use validator::{Validate, ValidationError};

/// Default values for configuration
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENV: &str = "development";
const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PAGE_SIZE: usize = 25;
const DEFAULT_EXPORT_DELIMITER: &str = ";";
const DEFAULT_MOCK_HOST: &str = "127.0.0.1";
const DEFAULT_MOCK_PORT: u16 = 8080;
const CONFIG_DIR: &str = "config";

/// Application configuration structure with validation
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Base URL of the maintenance REST API, resource paths are appended to it
    #[validate(url)]
    pub api_base_url: String,

    /// Bearer token attached to every API request
    #[serde(default)]
    pub api_token: Option<String>,

    /// Per-request timeout (1s - 5min)
    #[serde(default = "default_request_timeout_secs")]
    #[validate(range(min = 1, max = 300))]
    pub request_timeout_secs: u64,

    /// Application environment
    pub environment: String,

    /// Logging level
    #[serde(default = "default_log_level")]
    #[validate(custom = "validate_log_level")]
    pub log_level: String,

    /// Log in JSON format (structured logging)
    #[serde(default)]
    pub log_json: bool,

    /// Rows per table page
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 1000))]
    pub page_size: usize,

    /// Field delimiter for exported spreadsheets
    #[serde(default = "default_export_delimiter")]
    #[validate(custom = "validate_export_delimiter")]
    pub export_delimiter: String,

    /// Mock server bind host
    #[serde(default = "default_mock_host")]
    pub mock_host: String,

    /// Mock server bind port
    #[serde(default = "default_mock_port")]
    pub mock_port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL.to_string(), DEFAULT_ENV.to_string())
    }
}

impl AppConfig {
    pub fn new(api_base_url: String, environment: String) -> Self {
        Self {
            api_base_url,
            api_token: None,
            request_timeout_secs: default_request_timeout_secs(),
            environment,
            log_level: default_log_level(),
            log_json: false,
            page_size: default_page_size(),
            export_delimiter: default_export_delimiter(),
            mock_host: default_mock_host(),
            mock_port: default_mock_port(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }

    /// Gets log level reference
    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Export delimiter as a single byte, as required by the CSV writer
    pub fn export_delimiter_byte(&self) -> u8 {
        self.export_delimiter.as_bytes().first().copied().unwrap_or(b';')
    }

    pub fn mock_addr(&self) -> String {
        format!("{}:{}", self.mock_host, self.mock_port)
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("Configuration loading failed: {0}")]
    Load(#[from] ConfigError),

    #[error("Configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Default value functions
fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_export_delimiter() -> String {
    DEFAULT_EXPORT_DELIMITER.to_string()
}

fn default_mock_host() -> String {
    DEFAULT_MOCK_HOST.to_string()
}

fn default_mock_port() -> u16 {
    DEFAULT_MOCK_PORT
}

/// Validates log level values
fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if valid_levels.contains(&level.to_lowercase().as_str()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("log_level");
        err.message = Some("Must be one of: trace, debug, info, warn, error".into());
        Err(err)
    }
}

fn validate_export_delimiter(delimiter: &str) -> Result<(), ValidationError> {
    if delimiter.len() == 1 && delimiter.is_ascii() {
        Ok(())
    } else {
        let mut err = ValidationError::new("export_delimiter");
        err.message = Some("export_delimiter must be a single ASCII character".into());
        Err(err)
    }
}

/// Initializes tracing using the provided log level as the default filter
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_directive = format!("maintenance_hub={},tower_http=debug", level);
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);

    let filter = EnvFilter::new(filter_directive);
    if json {
        let _ = fmt().with_env_filter(filter).json().try_init();
    } else {
        let _ = fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
    }
}

/// Loads application configuration
///
/// Layers configuration sources in this order:
/// 1. Built-in defaults
/// 2. Default config (config/default.toml)
/// 3. Environment-specific config (config/{env}.toml)
/// 4. Environment variables prefixed with `APP__`
pub fn load_config() -> Result<AppConfig, AppConfigError> {
    load_config_from(CONFIG_DIR)
}

/// Same as [`load_config`] with an explicit configuration directory.
pub fn load_config_from(config_dir: &str) -> Result<AppConfig, AppConfigError> {
    // Support both RUN_ENV and APP_ENV for selecting config profile
    let run_env = env::var("RUN_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| DEFAULT_ENV.to_string());
    info!("Loading configuration for environment: {}", run_env);

    if !Path::new(config_dir).exists() {
        info!(
            "Config directory '{}' not found; relying on built-in defaults and environment variables",
            config_dir
        );
    }

    let config = Config::builder()
        .set_default("api_base_url", DEFAULT_API_BASE_URL)?
        .set_default("environment", run_env.as_str())?
        .set_default("log_level", DEFAULT_LOG_LEVEL)?
        .set_default("log_json", false)?
        .add_source(File::with_name(&format!("{}/default", config_dir)).required(false))
        .add_source(File::with_name(&format!("{}/{}", config_dir, run_env)).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    app_config.validate().map_err(|e| {
        error!("Configuration validation failed: {:?}", e);
        AppConfigError::Validation(e)
    })?;

    info!("Configuration loaded successfully");
    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_validate() {
        let cfg = AppConfig::default();
        assert!(cfg.validate().is_ok());
        assert!(cfg.is_development());
        assert_eq!(cfg.export_delimiter_byte(), b';');
        assert_eq!(cfg.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn rejects_multi_character_delimiter() {
        let mut cfg = AppConfig::default();
        cfg.export_delimiter = ";;".into();
        let errors = cfg.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("export_delimiter"));
    }

    #[test]
    fn rejects_malformed_base_url_and_zero_page_size() {
        let mut cfg = AppConfig::new("not a url".into(), "test".into());
        cfg.page_size = 0;
        let errors = cfg.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("api_base_url"));
        assert!(fields.contains_key("page_size"));
    }

    #[test]
    fn reads_default_file_from_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "api_base_url = \"https://cmms.example.com/api\"\npage_size = 50\n",
        )
        .unwrap();

        let cfg = load_config_from(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.api_base_url, "https://cmms.example.com/api");
        assert_eq!(cfg.page_size, 50);
        assert_eq!(cfg.log_level(), "info");
    }
}
