//! Configuration management for bbl-janitor
//!
//! Settings are loaded from environment variables with sensible defaults.
//! Command-line flags take precedence over anything read here.
//!
//! # Environment Variables
//!
//! - `BBL_STATE_DIR`: State directory to clean up - default: current directory
//! - `BBL_JANITOR_LOG_LEVEL`: Logging level - default: "info"
//! - `BBL_JANITOR_LOG_JSON`: Emit JSON logs (true|false) - default: "false"
//!
//! # Example
//!
//! ```no_run
//! use bbl_janitor::JanitorConfig;
//!
//! let config = JanitorConfig::default();
//! config.validate().expect("Invalid configuration");
//! println!("{}", config.state_dir.display());
//! ```

use crate::util::logging::parse_level;
use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_LOG_JSON: bool = false;

pub const STATE_DIR_ENV: &str = "BBL_STATE_DIR";
pub const LOG_LEVEL_ENV: &str = "BBL_JANITOR_LOG_LEVEL";
pub const LOG_JSON_ENV: &str = "BBL_JANITOR_LOG_JSON";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Failed to parse configuration value
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JanitorConfig {
    /// Directory holding bbl-state.json and the generated files around it
    pub state_dir: PathBuf,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for JanitorConfig {
    fn default() -> Self {
        let state_dir = env::var(STATE_DIR_ENV)
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let log_level = env::var(LOG_LEVEL_ENV)
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let log_json = env::var(LOG_JSON_ENV)
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(DEFAULT_LOG_JSON);

        Self {
            state_dir,
            log_level,
            log_json,
        }
    }
}

impl JanitorConfig {
    /// Reads the environment, failing on values that cannot be parsed
    /// instead of falling back to defaults.
    ///
    /// The result is not validated: flag overrides are applied first, then
    /// the caller runs [`JanitorConfig::validate`] once.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::default();

        if let Ok(raw) = env::var(LOG_JSON_ENV) {
            raw.parse::<bool>().map_err(|e| ConfigError::ParseError {
                field: LOG_JSON_ENV.to_string(),
                error: e.to_string(),
            })?;
        }

        Ok(config)
    }

    /// Override the log level, typically from `--log-level`, `-v` or `-q`
    pub fn with_log_level(mut self, log_level: Option<String>) -> Self {
        if let Some(level) = log_level {
            self.log_level = level.to_lowercase();
        }
        self
    }

    /// Override the state directory, typically from a `--state-dir` flag
    pub fn with_state_dir(mut self, state_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = state_dir {
            self.state_dir = dir;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.state_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "State directory must not be empty".to_string(),
            ));
        }

        if parse_level(&self.log_level).is_none() {
            return Err(ConfigError::ValidationFailed(format!(
                "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                self.log_level
            )));
        }

        Ok(())
    }
}

impl fmt::Display for JanitorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "bbl-janitor Configuration:")?;
        writeln!(f, "  State Dir: {}", self.state_dir.display())?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        writeln!(f, "  JSON Logs: {}", self.log_json)?;
        Ok(())
    }
}
