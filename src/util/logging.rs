//! Structured logging setup for bbl-janitor
//!
//! Logs go to stderr through the `tracing` ecosystem so that they never mix
//! with the plan printed on stdout.
//!
//! # Example
//!
//! ```no_run
//! use bbl_janitor::util::logging::{init_logging, LoggingConfig};
//! use bbl_janitor::JanitorConfig;
//! use tracing::info;
//!
//! let config = JanitorConfig::default();
//! init_logging(LoggingConfig::from(&config));
//! info!(dir = "/var/bbl/env-a", "Tearing down");
//! ```

use crate::config::JanitorConfig;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Minimum level for `bbl_janitor` targets
    pub level: Level,

    /// One JSON object per line instead of the human format
    pub use_json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
        }
    }
}

impl From<&JanitorConfig> for LoggingConfig {
    fn from(config: &JanitorConfig) -> Self {
        Self {
            level: parse_level(&config.log_level).unwrap_or(Level::INFO),
            use_json: config.log_json,
        }
    }
}

/// Parses a log level name, case-insensitively.
///
/// ```
/// use bbl_janitor::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Some(Level::DEBUG));
/// assert_eq!(parse_level("WARN"), Some(Level::WARN));
/// assert_eq!(parse_level("chatty"), None);
/// ```
pub fn parse_level(level_str: &str) -> Option<Level> {
    match level_str.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Installs the global subscriber. Only the first call has any effect.
/// A valid `RUST_LOG` takes precedence over `config.level`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("bbl_janitor={}", config.level)));

        let json = config
            .use_json
            .then(|| fmt::layer().json().with_writer(std::io::stderr));
        let human = (!config.use_json).then(|| fmt::layer().with_writer(std::io::stderr));

        tracing_subscriber::registry()
            .with(filter)
            .with(json)
            .with(human)
            .init();
    });
}
