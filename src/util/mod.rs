//! Utility modules for bbl-janitor

pub mod logging;

pub use logging::{init_logging, parse_level, LoggingConfig};
