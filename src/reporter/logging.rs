//! Logging-based reporter

use super::Reporter;
use tracing::warn;

/// Reporter that emits each message as a tracing warning
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingReporter;

impl Reporter for LoggingReporter {
    fn report(&self, message: &str) {
        for line in message.lines() {
            warn!(path = %line, "Preserved file not generated by bbl");
        }
    }
}
