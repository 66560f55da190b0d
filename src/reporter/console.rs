//! Reporter that writes to a terminal or any other writer

use super::Reporter;
use std::io::{self, Write};
use std::sync::Mutex;

/// Writes each report verbatim, one line per preserved path.
pub struct ConsoleReporter {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleReporter {
    pub fn stderr() -> Self {
        Self::new(Box::new(io::stderr()))
    }

    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::stderr()
    }
}

impl std::fmt::Debug for ConsoleReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleReporter").finish_non_exhaustive()
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, message: &str) {
        if let Ok(mut writer) = self.writer.lock() {
            // a broken pipe must not abort teardown
            let _ = writeln!(writer, "{}", message);
            let _ = writer.flush();
        }
    }
}
