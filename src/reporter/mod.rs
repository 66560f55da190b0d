//! Reporter port for files left behind during teardown

mod console;
mod handler;
mod logging;

pub use console::ConsoleReporter;
pub use handler::{NoOpReporter, RecordingReporter, Reporter};
pub use logging::LoggingReporter;
