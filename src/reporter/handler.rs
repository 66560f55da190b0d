//! Reporter trait and basic implementations

use std::sync::Mutex;

/// Sink for human-readable warnings about preserved files
pub trait Reporter: Send + Sync {
    /// Called once per managed area that still holds foreign files
    fn report(&self, message: &str);
}

/// Reporter that drops every message
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpReporter;

impl Reporter for NoOpReporter {
    fn report(&self, _message: &str) {}
}

/// Reporter that keeps every message in memory
#[derive(Debug, Default)]
pub struct RecordingReporter {
    messages: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn report(&self, message: &str) {
        (**self).report(message)
    }
}
