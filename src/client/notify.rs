use tracing::warn;

/// Blocking user-facing notices (`alert()` on the page).
pub trait Notifier {
    fn alert(&mut self, message: &str);
}

/// Sends notices to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn alert(&mut self, message: &str) {
        warn!(target: "time_tracker::alert", "{message}");
    }
}

/// Keeps every notice in order, for callers that render them later.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    pub messages: Vec<String>,
}

impl RecordingNotifier {
    pub fn last(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
