//! Headless model of the tracker page.
//!
//! Each component owns the widget state the page would show (input values,
//! button enablement, timer text, list markup) and talks to the server
//! through [`TrackerApi`]. [`Dashboard`] wires the components together.

pub mod api;
pub mod dashboard;
pub mod display;
pub mod entry;
pub mod format;
pub mod notify;
pub mod timer;
pub mod views;

#[cfg(test)]
pub(crate) mod fake;

pub use api::{ClientError, HttpApi, NewEntry, ProjectHours, TrackerApi};
pub use dashboard::Dashboard;
pub use display::TimerDisplay;
pub use entry::ManualEntryForm;
pub use format::format_elapsed;
pub use notify::{Notifier, RecordingNotifier, TracingNotifier};
pub use timer::{TimerControl, TimerState};
pub use views::{AnalyticsView, TimelineView};

/// Result of a user action on one of the components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The server accepted the request and local state was updated.
    Completed,
    /// A required field was blank; nothing was sent.
    Rejected,
    /// The request failed; local state was rolled back.
    Failed,
    /// Another transition is in flight or the action does not apply.
    Busy,
}

impl ActionOutcome {
    pub fn is_completed(self) -> bool {
        self == Self::Completed
    }
}
