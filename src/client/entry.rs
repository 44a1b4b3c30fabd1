use crate::client::ActionOutcome;
use crate::client::api::{NewEntry, TrackerApi};
use crate::client::notify::Notifier;
use tracing::{error, info};

pub const FIELDS_REQUIRED: &str = "Please fill in all fields for the forgotten entry.";
pub const ENTRY_ADDED: &str = "Entry added successfully!";
pub const ADD_FAILED: &str = "Failed to add entry.";

/// Backfill form for an entry the timer missed.
///
/// Start and end hold `datetime-local` values (`YYYY-MM-DDTHH:MM`). Whether
/// end falls after start is left to the server.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManualEntryForm {
    pub project: String,
    pub start_time: String,
    pub end_time: String,
}

impl ManualEntryForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill(
        &mut self,
        project: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) {
        self.project = project.into();
        self.start_time = start_time.into();
        self.end_time = end_time.into();
    }

    pub fn clear(&mut self) {
        self.project.clear();
        self.start_time.clear();
        self.end_time.clear();
    }

    pub async fn submit<A, N>(&mut self, api: &A, notifier: &mut N) -> ActionOutcome
    where
        A: TrackerApi,
        N: Notifier,
    {
        let project = self.project.trim();
        if project.is_empty() || self.start_time.trim().is_empty() || self.end_time.trim().is_empty() {
            notifier.alert(FIELDS_REQUIRED);
            return ActionOutcome::Rejected;
        }

        let entry = NewEntry {
            project,
            start_time: &self.start_time,
            end_time: &self.end_time,
        };
        match api.add_entry(&entry).await {
            Ok(message) => {
                info!(project = entry.project, "{message}");
                notifier.alert(ENTRY_ADDED);
                self.clear();
                ActionOutcome::Completed
            }
            Err(err) => {
                error!("error adding entry: {err}");
                notifier.alert(ADD_FAILED);
                ActionOutcome::Failed
            }
        }
    }
}
