use crate::client::ActionOutcome;
use crate::client::api::TrackerApi;
use crate::client::display::TimerDisplay;
use crate::client::notify::Notifier;
use tokio::time::Instant;
use tracing::{debug, error, info};

pub const PROJECT_REQUIRED: &str = "Please enter a project name.";
pub const START_FAILED: &str = "Failed to start timer.";
pub const STOP_FAILED: &str = "Failed to stop timer.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Starting,
    Running { started_at: Instant },
    Stopping { started_at: Instant },
}

/// Project input, start/stop buttons and the ticking display.
///
/// `Starting` and `Stopping` cover the in-flight request; a failed request
/// returns to the state it left.
#[derive(Debug)]
pub struct TimerControl {
    state: TimerState,
    project: String,
    display: TimerDisplay,
}

impl TimerControl {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            project: String::new(),
            display: TimerDisplay::new(),
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    /// Types into the project input. Ignored while the input is disabled.
    pub fn set_project(&mut self, value: impl Into<String>) -> bool {
        if !self.project_enabled() {
            return false;
        }
        self.project = value.into();
        true
    }

    pub fn project_enabled(&self) -> bool {
        self.state == TimerState::Idle
    }

    pub fn start_enabled(&self) -> bool {
        self.state == TimerState::Idle
    }

    pub fn stop_enabled(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    pub fn display(&self) -> &TimerDisplay {
        &self.display
    }

    pub fn display_text(&self) -> String {
        self.display.text()
    }

    pub async fn start<A, N>(&mut self, api: &A, notifier: &mut N) -> ActionOutcome
    where
        A: TrackerApi,
        N: Notifier,
    {
        if self.state != TimerState::Idle {
            debug!(state = ?self.state, "start ignored");
            return ActionOutcome::Busy;
        }

        let project = self.project.trim().to_string();
        if project.is_empty() {
            notifier.alert(PROJECT_REQUIRED);
            return ActionOutcome::Rejected;
        }

        self.state = TimerState::Starting;
        match api.start_timer(&project).await {
            Ok(message) => {
                info!(project = %project, "{message}");
                let started_at = Instant::now();
                self.display.start(started_at);
                self.state = TimerState::Running { started_at };
                ActionOutcome::Completed
            }
            Err(err) => {
                error!("error starting timer: {err}");
                self.state = TimerState::Idle;
                notifier.alert(START_FAILED);
                ActionOutcome::Failed
            }
        }
    }

    pub async fn stop<A, N>(&mut self, api: &A, notifier: &mut N) -> ActionOutcome
    where
        A: TrackerApi,
        N: Notifier,
    {
        let TimerState::Running { started_at } = self.state else {
            debug!(state = ?self.state, "stop ignored");
            return ActionOutcome::Busy;
        };

        self.state = TimerState::Stopping { started_at };
        match api.stop_timer().await {
            Ok(message) => {
                info!("{message}");
                self.display.stop();
                self.project.clear();
                self.state = TimerState::Idle;
                ActionOutcome::Completed
            }
            Err(err) => {
                error!("error stopping timer: {err}");
                self.state = TimerState::Running { started_at };
                notifier.alert(STOP_FAILED);
                ActionOutcome::Failed
            }
        }
    }
}

impl Default for TimerControl {
    fn default() -> Self {
        Self::new()
    }
}
