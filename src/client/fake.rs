use crate::client::api::{ClientError, NewEntry, ProjectHours, TrackerApi};
use crate::models::TimelineEntry;
use reqwest::StatusCode;
use std::sync::Mutex;

/// In-memory stand-in for the server, recording every call.
#[derive(Default)]
pub struct FakeApi {
    pub fail_start: bool,
    pub fail_stop: bool,
    pub fail_add: bool,
    pub fail_timeline: bool,
    pub fail_analytics: bool,
    pub entries: Vec<TimelineEntry>,
    pub totals: ProjectHours,
    pub(crate) calls: Mutex<Vec<&'static str>>,
    pub(crate) started: Mutex<Vec<String>>,
    pub(crate) added: Mutex<Vec<(String, String, String)>>,
}

impl FakeApi {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn started_projects(&self) -> Vec<String> {
        self.started.lock().unwrap().clone()
    }

    pub fn added_entries(&self) -> Vec<(String, String, String)> {
        self.added.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str, fail: bool) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(call);
        if fail {
            return Err(ClientError::Status {
                path: call,
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: "boom".into(),
            });
        }
        Ok(())
    }
}

impl TrackerApi for FakeApi {
    async fn start_timer(&self, project: &str) -> Result<String, ClientError> {
        self.record("start_timer", self.fail_start)?;
        self.started.lock().unwrap().push(project.to_string());
        Ok("Timer started".into())
    }

    async fn stop_timer(&self) -> Result<String, ClientError> {
        self.record("stop_timer", self.fail_stop)?;
        Ok("Timer stopped".into())
    }

    async fn add_entry(&self, entry: &NewEntry<'_>) -> Result<String, ClientError> {
        self.record("add_entry", self.fail_add)?;
        self.added.lock().unwrap().push((
            entry.project.to_string(),
            entry.start_time.to_string(),
            entry.end_time.to_string(),
        ));
        Ok("Entry added".into())
    }

    async fn timeline(&self) -> Result<Vec<TimelineEntry>, ClientError> {
        self.record("timeline", self.fail_timeline)?;
        Ok(self.entries.clone())
    }

    async fn analytics(&self) -> Result<ProjectHours, ClientError> {
        self.record("analytics", self.fail_analytics)?;
        Ok(self.totals.clone())
    }
}
