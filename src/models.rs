use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredEntry {
    pub id: u64,
    pub project_id: u64,
    pub start_time: String,
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TrackerData {
    pub projects: Vec<Project>,
    pub entries: Vec<StoredEntry>,
}

impl TrackerData {
    /// Returns the id of `name`, registering the project if it is new.
    pub fn ensure_project(&mut self, name: &str) -> u64 {
        if let Some(project) = self.projects.iter().find(|project| project.name == name) {
            return project.id;
        }
        let id = self.projects.iter().map(|project| project.id).max().unwrap_or(0) + 1;
        self.projects.push(Project {
            id,
            name: name.to_string(),
        });
        id
    }

    pub fn project_name(&self, project_id: u64) -> Option<&str> {
        self.projects
            .iter()
            .find(|project| project.id == project_id)
            .map(|project| project.name.as_str())
    }

    /// Closes every open entry at `end_time`, returning how many were closed.
    pub fn close_open_entries(&mut self, end_time: &str) -> usize {
        let mut closed = 0;
        for entry in self.entries.iter_mut().filter(|entry| entry.end_time.is_none()) {
            entry.end_time = Some(end_time.to_string());
            closed += 1;
        }
        closed
    }

    pub fn push_entry(&mut self, project_id: u64, start_time: String, end_time: Option<String>) -> u64 {
        let id = self.entries.iter().map(|entry| entry.id).max().unwrap_or(0) + 1;
        self.entries.push(StoredEntry {
            id,
            project_id,
            start_time,
            end_time,
        });
        id
    }
}

#[derive(Debug, Deserialize)]
pub struct StartTimerRequest {
    #[serde(default)]
    pub project: String,
}

#[derive(Debug, Deserialize)]
pub struct AddEntryRequest {
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            project_id: None,
        }
    }
}

/// One row of `/api/timeline`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineEntry {
    #[serde(default)]
    pub id: Option<u64>,
    pub project_name: String,
    pub start_time: String,
    pub end_time: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
