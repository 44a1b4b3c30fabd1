use crate::models::{MessageResponse, TimelineEntry};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub const START_TIMER_PATH: &str = "/api/start_timer";
pub const STOP_TIMER_PATH: &str = "/api/stop_timer";
pub const ADD_ENTRY_PATH: &str = "/api/add_entry";
pub const TIMELINE_PATH: &str = "/api/timeline";
pub const ANALYTICS_PATH: &str = "/api/analytics";

/// Weekly hours per project, in the order the server listed them.
pub type ProjectHours = Vec<(String, f64)>;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request to {path} failed: {source}")]
    Transport {
        path: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{path} returned {status}: {body}")]
    Status {
        path: &'static str,
        status: StatusCode,
        body: String,
    },
    #[error("unexpected response from {path}: {reason}")]
    Decode { path: &'static str, reason: String },
}

/// Body of `/api/add_entry`. Times are `datetime-local` values.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewEntry<'a> {
    pub project: &'a str,
    pub start_time: &'a str,
    pub end_time: &'a str,
}

#[derive(Serialize)]
struct StartTimerBody<'a> {
    project: &'a str,
}

/// The server calls the page makes. Mutations return the server's message.
#[allow(async_fn_in_trait)]
pub trait TrackerApi {
    async fn start_timer(&self, project: &str) -> Result<String, ClientError>;
    async fn stop_timer(&self) -> Result<String, ClientError>;
    async fn add_entry(&self, entry: &NewEntry<'_>) -> Result<String, ClientError>;
    async fn timeline(&self) -> Result<Vec<TimelineEntry>, ClientError>;
    async fn analytics(&self) -> Result<ProjectHours, ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .build()
            .map_err(|source| ClientError::Transport { path: "/", source })?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        path: &'static str,
    ) -> Result<T, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|source| ClientError::Transport { path, source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { path, status, body });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| ClientError::Transport { path, source })?;
        serde_json::from_slice(&bytes).map_err(|err| ClientError::Decode {
            path,
            reason: err.to_string(),
        })
    }

    async fn message(&self, request: RequestBuilder, path: &'static str) -> Result<String, ClientError> {
        let response: MessageResponse = self.read_json(request, path).await?;
        Ok(response.message)
    }
}

impl TrackerApi for HttpApi {
    async fn start_timer(&self, project: &str) -> Result<String, ClientError> {
        let request = self
            .client
            .post(self.url(START_TIMER_PATH))
            .json(&StartTimerBody { project });
        self.message(request, START_TIMER_PATH).await
    }

    async fn stop_timer(&self) -> Result<String, ClientError> {
        let request = self.client.post(self.url(STOP_TIMER_PATH));
        self.message(request, STOP_TIMER_PATH).await
    }

    async fn add_entry(&self, entry: &NewEntry<'_>) -> Result<String, ClientError> {
        let request = self.client.post(self.url(ADD_ENTRY_PATH)).json(entry);
        self.message(request, ADD_ENTRY_PATH).await
    }

    async fn timeline(&self) -> Result<Vec<TimelineEntry>, ClientError> {
        let request = self.client.get(self.url(TIMELINE_PATH));
        self.read_json(request, TIMELINE_PATH).await
    }

    async fn analytics(&self) -> Result<ProjectHours, ClientError> {
        let request = self.client.get(self.url(ANALYTICS_PATH));
        let totals: Map<String, Value> = self.read_json(request, ANALYTICS_PATH).await?;
        project_hours(totals)
    }
}

fn project_hours(totals: Map<String, Value>) -> Result<ProjectHours, ClientError> {
    totals
        .into_iter()
        .map(|(project, hours)| match hours.as_f64() {
            Some(hours) => Ok((project, hours)),
            None => Err(ClientError::Decode {
                path: ANALYTICS_PATH,
                reason: format!("hours for `{project}` is not a number"),
            }),
        })
        .collect()
}
