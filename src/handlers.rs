use crate::analytics::{build_analytics, to_json_map};
use crate::client::views::{render_analytics, render_timeline};
use crate::errors::AppError;
use crate::models::{
    AddEntryRequest, HealthResponse, MessageResponse, StartTimerRequest, TimelineEntry,
    TrackerData,
};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::timestamps::now_stamp;
use crate::ui::render_index;
use axum::{Json, extract::State, http::StatusCode, response::Html};
use chrono::Local;
use serde_json::{Map, Value};
use tracing::info;

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let data = state.data.lock().await;
    let now = Local::now().naive_local();
    let timeline = render_timeline(&timeline_rows(&data), now);
    let totals: Vec<(String, f64)> = build_analytics(&data)
        .into_iter()
        .map(|total| (total.project, total.hours))
        .collect();
    let analytics = render_analytics(&totals);
    Html(render_index(&timeline, &analytics))
}

pub async fn start_timer(
    State(state): State<AppState>,
    Json(payload): Json<StartTimerRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let project = payload.project.trim();
    if project.is_empty() {
        return Err(AppError::bad_request("project is required"));
    }

    let now = now_stamp();
    let mut data = state.data.lock().await;
    let mut next = data.clone();
    let project_id = next.ensure_project(project);
    let closed = next.close_open_entries(&now);
    next.push_entry(project_id, now, None);
    persist_data(&state.data_path, &next).await?;
    *data = next;

    info!(project, closed, "timer started");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Timer started".into(),
            project_id: Some(project_id),
        }),
    ))
}

pub async fn stop_timer(State(state): State<AppState>) -> Result<Json<MessageResponse>, AppError> {
    let now = now_stamp();
    let mut data = state.data.lock().await;
    let mut next = data.clone();
    let closed = next.close_open_entries(&now);
    persist_data(&state.data_path, &next).await?;
    *data = next;

    info!(closed, "timer stopped");
    Ok(Json(MessageResponse::new("Timer stopped")))
}

pub async fn add_entry(
    State(state): State<AppState>,
    Json(payload): Json<AddEntryRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let project = payload.project.trim();
    let start_time = payload.start_time.trim();
    let end_time = payload.end_time.trim();
    if project.is_empty() || start_time.is_empty() || end_time.is_empty() {
        return Err(AppError::bad_request(
            "project, start_time and end_time are required",
        ));
    }

    let mut data = state.data.lock().await;
    let mut next = data.clone();
    let project_id = next.ensure_project(project);
    next.push_entry(project_id, start_time.to_string(), Some(end_time.to_string()));
    persist_data(&state.data_path, &next).await?;
    *data = next;

    info!(project, start_time, end_time, "entry added");
    Ok((StatusCode::CREATED, Json(MessageResponse::new("Entry added"))))
}

pub async fn get_timeline(State(state): State<AppState>) -> Json<Vec<TimelineEntry>> {
    let data = state.data.lock().await;
    Json(timeline_rows(&data))
}

pub async fn get_analytics(State(state): State<AppState>) -> Json<Map<String, Value>> {
    let data = state.data.lock().await;
    Json(to_json_map(&build_analytics(&data)))
}

/// All entries joined with their project names, ordered by start time.
fn timeline_rows(data: &TrackerData) -> Vec<TimelineEntry> {
    let mut rows: Vec<TimelineEntry> = data
        .entries
        .iter()
        .filter_map(|entry| {
            let project_name = data.project_name(entry.project_id)?;
            Some(TimelineEntry {
                id: Some(entry.id),
                project_name: project_name.to_string(),
                start_time: entry.start_time.clone(),
                end_time: entry.end_time.clone(),
            })
        })
        .collect();
    rows.sort_by(|a, b| a.start_time.cmp(&b.start_time));
    rows
}
