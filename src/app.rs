use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/api/start_timer", post(handlers::start_timer))
        .route("/api/stop_timer", post(handlers::stop_timer))
        .route("/api/add_entry", post(handlers::add_entry))
        .route("/api/timeline", get(handlers::get_timeline))
        .route("/api/analytics", get(handlers::get_analytics))
        .with_state(state)
}
