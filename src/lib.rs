pub mod analytics;
pub mod app;
pub mod client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod storage;
pub mod timestamps;
pub mod ui;

pub use app::router;
pub use config::ServerConfig;
pub use state::AppState;
pub use storage::load_data;
