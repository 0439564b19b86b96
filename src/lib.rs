use axum::{extract::DefaultBodyLimit, Router};
use parking_lot::RwLock;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;

/// Shared application state: configuration plus the single in-memory
/// dataset that each upload replaces.
pub struct AppState {
    pub config: config::Config,
    pub dataset: RwLock<Option<models::Dataset>>,
}

impl AppState {
    pub fn new(config: config::Config) -> Self {
        Self {
            config,
            dataset: RwLock::new(None),
        }
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    // Leave room for multipart framing on top of the file itself.
    let body_limit = state.config.max_file_size + 1024;

    Router::new()
        .merge(routes::routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
