pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::pipeline::handlers;
use crate::state::AppState;

/// Uploads are whole resume batches; the axum default body limit (2 MB) is
/// too small for them.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/jobs", get(handlers::handle_list_jobs))
        .route("/api/v1/extract-text", post(handlers::handle_extract_text))
        .route("/api/v1/runs", post(handlers::handle_create_run))
        .route("/api/v1/runs/:id", get(handlers::handle_run_status))
        .route("/api/v1/runs/:id/stop", post(handlers::handle_stop_run))
        .route(
            "/api/v1/runs/:id/archive",
            get(handlers::handle_download_archive),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
