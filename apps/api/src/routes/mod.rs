pub mod health;
pub mod index;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::photo::handlers as photo;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(index::index_handler))
        .route("/health", get(health::health_handler))
        .route("/api/v1/resume/analyze", post(analysis::handle_analyze))
        .route("/api/v1/photo/rate", post(photo::handle_rate_photo))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
