use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ChatCompletion;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion client built once at startup. `None` when no API key is configured;
    /// both flows then reject with `AppError::MissingApiKey`.
    pub llm: Option<Arc<dyn ChatCompletion>>,
    pub config: Config,
}
