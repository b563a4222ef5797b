use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Extraction produced nothing but whitespace. Raised before any API call.
    #[error("file does not have any content")]
    NoContent,

    /// No API key was configured at startup. Raised before any request is built.
    #[error("OpenAI API key missing.")]
    MissingApiKey,

    /// The uploaded file could not be read. Carries the user-facing message.
    #[error("{0}")]
    Extraction(String),

    /// The completion call failed. Carries the user-facing message.
    #[error("{0}")]
    Llm(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Validation(msg) => {
                tracing::warn!("Rejected form submission: {msg}");
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
            }
            AppError::NoContent => (StatusCode::UNPROCESSABLE_ENTITY, "NO_CONTENT"),
            AppError::MissingApiKey => {
                tracing::warn!("Request rejected: no API key configured");
                (StatusCode::SERVICE_UNAVAILABLE, "MISSING_API_KEY")
            }
            AppError::Extraction(msg) => {
                tracing::warn!("Extraction error: {msg}");
                (StatusCode::UNPROCESSABLE_ENTITY, "EXTRACTION_ERROR")
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (StatusCode::BAD_GATEWAY, "LLM_ERROR")
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string()
            }
        }));

        (status, body).into_response()
    }
}
