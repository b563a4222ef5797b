//! Axum route handlers for the resume analysis flow.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::analysis::{analyze_resume, ResumeSubmission};
use crate::errors::AppError;
use crate::extraction::{DocumentKind, UploadedDocument};
use crate::form::read_form;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis: String,
}

/// POST /api/v1/resume/analyze
///
/// Multipart fields: `resume` (PDF or TXT file), `job_role`, `job_description`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let mut form = read_form(multipart).await?;

    let file = form
        .take_file("resume")
        .ok_or_else(|| AppError::Validation("a resume file is required".to_string()))?;

    let kind = DocumentKind::resolve(file.content_type.as_deref(), file.filename.as_deref());
    info!(
        "Resume upload received: kind={}, bytes={}",
        kind,
        file.bytes.len()
    );

    let submission = ResumeSubmission {
        document: UploadedDocument {
            bytes: file.bytes,
            kind,
            filename: file.filename,
        },
        job_role: form.text("job_role"),
        job_description: form.text("job_description"),
    };

    let analysis = analyze_resume(state.llm.as_deref(), submission).await?;

    Ok(Json(AnalysisResponse { analysis }))
}
