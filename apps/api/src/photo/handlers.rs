//! Axum route handlers for the photo rating flow.

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::form::read_form;
use crate::photo::{rate_photo, resolve_image_mime, PhotoRating, PhotoUpload};
use crate::state::AppState;

/// POST /api/v1/photo/rate
///
/// Multipart field: `photo` (JPG, PNG or WebP). Returns the feedback and the image as a
/// data URI for preview.
pub async fn handle_rate_photo(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<PhotoRating>, AppError> {
    let mut form = read_form(multipart).await?;

    let file = form
        .take_file("photo")
        .ok_or_else(|| AppError::Validation("a photo file is required".to_string()))?;

    let mime = resolve_image_mime(file.content_type.as_deref(), file.filename.as_deref())?;
    info!("Photo upload received: type={}, bytes={}", mime, file.bytes.len());

    let rating = rate_photo(
        state.llm.as_deref(),
        PhotoUpload {
            bytes: file.bytes,
            mime,
        },
    )
    .await?;

    Ok(Json(rating))
}
