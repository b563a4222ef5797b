//! Profile photo rating: the image goes to the model inline as a base64 data URI,
//! next to a fixed rubric. No text extraction is involved.
//!
//! Only the declared MIME type is checked. The bytes themselves are never decoded,
//! so a mislabelled file is forwarded as-is and the provider decides what to do with it.

pub mod handlers;
pub mod prompts;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::form::{guess_mime, mime_essence};
use crate::llm_client::{ChatCompletion, ChatMessage, ChatRequest, ContentPart, ImageUrl};
use crate::photo::prompts::{PHOTO_RATING_RUBRIC, PHOTO_RATING_SYSTEM};

const PHOTO_TEMPERATURE: f32 = 0.4;
const PHOTO_MAX_TOKENS: u32 = 600;

/// Used when the browser declared no type for the upload.
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Image types the form accepts.
pub const ACCEPTED_IMAGE_MIMES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// A photo received from the form. Lives for one request.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub bytes: Bytes,
    pub mime: String,
}

/// Model feedback plus the uploaded image, so the page can show them side by side.
#[derive(Debug, Serialize)]
pub struct PhotoRating {
    pub feedback: String,
    pub image: String,
}

/// Picks the MIME type for an upload: the declared type when present, else one inferred
/// from the filename extension, else `image/jpeg`. Non-image types are rejected.
pub fn resolve_image_mime(declared: Option<&str>, filename: Option<&str>) -> Result<String, AppError> {
    let declared = declared
        .map(mime_essence)
        .filter(|m| !m.is_empty() && m != "application/octet-stream");

    let mime = declared
        .or_else(|| filename.and_then(guess_mime))
        .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string());

    if ACCEPTED_IMAGE_MIMES.contains(&mime.as_str()) {
        Ok(mime)
    } else {
        Err(AppError::Validation(format!(
            "unsupported photo type '{mime}', expected JPG, PNG or WebP"
        )))
    }
}

/// `data:{mime};base64,{payload}` with the standard padded alphabet.
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Builds the multimodal chat request: rubric text plus the inline image.
pub fn build_photo_request(image_data_uri: &str) -> ChatRequest {
    ChatRequest::new(
        vec![
            ChatMessage::system(PHOTO_RATING_SYSTEM),
            ChatMessage::user_parts(vec![
                ContentPart::Text {
                    text: PHOTO_RATING_RUBRIC.to_string(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: image_data_uri.to_string(),
                    },
                },
            ]),
        ],
        PHOTO_TEMPERATURE,
        PHOTO_MAX_TOKENS,
    )
}

/// Runs the photo flow. A missing client is rejected before anything is encoded.
pub async fn rate_photo(
    llm: Option<&dyn ChatCompletion>,
    photo: PhotoUpload,
) -> Result<PhotoRating, AppError> {
    if photo.bytes.is_empty() {
        return Err(AppError::Validation("photo upload is empty".to_string()));
    }

    let llm = llm.ok_or(AppError::MissingApiKey)?;

    let image = encode_data_uri(&photo.mime, &photo.bytes);
    debug!("Encoded {} photo as {} char data URI", photo.mime, image.len());

    let feedback = llm
        .complete(&build_photo_request(&image))
        .await
        .map_err(|e| AppError::Llm(format!("Error rating photo: {e}")))?;

    info!("Photo rating completed ({} chars)", feedback.len());
    Ok(PhotoRating { feedback, image })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::RecordingCompletion;
    use crate::llm_client::{MessageContent, Role};

    fn photo(bytes: &'static [u8], mime: &str) -> PhotoUpload {
        PhotoUpload {
            bytes: Bytes::from_static(bytes),
            mime: mime.to_string(),
        }
    }

    #[test]
    fn test_encode_data_uri_uses_padded_standard_base64() {
        assert_eq!(encode_data_uri("image/png", b"ab"), "data:image/png;base64,YWI=");
        assert_eq!(
            encode_data_uri("image/jpeg", &[0xff, 0xd8, 0xff]),
            "data:image/jpeg;base64,/9j/"
        );
    }

    #[test]
    fn test_resolve_image_mime_defaults_to_jpeg() {
        assert_eq!(resolve_image_mime(None, None).unwrap(), "image/jpeg");
    }

    #[test]
    fn test_resolve_image_mime_keeps_declared_type() {
        assert_eq!(
            resolve_image_mime(Some("image/WebP"), Some("me.jpg")).unwrap(),
            "image/webp"
        );
    }

    #[test]
    fn test_resolve_image_mime_infers_from_extension() {
        assert_eq!(
            resolve_image_mime(Some("application/octet-stream"), Some("headshot.PNG")).unwrap(),
            "image/png"
        );
        assert_eq!(
            resolve_image_mime(None, Some("headshot.webp")).unwrap(),
            "image/webp"
        );
    }

    #[test]
    fn test_resolve_image_mime_rejects_non_images() {
        let err = resolve_image_mime(Some("application/pdf"), Some("resume.pdf")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_photo_request_carries_rubric_and_image() {
        let request = build_photo_request("data:image/png;base64,YWI=");
        assert_eq!(request.max_tokens, 600);
        assert!((request.temperature - 0.4).abs() < f32::EPSILON);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);

        let value = serde_json::to_value(&request.messages[1]).unwrap();
        assert_eq!(value["role"], "user");
        assert_eq!(value["content"][0]["type"], "text");
        assert_eq!(value["content"][0]["text"], PHOTO_RATING_RUBRIC);
        assert_eq!(value["content"][1]["type"], "image_url");
        assert_eq!(
            value["content"][1]["image_url"]["url"],
            "data:image/png;base64,YWI="
        );
    }

    #[tokio::test]
    async fn test_rate_photo_returns_feedback_and_preview() {
        let llm = RecordingCompletion::replying("- Good lighting\nScore: 8/10");
        let rating = rate_photo(Some(&llm), photo(b"ab", "image/png"))
            .await
            .unwrap();
        assert_eq!(rating.feedback, "- Good lighting\nScore: 8/10");
        assert_eq!(rating.image, "data:image/png;base64,YWI=");

        let requests = llm.requests();
        assert_eq!(requests.len(), 1);
        match &requests[0].messages[1].content {
            MessageContent::Parts(parts) => assert_eq!(parts.len(), 2),
            other => panic!("expected multimodal content, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rate_photo_without_client_is_missing_key() {
        let err = rate_photo(None, photo(b"ab", "image/png")).await.unwrap_err();
        assert!(matches!(err, AppError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_rate_photo_rejects_empty_upload() {
        let llm = RecordingCompletion::replying("unused");
        let err = rate_photo(Some(&llm), photo(b"", "image/png"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(llm.requests().is_empty());
    }

    #[tokio::test]
    async fn test_rate_photo_failure_is_prefixed() {
        let llm = RecordingCompletion::failing("image too large");
        let err = rate_photo(Some(&llm), photo(b"ab", "image/png"))
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Error rating photo:"));
        assert!(message.contains("image too large"));
    }
}
