//! Text extraction — turns an uploaded resume (PDF or plain text) into a single string.
//!
//! Extraction never decides whether the result is usable. An unsupported kind yields an
//! empty string and the caller's empty-content check rejects the request.

use std::fmt;

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

use crate::form::{guess_mime, mime_essence};

const OCTET_STREAM: &str = "application/octet-stream";

/// Declared kind of an uploaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
    /// Anything else, keyed by the lowercase MIME essence the client declared.
    Other(String),
}

impl DocumentKind {
    /// Maps a declared MIME type to a kind. Parameters (`; charset=...`) are ignored.
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime_essence(mime);

        match essence.as_str() {
            "application/pdf" => Self::Pdf,
            "text/plain" => Self::PlainText,
            _ => Self::Other(essence),
        }
    }

    /// Resolves the kind of an upload from its declared MIME type, falling back to the
    /// filename extension when the client sent no type or the generic octet-stream.
    pub fn resolve(mime: Option<&str>, filename: Option<&str>) -> Self {
        match mime.map(Self::from_mime) {
            Some(kind) if !kind.is_unspecified() => kind,
            declared => filename
                .and_then(Self::from_extension)
                .or(declared)
                .unwrap_or_else(|| Self::Other(String::new())),
        }
    }

    /// Only a guess that lands on a supported kind counts.
    fn from_extension(filename: &str) -> Option<Self> {
        guess_mime(filename)
            .map(|guessed| Self::from_mime(&guessed))
            .filter(|kind| !matches!(kind, Self::Other(_)))
    }

    fn is_unspecified(&self) -> bool {
        matches!(self, Self::Other(essence) if essence.is_empty() || essence == OCTET_STREAM)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => f.write_str("pdf"),
            Self::PlainText => f.write_str("plain-text"),
            Self::Other(essence) if essence.is_empty() => f.write_str("unknown"),
            Self::Other(essence) => f.write_str(essence),
        }
    }
}

/// A file received from the form. Lives for one request.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub bytes: Bytes,
    pub kind: DocumentKind,
    pub filename: Option<String>,
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("could not read PDF: {0}")]
    Pdf(String),

    #[error("PDF parser aborted: {0}")]
    Aborted(String),
}

/// Extracts plain text from an uploaded document according to its declared kind.
pub async fn extract_text(document: UploadedDocument) -> Result<String, ExtractionError> {
    match document.kind {
        DocumentKind::Pdf => {
            let bytes = document.bytes;
            // Parsing is CPU-bound and the parser may panic on malformed input.
            tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
                .await
                .map_err(|e| ExtractionError::Aborted(e.to_string()))?
        }
        DocumentKind::PlainText => Ok(decode_plain_text(&document.bytes)),
        DocumentKind::Other(_) => {
            warn!(
                "Unsupported document kind '{}' ({}), extracting nothing",
                document.kind,
                document.filename.as_deref().unwrap_or("unnamed upload")
            );
            Ok(String::new())
        }
    }
}

/// Extracts each page in order and joins the page texts with newlines.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    debug!("Extracted text from {} PDF page(s)", pages.len());

    Ok(join_pages(pages))
}

/// Joins per-page text with `\n`. A page that produced no text is an empty segment.
pub fn join_pages<I>(pages: I) -> String
where
    I: IntoIterator<Item = String>,
{
    pages.into_iter().collect::<Vec<_>>().join("\n")
}

/// Decodes bytes as UTF-8, silently dropping invalid sequences.
pub fn decode_plain_text(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}
