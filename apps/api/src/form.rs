//! Multipart form reading shared by the upload handlers.

use std::collections::HashMap;

use axum::extract::Multipart;
use bytes::Bytes;

use crate::errors::AppError;

/// One file part of a submitted form.
#[derive(Debug)]
pub struct FormFile {
    pub bytes: Bytes,
    pub content_type: Option<String>,
    pub filename: Option<String>,
}

/// All parts of a submitted form, split into files and text fields.
#[derive(Debug, Default)]
pub struct FormFields {
    files: HashMap<String, FormFile>,
    texts: HashMap<String, String>,
}

impl FormFields {
    pub fn take_file(&mut self, name: &str) -> Option<FormFile> {
        self.files.remove(name)
    }

    /// Text field value, or `None` when absent or blank.
    pub fn text(&mut self, name: &str) -> Option<String> {
        self.texts.remove(name).filter(|v| !v.trim().is_empty())
    }
}

/// Reads every part of a multipart body. A part is a file when it carries a filename.
/// A file input left empty by the browser (no name, no bytes) is skipped.
pub async fn read_form(mut multipart: Multipart) -> Result<FormFields, AppError> {
    let mut form = FormFields::default();

    while let Some(field) = multipart.next_field().await.map_err(invalid_form)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match field.file_name().map(str::to_string) {
            Some(filename) => {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(invalid_form)?;
                if filename.is_empty() && bytes.is_empty() {
                    continue;
                }
                form.files.insert(
                    name,
                    FormFile {
                        bytes,
                        content_type,
                        filename: (!filename.is_empty()).then_some(filename),
                    },
                );
            }
            None => {
                let value = field.text().await.map_err(invalid_form)?;
                form.texts.insert(name, value);
            }
        }
    }

    Ok(form)
}

/// Lowercase `type/subtype` of a declared content type, parameters dropped.
pub fn mime_essence(declared: &str) -> String {
    let declared = declared.trim();
    match declared.parse::<mime::Mime>() {
        Ok(parsed) => parsed.essence_str().to_ascii_lowercase(),
        Err(_) => declared.to_ascii_lowercase(),
    }
}

/// Content type guessed from a filename's extension.
pub fn guess_mime(filename: &str) -> Option<String> {
    mime_guess::from_path(filename)
        .first()
        .map(|guessed| guessed.essence_str().to_string())
}

fn invalid_form(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(format!("could not read form data: {}", e.body_text()))
}
