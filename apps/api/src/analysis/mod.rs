//! Resume analysis: extract text from the upload, build the prompt, ask the model.
//! All LLM calls go through llm_client. No direct HTTP calls here.

pub mod handlers;
pub mod prompts;

use tracing::{debug, info};

use crate::analysis::prompts::{build_resume_prompt, RESUME_ANALYSIS_SYSTEM};
use crate::errors::AppError;
use crate::extraction::{extract_text, UploadedDocument};
use crate::llm_client::{ChatCompletion, ChatMessage, ChatRequest};

const ANALYSIS_TEMPERATURE: f32 = 0.7;
const ANALYSIS_MAX_TOKENS: u32 = 1000;

/// Everything the prompt is built from. Exists only for the duration of one request.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub job_role: Option<String>,
    pub job_description: Option<String>,
    pub resume_text: String,
}

/// A resume upload plus the free-text fields submitted with it.
#[derive(Debug)]
pub struct ResumeSubmission {
    pub document: UploadedDocument,
    pub job_role: Option<String>,
    pub job_description: Option<String>,
}

/// Builds the chat request for a resume analysis.
pub fn build_analysis_request(request: &AnalysisRequest) -> ChatRequest {
    let prompt = build_resume_prompt(request);
    debug!("Built resume analysis prompt ({} chars)", prompt.len());

    ChatRequest::new(
        vec![
            ChatMessage::system(RESUME_ANALYSIS_SYSTEM),
            ChatMessage::user_text(prompt),
        ],
        ANALYSIS_TEMPERATURE,
        ANALYSIS_MAX_TOKENS,
    )
}

/// Runs the full resume flow and returns the model's analysis text.
///
/// Rejects whitespace-only extractions before looking at the client, and rejects a
/// missing client before any request is built.
pub async fn analyze_resume(
    llm: Option<&dyn ChatCompletion>,
    submission: ResumeSubmission,
) -> Result<String, AppError> {
    let resume_text = extract_text(submission.document)
        .await
        .map_err(|e| AppError::Extraction(processing_error(e)))?;

    if resume_text.trim().is_empty() {
        return Err(AppError::NoContent);
    }

    let llm = llm.ok_or(AppError::MissingApiKey)?;

    let request = build_analysis_request(&AnalysisRequest {
        job_role: submission.job_role,
        job_description: submission.job_description,
        resume_text,
    });

    let analysis = llm
        .complete(&request)
        .await
        .map_err(|e| AppError::Llm(processing_error(e)))?;

    info!("Resume analysis completed ({} chars)", analysis.len());
    Ok(analysis)
}

fn processing_error(e: impl std::fmt::Display) -> String {
    format!("An error occurred while processing the file: {e}")
}
