// All LLM prompt text for the resume analysis flow.

use crate::analysis::AnalysisRequest;

/// System prompt for resume analysis.
pub const RESUME_ANALYSIS_SYSTEM: &str = "You are a professional resume analyzer with years of \
    experience providing feedback on resumes.";

/// Role phrase used when the applicant left the job role blank.
pub const GENERIC_ROLE: &str = "general job applications";

const RESUME_ANALYSIS_INTRO: &str = "You are an AI assistant that analyzes resumes and provide \
    honest feedback on how well they match a given job role.";

const RESUME_ANALYSIS_CLOSING: &str = "Provide your analysis in a clear, structured format with \
    specific recommendations for improvement.";

/// Builds the user prompt: six evaluation criteria with the role in the last one, the job
/// description when one was given, then the resume text exactly as extracted.
///
/// No escaping or truncation: an arbitrarily long resume is sent unmodified.
pub fn build_resume_prompt(request: &AnalysisRequest) -> String {
    let role = non_blank(request.job_role.as_deref())
        .map(str::trim)
        .unwrap_or(GENERIC_ROLE);

    let mut prompt = format!(
        "{RESUME_ANALYSIS_INTRO}\n\
         Focus on the following aspects:\n\
         1. Content clarity and impact\n\
         2. Skills presentation and relevance to the provided job role and job description\n\
         3. Overall structure and formatting\n\
         4. Any missing elements that could enhance the resume\n\
         5. Experience description based on the job role and description\n\
         6. Specific improvement for {role}\n\n"
    );

    if let Some(description) = non_blank(request.job_description.as_deref()) {
        prompt.push_str("Job description:\n");
        prompt.push_str(description);
        prompt.push_str("\n\n");
    }

    prompt.push_str("Resume content:\n");
    prompt.push_str(&request.resume_text);
    prompt.push_str("\n\n");
    prompt.push_str(RESUME_ANALYSIS_CLOSING);
    prompt
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(role: Option<&str>, description: Option<&str>, text: &str) -> AnalysisRequest {
        AnalysisRequest {
            job_role: role.map(String::from),
            job_description: description.map(String::from),
            resume_text: text.to_string(),
        }
    }

    #[test]
    fn test_prompt_contains_role_and_verbatim_resume() {
        let resume = "Jane Doe\nSenior Engineer at Acme (2019-2024)\n  - Built {things} & 100% \"stuff\"";
        let prompt = build_resume_prompt(&request(Some("Software Engineer"), None, resume));
        assert!(prompt.contains("Software Engineer"));
        assert!(prompt.contains(resume));
        assert!(prompt.contains("6. Specific improvement for Software Engineer"));
    }

    #[test]
    fn test_missing_role_falls_back_to_generic_phrase() {
        let prompt = build_resume_prompt(&request(None, None, "resume"));
        assert!(prompt.contains("Specific improvement for general job applications"));
    }

    #[test]
    fn test_blank_role_falls_back_to_generic_phrase() {
        let prompt = build_resume_prompt(&request(Some("   "), None, "resume"));
        assert!(prompt.contains("Specific improvement for general job applications"));
    }

    #[test]
    fn test_prompt_lists_six_criteria_in_order() {
        let prompt = build_resume_prompt(&request(Some("Data Scientist"), None, "resume"));
        let positions: Vec<usize> = (1..=6)
            .map(|n| prompt.find(&format!("\n{n}. ")).expect("criterion present"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_description_section_included_when_given() {
        let prompt = build_resume_prompt(&request(
            Some("SRE"),
            Some("Own the on-call rotation for Kubernetes clusters."),
            "resume body",
        ));
        let description_at = prompt.find("Job description:\nOwn the on-call rotation").unwrap();
        let resume_at = prompt.find("Resume content:\nresume body").unwrap();
        assert!(description_at < resume_at);
    }

    #[test]
    fn test_description_section_omitted_when_blank() {
        let prompt = build_resume_prompt(&request(Some("SRE"), Some("  \n"), "resume body"));
        assert!(!prompt.contains("Job description:"));
    }

    #[test]
    fn test_long_resume_is_not_truncated() {
        let resume = "x".repeat(200_000);
        let prompt = build_resume_prompt(&request(None, None, &resume));
        assert!(prompt.contains(&resume));
        assert!(prompt.ends_with(RESUME_ANALYSIS_CLOSING));
    }
}
