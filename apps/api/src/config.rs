use std::fmt;

use anyhow::{Context, Result};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Application configuration loaded from environment variables.
/// Only malformed values fail startup; a missing API key is reported per request.
#[derive(Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub llm_timeout_secs: u64,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let openai_api_key = match var("OPENAI_API_KEY") {
            Some(key) => Some(key.trim().to_string()),
            None => match var("OPENAI_API_KEY_FILE") {
                Some(path) => read_secret_file(&path)?,
                None => None,
            },
        };

        let max_upload_mb = var("MAX_UPLOAD_MB")
            .unwrap_or_else(|| "20".to_string())
            .parse::<usize>()
            .context("MAX_UPLOAD_MB must be a whole number of megabytes")?;
        let max_upload_bytes = max_upload_mb
            .checked_mul(1024 * 1024)
            .context("MAX_UPLOAD_MB is too large")?;

        Ok(Config {
            openai_api_key,
            openai_base_url: var("OPENAI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            llm_timeout_secs: var("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|| "120".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a number of seconds")?,
            max_upload_bytes,
            port: var("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("openai_base_url", &self.openai_base_url)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}

/// Reads an API key from a mounted secrets file. An empty file counts as no key.
fn read_secret_file(path: &str) -> Result<Option<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read API key file '{path}'"))?;
    let key = contents.trim();
    Ok((!key.is_empty()).then(|| key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_any_variables() {
        let config = config_from(&[]).unwrap();
        assert!(config.openai_api_key.is_none());
        assert_eq!(config.openai_base_url, "https://api.openai.com/v1");
        assert_eq!(config.llm_timeout_secs, 120);
        assert_eq!(config.max_upload_bytes, 20 * 1024 * 1024);
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let config = config_from(&[("OPENAI_API_KEY", "   ")]).unwrap();
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn test_api_key_from_environment_is_trimmed() {
        let config = config_from(&[("OPENAI_API_KEY", " sk-test \n")]).unwrap();
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_api_key_falls_back_to_secret_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sk-from-file").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = config_from(&[("OPENAI_API_KEY_FILE", &path)]).unwrap();
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-from-file"));
    }

    #[test]
    fn test_environment_key_wins_over_secret_file() {
        let config = config_from(&[
            ("OPENAI_API_KEY", "sk-env"),
            ("OPENAI_API_KEY_FILE", "/does/not/exist"),
        ])
        .unwrap();
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-env"));
    }

    #[test]
    fn test_unreadable_secret_file_is_an_error() {
        assert!(config_from(&[("OPENAI_API_KEY_FILE", "/does/not/exist")]).is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_is_stripped() {
        let config = config_from(&[("OPENAI_BASE_URL", "http://localhost:9000/v1/")]).unwrap();
        assert_eq!(config.openai_base_url, "http://localhost:9000/v1");
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        assert!(config_from(&[("PORT", "not-a-port")]).is_err());
    }

    #[test]
    fn test_oversized_upload_limit_is_an_error() {
        let err = config_from(&[("MAX_UPLOAD_MB", &usize::MAX.to_string())]).unwrap_err();
        assert!(err.to_string().contains("MAX_UPLOAD_MB is too large"));
    }

    #[test]
    fn test_debug_output_redacts_api_key() {
        let config = config_from(&[("OPENAI_API_KEY", "sk-secret")]).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
