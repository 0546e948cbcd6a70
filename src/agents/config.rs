use crate::error::AnalyzerError;
use anyhow::Result;
use std::fmt;
use std::time::Duration;

// -----------------------------------------------
// CHAT BACKEND DEFAULTS
// -----------------------------------------------
pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Deterministic sampling.
pub const TEMPERATURE: f32 = 0.0;

/// Agent replies per conversation: one analysis, one review.
pub const MAX_TURNS: usize = 2;

pub const LLM_TIMEOUT: Duration = Duration::from_secs(120);

/// Everything the conversation driver needs to reach the chat backend.
#[derive(Clone)]
pub struct LlmConfig {
    pub model: String,
    pub api_key: String,
    pub base_url: String,
    pub temperature: f32,
    pub response_cache: bool,
    pub max_turns: usize,
    pub timeout: Duration,
}

impl LlmConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: TEMPERATURE,
            response_cache: false,
            max_turns: MAX_TURNS,
            timeout: LLM_TIMEOUT,
        }
    }

    /// Read the credential (and optional overrides) from the environment.
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(AnalyzerError::MissingCredential(API_KEY_ENV))?;

        let mut config = Self::new(api_key);
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            config.model = model;
        }
        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        config.response_cache = std::env::var("OPENAI_CACHE")
            .map(|v| v == "true")
            .unwrap_or(false);

        Ok(config)
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("response_cache", &self.response_cache)
            .field("max_turns", &self.max_turns)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LlmConfig::new("sk-test");
        assert_eq!(config.model, "gpt-4");
        assert_eq!(config.temperature, 0.0);
        assert!(!config.response_cache);
        assert_eq!(config.max_turns, 2);
        assert_eq!(config.completions_url(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn test_debug_hides_key() {
        let printed = format!("{:?}", LlmConfig::new("sk-secret-value"));
        assert!(!printed.contains("sk-secret-value"));
        assert!(printed.contains("<redacted>"));
    }
}
