use std::{env, str::FromStr, time::Duration};

use secrecy::SecretString;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

const DEFAULT_PREFERRED_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_FALLBACK_MODEL: &str = "gemini-pro";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;
const MAX_REQUEST_TIMEOUT_SECS: u64 = 120;
const DEFAULT_SESSION_IDLE_TIMEOUT_MINUTES: i64 = 120;
const MAX_SESSION_IDLE_TIMEOUT_MINUTES: i64 = 7 * 24 * 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LlmProvider {
    Gemini,
    OpenAi,
}

impl FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(LlmProvider::Gemini),
            "openai" | "openai-compatible" => Ok(LlmProvider::OpenAi),
            other => Err(format!("unknown LLM provider '{}'", other)),
        }
    }
}

impl LlmProvider {
    pub fn default_api_base(&self) -> &'static str {
        match self {
            LlmProvider::Gemini => GEMINI_API_BASE,
            LlmProvider::OpenAi => OPENAI_API_BASE,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: Option<SecretString>,
    pub llm_provider: LlmProvider,
    pub llm_api_base: String,
    pub preferred_model: String,
    pub fallback_model: String,
    pub request_timeout: Duration,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origin: Option<String>,
    pub session_idle_timeout_minutes: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let llm_provider = match var("LLM_PROVIDER").map(|p| p.parse::<LlmProvider>()) {
            Some(Ok(provider)) => provider,
            Some(Err(err)) => {
                log::warn!("{}; falling back to gemini", err);
                LlmProvider::Gemini
            }
            None => LlmProvider::Gemini,
        };

        let request_timeout_secs = var("LLM_REQUEST_TIMEOUT_SECS")
            .and_then(|t| t.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
            .clamp(1, MAX_REQUEST_TIMEOUT_SECS);

        Self {
            api_key: var("LLM_API_KEY")
                .or_else(|| var("GOOGLE_API_KEY"))
                .map(SecretString::from),
            llm_provider,
            llm_api_base: var("LLM_API_BASE")
                .unwrap_or_else(|| llm_provider.default_api_base().to_string()),
            preferred_model: var("LLM_PREFERRED_MODEL")
                .unwrap_or_else(|| DEFAULT_PREFERRED_MODEL.to_string()),
            fallback_model: var("LLM_FALLBACK_MODEL")
                .unwrap_or_else(|| DEFAULT_FALLBACK_MODEL.to_string()),
            request_timeout: Duration::from_secs(request_timeout_secs),
            web_server_host: var("WEB_SERVER_HOST").unwrap_or_else(|| "localhost".to_string()),
            web_server_port: var("WEB_SERVER_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            cors_allowed_origin: var("CORS_ALLOWED_ORIGIN"),
            session_idle_timeout_minutes: var("SESSION_IDLE_TIMEOUT_MINUTES")
                .and_then(|m| m.parse::<i64>().ok())
                .filter(|m| *m > 0)
                .unwrap_or(DEFAULT_SESSION_IDLE_TIMEOUT_MINUTES)
                .min(MAX_SESSION_IDLE_TIMEOUT_MINUTES),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            api_key: Some(SecretString::from("test-api-key".to_string())),
            llm_provider: LlmProvider::Gemini,
            llm_api_base: "http://127.0.0.1:9".to_string(),
            preferred_model: DEFAULT_PREFERRED_MODEL.to_string(),
            fallback_model: DEFAULT_FALLBACK_MODEL.to_string(),
            request_timeout: Duration::from_secs(1),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            cors_allowed_origin: None,
            session_idle_timeout_minutes: DEFAULT_SESSION_IDLE_TIMEOUT_MINUTES,
        }
    }
}
