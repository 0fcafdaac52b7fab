//! Text-generation providers and model selection.

use std::time::Duration;

use async_openai::{config::OpenAIConfig, error::OpenAIError, Client as OpenAiClient};
use async_trait::async_trait;
use backoff::ExponentialBackoff;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::{Config, LlmProvider};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("quota or rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("provider returned an error: {0}")]
    Upstream(String),

    #[error("provider returned no usable text: {0}")]
    InvalidResponse(String),
}

/// Seam between the tutor and the hosted language model.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, api_key: &str, model: &str, prompt: &str)
        -> Result<String, GenerationError>;

    async fn is_model_available(&self, api_key: &str, model: &str)
        -> Result<bool, GenerationError>;
}

/// Outcome of a model probe. `settled` is false when the probe itself
/// failed, in which case the fallback is only good for the current call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSelection {
    pub model: String,
    pub settled: bool,
}

/// Picks `preferred` when the provider confirms it is available, otherwise
/// `fallback`. Probe failures never block the caller.
pub async fn select_model(
    generator: &dyn TextGenerator,
    api_key: &str,
    preferred: &str,
    fallback: &str,
) -> ModelSelection {
    match generator.is_model_available(api_key, preferred).await {
        Ok(true) => {
            log::info!("Using preferred model {}", preferred);
            ModelSelection {
                model: preferred.to_string(),
                settled: true,
            }
        }
        Ok(false) => {
            log::warn!("Model {} unavailable, falling back to {}", preferred, fallback);
            ModelSelection {
                model: fallback.to_string(),
                settled: true,
            }
        }
        Err(e) => {
            log::warn!(
                "Could not probe model {} ({}), using {} for this request",
                preferred,
                e,
                fallback
            );
            ModelSelection {
                model: fallback.to_string(),
                settled: false,
            }
        }
    }
}

pub fn generator_from_config(config: &Config) -> Result<Box<dyn TextGenerator>, GenerationError> {
    match config.llm_provider {
        LlmProvider::Gemini => Ok(Box::new(GeminiGenerator::new(
            &config.llm_api_base,
            config.request_timeout,
        )?)),
        LlmProvider::OpenAi => Ok(Box::new(OpenAiGenerator::new(
            &config.llm_api_base,
            config.request_timeout,
        ))),
    }
}

/// Google Generative Language REST API.
pub struct GeminiGenerator {
    http: reqwest::Client,
    api_base: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorEnvelope {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    message: String,
}

impl GeminiGenerator {
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/models/{}", self.api_base, model.trim_start_matches("models/"))
    }

    fn transport_error(&self, err: reqwest::Error) -> GenerationError {
        if err.is_timeout() {
            GenerationError::Timeout(self.timeout)
        } else {
            GenerationError::Network(err.to_string())
        }
    }
}

fn classify_status(status: StatusCode, body: &str) -> GenerationError {
    let message = serde_json::from_str::<GoogleErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| format!("HTTP {}", status));

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            GenerationError::Authentication(message)
        }
        StatusCode::TOO_MANY_REQUESTS => GenerationError::RateLimited(message),
        // Google reports a bad key as 400 INVALID_ARGUMENT.
        StatusCode::BAD_REQUEST if message.contains("API key") => {
            GenerationError::Authentication(message)
        }
        _ => GenerationError::Upstream(message),
    }
}

fn reply_text(response: GenerateContentResponse) -> Result<String, GenerationError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GenerationError::InvalidResponse(
            "reply contained no text".to_string(),
        ));
    }
    Ok(text)
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(
        &self,
        api_key: &str,
        model: &str,
        prompt: &str,
    ) -> Result<String, GenerationError> {
        let url = format!("{}:generateContent", self.model_url(model));
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &body));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        reply_text(parsed)
    }

    async fn is_model_available(&self, api_key: &str, model: &str) -> Result<bool, GenerationError> {
        let response = self
            .http
            .get(self.model_url(model))
            .header("x-goog-api-key", api_key)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(classify_status(status, &body))
            }
        }
    }
}

/// Any OpenAI-compatible chat completion endpoint.
pub struct OpenAiGenerator {
    api_base: String,
    timeout: Duration,
}

impl OpenAiGenerator {
    pub fn new(api_base: &str, timeout: Duration) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    fn client(&self, api_key: &str) -> OpenAiClient<OpenAIConfig> {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(&self.api_base);
        // One attempt per request; the client retries 5xx and 429 otherwise.
        let no_retry = ExponentialBackoff {
            max_elapsed_time: Some(Duration::ZERO),
            ..Default::default()
        };
        OpenAiClient::with_config(config).with_backoff(no_retry)
    }

    fn classify_error(&self, err: OpenAIError) -> GenerationError {
        match err {
            OpenAIError::ApiError(api) => {
                // Server errors arrive with the raw body as the message.
                let message = serde_json::from_str::<GoogleErrorEnvelope>(&api.message)
                    .map(|envelope| envelope.error.message)
                    .unwrap_or(api.message);
                match (api.r#type.as_deref(), api.code.as_deref()) {
                    (Some("authentication_error"), _)
                    | (Some("permission_error"), _)
                    | (_, Some("invalid_api_key")) => GenerationError::Authentication(message),
                    (Some("insufficient_quota"), _)
                    | (Some("rate_limit_error"), _)
                    | (_, Some("rate_limit_exceeded"))
                    | (_, Some("insufficient_quota")) => GenerationError::RateLimited(message),
                    _ => GenerationError::Upstream(message),
                }
            }
            OpenAIError::Reqwest(e) if e.is_timeout() => GenerationError::Timeout(self.timeout),
            OpenAIError::Reqwest(e) => GenerationError::Network(e.to_string()),
            OpenAIError::JSONDeserialize(e, _) => GenerationError::InvalidResponse(e.to_string()),
            other => GenerationError::Upstream(other.to_string()),
        }
    }
}

fn chat_reply_text(response: &Value) -> Result<String, GenerationError> {
    response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| GenerationError::InvalidResponse("reply contained no text".to_string()))
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(
        &self,
        api_key: &str,
        model: &str,
        prompt: &str,
    ) -> Result<String, GenerationError> {
        let client = self.client(api_key);
        let request = json!({
            "model": model,
            "messages": [{ "role": "user", "content": prompt }]
        });

        let response: Value = tokio::time::timeout(self.timeout, client.chat().create_byot(request))
            .await
            .map_err(|_| GenerationError::Timeout(self.timeout))?
            .map_err(|e| self.classify_error(e))?;

        chat_reply_text(&response)
    }

    async fn is_model_available(&self, _api_key: &str, _model: &str) -> Result<bool, GenerationError> {
        // OpenAI-compatible gateways disagree on model listing; trust the configuration.
        Ok(true)
    }
}
