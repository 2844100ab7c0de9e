pub mod categorizer;
pub mod summarizer;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use categorizer::Categorizer;
pub use summarizer::Summarizer;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-pro";

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("api error: {0}")]
    Api(String),
    #[error("model returned an empty response")]
    EmptyResponse,
    #[error("invalid llm config: {0}")]
    Config(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// Read the AI-service configuration from the process environment.
    /// `API_KEY` carries the key; model and endpoint have Gemini defaults.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("API_KEY").unwrap_or_default(),
            model: std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            base_url: std::env::var("LLM_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout_secs: 30,
        }
    }
}

pub fn validate_config(config: &LlmConfig) -> Result<(), LlmError> {
    if config.api_key.trim().is_empty() {
        return Err(LlmError::Config("api_key is empty".to_string()));
    }
    if config.model.trim().is_empty() {
        return Err(LlmError::Config("model is empty".to_string()));
    }
    if config.base_url.trim().is_empty() {
        return Err(LlmError::Config("base_url is empty".to_string()));
    }
    Ok(())
}

/// Fixed-count retry policy for AI calls. Injected into each calling
/// component so tests can shrink it to a single attempt.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }
}

/// A text-in, text-out generative model. The production implementation talks
/// to the Gemini API; tests substitute fakes.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiApiError>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiResponseContent,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    parts: Option<Vec<GeminiResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiApiError {
    message: String,
}

/// Gemini `generateContent` client. Built once at startup and shared by the
/// summarizer and categorizer.
pub struct GeminiClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl GeminiClient {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model,
            self.config.api_key
        )
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self.http.post(self.endpoint()).json(&request).send().await?;
        let status = response.status();
        let payload: GeminiResponse = response.json().await?;

        if let Some(error) = payload.error {
            return Err(LlmError::Api(error.message));
        }
        if !status.is_success() {
            return Err(LlmError::Api(format!("unexpected status code: {status}")));
        }

        let text = payload
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect::<String>();

        if text.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(text)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;

    use super::{GenerativeClient, LlmError};

    /// Fails the first `failures` calls, then answers with `reply`.
    pub struct FlakyClient {
        pub failures: u32,
        pub reply: String,
        pub calls: AtomicU32,
    }

    impl FlakyClient {
        pub fn new(failures: u32, reply: &str) -> Self {
            Self {
                failures,
                reply: reply.to_string(),
                calls: AtomicU32::new(0),
            }
        }

        pub fn call_count(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GenerativeClient for FlakyClient {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                return Err(LlmError::Api("quota exceeded".to_string()));
            }
            Ok(self.reply.clone())
        }
    }
}
