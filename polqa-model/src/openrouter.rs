//! OpenRouter-compatible chat-completions client.
//!
//! Works against any OpenAI-compatible `/chat/completions` endpoint;
//! the defaults target OpenRouter. One request per completion, no
//! streaming, no retries — a failed call is terminal for that query.

use std::time::Duration;

use async_trait::async_trait;
use polqa_core::{CoreError, Llm, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Configuration for an [`OpenRouterClient`].
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    /// Bearer token for the API.
    pub api_key: String,
    /// Base URL, without the `/chat/completions` suffix.
    pub base_url: String,
    /// Model identifier passed through to the backend.
    pub model: String,
    /// Hard deadline for one completion request.
    pub timeout: Duration,
    /// Optional `HTTP-Referer` header (OpenRouter app attribution).
    pub referer: Option<String>,
    /// Optional `X-Title` header (OpenRouter app attribution).
    pub title: Option<String>,
}

impl OpenRouterConfig {
    /// Default OpenRouter endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "https://openrouter.ai/api/v1";
    /// Default model.
    pub const DEFAULT_MODEL: &'static str = "anthropic/claude-3-haiku";
    /// Default request deadline.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Create a config with the given API key and all defaults.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            model: Self::DEFAULT_MODEL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
            referer: None,
            title: None,
        }
    }

    /// Read the API key from the environment: `OPENROUTER_API_KEY`,
    /// falling back to `OPENAI_API_KEY` for backward compatibility.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] if neither variable is set.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENROUTER_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .map_err(|_| {
                CoreError::Config(
                    "no API key found: set OPENROUTER_API_KEY (or OPENAI_API_KEY)".to_string(),
                )
            })?;
        Ok(Self::new(api_key))
    }

    /// Override the base URL (for OpenAI-compatible backends).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the request deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the OpenRouter attribution headers.
    pub fn with_attribution(mut self, referer: impl Into<String>, title: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self.title = Some(title.into());
        self
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// An [`Llm`] backed by an OpenAI-compatible chat-completions API.
///
/// # Example
///
/// ```rust,ignore
/// use polqa_model::{OpenRouterClient, OpenRouterConfig};
///
/// let client = OpenRouterClient::new(OpenRouterConfig::from_env()?)?;
/// let reply = client.complete("You are an assistant.", "What is covered?").await?;
/// ```
pub struct OpenRouterClient {
    http: reqwest::Client,
    config: OpenRouterConfig,
}

impl OpenRouterClient {
    /// Create a client. The configured timeout is applied to every
    /// request by the underlying HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] if the HTTP client cannot be built.
    pub fn new(config: OpenRouterConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CoreError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl Llm for OpenRouterClient {
    fn name(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, system_instruction: &str, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage { role: "system", content: system_instruction },
                ChatMessage { role: "user", content: prompt },
            ],
        };

        debug!(model = %self.config.model, prompt_len = prompt.len(), "sending completion request");

        let mut request = self.http.post(&url).bearer_auth(&self.config.api_key).json(&body);
        if let Some(referer) = &self.config.referer {
            request = request.header("HTTP-Referer", referer);
        }
        if let Some(title) = &self.config.title {
            request = request.header("X-Title", title);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                error!(model = %self.config.model, "completion request timed out");
                CoreError::Timeout { seconds: self.config.timeout.as_secs() }
            } else {
                error!(model = %self.config.model, error = %e, "completion request failed");
                CoreError::Model(format!("request failed: {e}"))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!(model = %self.config.model, %status, "completion request rejected");
            return Err(CoreError::Model(format!("API returned {status}: {detail}")));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!(model = %self.config.model, error = %e, "malformed completion response");
            CoreError::Model(format!("malformed response: {e}"))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| CoreError::Model("response contained no choices".to_string()))
    }
}
