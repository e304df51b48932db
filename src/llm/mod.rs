//! Chat-completion client used by the analysis pipeline.
//!
//! The pipeline only needs one capability from the model provider: send a single user prompt
//! and read back the first choice's text. [`CompletionClient`] captures that seam so the
//! pipeline can be driven by the OpenAI-compatible HTTP client in production and by scripted
//! clients in tests.

use crate::config::Config;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by a completion provider.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The request never produced an HTTP response (DNS, connect, timeout, TLS).
    #[error("failed to reach completion endpoint: {0}")]
    Transport(String),
    /// Provider answered with a non-success status (auth, rate limit, server error).
    #[error("provider returned {status}: {body}")]
    Status {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Raw response body, kept for diagnostics.
        body: String,
    },
    /// Provider response could not be decoded or carried no choice text.
    #[error("malformed provider response: {0}")]
    InvalidResponse(String),
}

impl CompletionError {
    /// Short name of the failure class, reported alongside the message to API callers.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "TransportError",
            Self::Status { .. } => "ApiStatusError",
            Self::InvalidResponse(_) => "InvalidResponseError",
        }
    }
}

/// One prompt sent to the provider.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model identifier understood by the provider.
    pub model: String,
    /// Prompt text, sent as a single user message.
    pub prompt: String,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Sampling temperature; the pipeline always uses `0.0`.
    pub temperature: f32,
}

/// Interface implemented by chat-completion providers.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Run one completion and return the trimmed text of the first choice.
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;
}

/// Client for the OpenAI `/v1/chat/completions` endpoint (or any compatible server).
pub struct OpenAiCompletionClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAiCompletionClient {
    /// Build a client from the loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, CompletionError> {
        let http = Client::builder()
            .user_agent(concat!("newsbrief/", env!("CARGO_PKG_VERSION")))
            .timeout(config.llm_request_timeout)
            .build()
            .map_err(|error| CompletionError::Transport(error.to_string()))?;
        Ok(Self::with_http(
            http,
            config.openai_base_url.clone(),
            config.openai_api_key.clone(),
        ))
    }

    /// Build a client around an existing `reqwest::Client`.
    pub fn with_http(http: Client, base_url: String, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url,
            api_key,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let payload = json!({
            "model": request.model,
            "messages": [{ "role": "user", "content": request.prompt }],
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        });

        let mut builder = self.http.post(self.endpoint()).json(&payload);
        if let Some(key) = self.api_key.as_deref() {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|error| {
            CompletionError::Transport(format!("{} ({error})", self.endpoint()))
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: ChatCompletionResponse = response.json().await.map_err(|error| {
            CompletionError::InvalidResponse(format!("failed to decode completion: {error}"))
        })?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| {
                CompletionError::InvalidResponse("missing choices[0].message.content".into())
            })
    }
}
