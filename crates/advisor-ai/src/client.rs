//! OpenAI-compatible chat completion client.

use advisor_core::error::AdvisorError;
use advisor_core::traits::{CompletionRequest, CompletionService, ResponseFormat};
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Connection settings for a chat completion endpoint.
#[derive(Clone)]
pub struct CompletionConfig {
    pub api_key: String,
    /// Base URL without the `/chat/completions` suffix.
    pub base_url: String,
    /// Transport-level ceiling; the orchestrator applies its own per-attempt timeout.
    pub request_timeout: Duration,
}

impl std::fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl CompletionConfig {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            request_timeout: Duration::from_secs(120),
        }
    }

    /// Read the API key from `var`. A missing or blank key is a configuration error.
    pub fn from_env(var: &str, base_url: impl Into<String>) -> Result<Self, AdvisorError> {
        let api_key = std::env::var(var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AdvisorError::Configuration(format!("{var} not set")))?;
        Ok(Self::new(api_key, base_url))
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<FormatSpec>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct FormatSpec {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for any `/chat/completions` endpoint speaking the OpenAI wire format.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleClient {
    config: CompletionConfig,
    client: Client,
}

impl OpenAiCompatibleClient {
    pub fn new(config: CompletionConfig) -> Result<Self, AdvisorError> {
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| AdvisorError::Configuration(format!("invalid API key: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AdvisorError::Configuration(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionService for OpenAiCompatibleClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AdvisorError> {
        let body = ChatRequest {
            model: &request.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system_instruction,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_prompt,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: match request.response_format {
                ResponseFormat::Json => Some(FormatSpec { kind: "json_object" }),
                ResponseFormat::Text => None,
            },
        };

        let resp = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            let retry_after = resp
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            let text = resp.text().await.unwrap_or_default();
            return Err(classify_status(status, retry_after, &text));
        }

        let text = resp.text().await.map_err(|e| self.transport_error(e))?;
        debug!(bytes = text.len(), model = %request.model, "Completion response received");
        extract_content(&text)
    }

    fn name(&self) -> &str {
        "openai-compatible"
    }
}

impl OpenAiCompatibleClient {
    fn transport_error(&self, e: reqwest::Error) -> AdvisorError {
        if e.is_timeout() {
            AdvisorError::Timeout {
                after: self.config.request_timeout,
            }
        } else {
            AdvisorError::Transient(e.to_string())
        }
    }
}

/// Map a non-success HTTP status onto the error taxonomy.
pub fn classify_status(status: StatusCode, retry_after_secs: Option<u64>, body: &str) -> AdvisorError {
    let message = summarize(body, status);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AdvisorError::Unauthorized(message),
        StatusCode::TOO_MANY_REQUESTS => AdvisorError::RateLimited { retry_after_secs },
        StatusCode::REQUEST_TIMEOUT => AdvisorError::Transient(message),
        s if s.is_server_error() => AdvisorError::Transient(message),
        s => AdvisorError::Rejected {
            status: s.as_u16(),
            message,
        },
    }
}

fn summarize(body: &str, status: StatusCode) -> String {
    const MAX_LEN: usize = 200;
    let body = body.trim();
    if body.is_empty() {
        return status.to_string();
    }
    match body.char_indices().nth(MAX_LEN) {
        Some((cut, _)) => format!("{status}: {}...", &body[..cut]),
        None => format!("{status}: {body}"),
    }
}

/// Pull the first choice's message content out of a response envelope.
fn extract_content(body: &str) -> Result<String, AdvisorError> {
    let envelope: ChatResponse = serde_json::from_str(body)
        .map_err(|e| AdvisorError::ParseFailure(format!("invalid completion envelope: {e}")))?;

    envelope
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| AdvisorError::ParseFailure("completion contained no content".to_string()))
}
