//! Completion service trait definitions.

use crate::error::AdvisorError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Requested response encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    Json,
    Text,
}

/// A single completion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub system_instruction: String,
    pub user_prompt: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub response_format: ResponseFormat,
}

/// External language-model endpoint.
///
/// Implementations classify their own failures: `Unauthorized`, `RateLimited`,
/// `Transient`, `Timeout`, `Rejected` or `ParseFailure` (undecodable envelope).
/// The returned string is the raw message content, still unparsed.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AdvisorError>;

    /// Get the service name.
    fn name(&self) -> &str;
}
