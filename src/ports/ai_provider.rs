//! AI Provider Port - Interface for text-generation services.
//!
//! The router only needs single-shot completions: the model fallback sends a
//! system prompt plus the user's query and reads back one reply, and the
//! summarizer does the same with retrieval results. Provider
//! adapters (Gemini, the offline keyword provider, the test mock) translate
//! between this request shape and their own APIs.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct EchoProvider;
//!
//! #[async_trait]
//! impl AIProvider for EchoProvider {
//!     async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
//!         Ok(CompletionResponse::stop(request.messages[0].content.clone(), "echo"))
//!     }
//!
//!     fn provider_info(&self) -> ProviderInfo {
//!         ProviderInfo::new("echo", "echo")
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A model the fallback can ask to classify or answer a query.
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Sends one request and returns the raw reply. Deadlines are enforced by
    /// the caller, not the provider.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError>;

    fn provider_info(&self) -> ProviderInfo;
}

/// A single-shot completion request.
#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    /// For classification this is just the user's query.
    pub messages: Vec<Message>,
    /// Handler catalogue plus the reply-format instructions.
    pub system_prompt: Option<String>,
    pub max_tokens: Option<u32>,
    /// The fallback always sends 0.0.
    pub temperature: Option<f32>,
    pub response_format: ResponseFormat,
}

impl CompletionRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(mut self, role: MessageRole, content: impl Into<String>) -> Self {
        self.messages.push(Message::new(role, content));
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Asks the provider for a JSON-only reply.
    pub fn with_json_output(mut self) -> Self {
        self.response_format = ResponseFormat::Json;
        self
    }

    /// The query being classified.
    pub fn last_user_message(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
            .map(|m| m.content.as_str())
    }
}

/// Output format hint. Providers that cannot enforce JSON treat it as advice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// One completion: the raw reply text plus what the provider reported
/// about it.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub content: String,
    pub usage: TokenUsage,
    pub model: String,
    pub finish_reason: FinishReason,
}

impl CompletionResponse {
    /// A normally finished response with unknown usage.
    pub fn stop(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: TokenUsage::zero(),
            model: model.into(),
            finish_reason: FinishReason::Stop,
        }
    }
}

/// Token counts reported by the provider, zero when unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

/// Reason the model stopped. A `Length` stop usually means truncated JSON,
/// which the reply parser then treats as free text; callers log a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    Other,
}

/// Which provider and model answered, for logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// `gemini`, `offline` or `mock`.
    pub name: String,
    pub model: String,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Why a completion failed. The fallback turns every variant into an
/// unavailable decision, so the variants only shape the logged reason.
#[derive(Debug, thiserror::Error)]
pub enum AIError {
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// The provider refused to answer (safety block, empty candidate list).
    #[error("content filtered: {reason}")]
    ContentFiltered { reason: String },

    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("network error: {0}")]
    Network(String),

    /// The provider answered but the body could not be read.
    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl AIError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn content_filtered(reason: impl Into<String>) -> Self {
        Self::ContentFiltered {
            reason: reason.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn timeout(timeout_secs: u64) -> Self {
        Self::Timeout { timeout_secs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_request_builds_in_one_chain() {
        let request = CompletionRequest::new()
            .with_message(MessageRole::User, "area of a hexagon")
            .with_system_prompt("Classify the query")
            .with_max_tokens(256)
            .with_temperature(0.0)
            .with_json_output();

        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.last_user_message(), Some("area of a hexagon"));
        assert_eq!(request.system_prompt.as_deref(), Some("Classify the query"));
        assert_eq!(request.max_tokens, Some(256));
        assert_eq!(request.temperature, Some(0.0));
        assert_eq!(request.response_format, ResponseFormat::Json);
    }

    #[test]
    fn default_format_is_text() {
        assert_eq!(CompletionRequest::new().response_format, ResponseFormat::Text);
    }

    #[test]
    fn last_user_message_skips_assistant_turns() {
        let request = CompletionRequest::new()
            .with_message(MessageRole::User, "first")
            .with_message(MessageRole::Assistant, "reply");
        assert_eq!(request.last_user_message(), Some("first"));
    }

    #[test]
    fn usage_total_is_prompt_plus_completion() {
        let usage = TokenUsage::new(100, 50);
        assert_eq!(usage.total_tokens, 150);
        assert_eq!(TokenUsage::zero().total_tokens, 0);
    }

    #[test]
    fn error_messages_name_the_limit() {
        assert_eq!(
            AIError::rate_limited(30).to_string(),
            "rate limited: retry after 30s"
        );
        assert_eq!(
            AIError::timeout(10).to_string(),
            "request timed out after 10s"
        );
    }

    #[test]
    fn finish_reason_uses_snake_case() {
        let json = serde_json::to_string(&FinishReason::ContentFilter).unwrap();
        assert_eq!(json, "\"content_filter\"");
    }
}
