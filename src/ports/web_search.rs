//! Web Search Port - Interface for web search services.
//!
//! Also home to [`SearchError`], shared by every retrieval port.

use async_trait::async_trait;

use crate::domain::retrieval::WebResult;

/// Errors from retrieval services (web search, embedding, catalog search).
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("{0} is not configured")]
    NotConfigured(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("rate limited")]
    RateLimited,

    #[error("service returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl SearchError {
    pub fn not_configured(service: impl Into<String>) -> Self {
        Self::NotConfigured(service.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }
}

/// Port for web search.
///
/// Results come back ranked; callers keep the order.
#[async_trait]
pub trait WebSearchProvider: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<WebResult>, SearchError>;

    /// Short provider name for logs.
    fn name(&self) -> &'static str;
}
