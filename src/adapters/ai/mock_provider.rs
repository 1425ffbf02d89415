//! Scripted model provider for tests.
//!
//! Replies are queued and handed out in order; once the queue is empty every
//! request gets [`MockAIProvider::DEFAULT_REPLY`]. Requests are recorded so
//! tests can inspect the prompt the fallback built.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
};

/// Failure a scripted reply can produce.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u64 },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::Timeout { timeout_secs } => AIError::timeout(timeout_secs),
        }
    }
}

#[derive(Debug, Clone)]
enum ScriptedReply {
    Text(String),
    Truncated(String),
    Failure(MockError),
}

/// Model provider that replays scripted replies.
#[derive(Debug, Clone, Default)]
pub struct MockAIProvider {
    script: Arc<Mutex<VecDeque<ScriptedReply>>>,
    delay: Duration,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockAIProvider {
    /// A structured free-text answer.
    pub const DEFAULT_REPLY: &'static str = r#"{"tool_call": null, "response": "Mock response"}"#;

    pub const MODEL: &'static str = "mock-classifier";

    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw reply text.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(ScriptedReply::Text(text.into()));
        self
    }

    /// Queues a reply cut off at the output token limit.
    pub fn with_truncated_response(self, text: impl Into<String>) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(ScriptedReply::Truncated(text.into()));
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: MockError) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(ScriptedReply::Failure(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        self.requests.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(ScriptedReply::Text(text)) => Ok(CompletionResponse::stop(text, Self::MODEL)),
            Some(ScriptedReply::Truncated(text)) => Ok(CompletionResponse {
                finish_reason: FinishReason::Length,
                ..CompletionResponse::stop(text, Self::MODEL)
            }),
            Some(ScriptedReply::Failure(err)) => Err(err.into()),
            None => Ok(CompletionResponse::stop(Self::DEFAULT_REPLY, Self::MODEL)),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("mock", Self::MODEL)
    }
}
