//! Mock web search for testing.
//!
//! Same shape as the mock AI provider: queued outcomes, an optional delay
//! for timeout tests, and call tracking.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::retrieval::WebResult;
use crate::ports::{SearchError, WebSearchProvider};

#[derive(Debug, Clone)]
enum MockOutcome {
    Results(Vec<WebResult>),
    Unreachable(String),
}

/// Configurable mock web search.
#[derive(Debug, Clone, Default)]
pub struct MockWebSearch {
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    delay: Duration,
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockWebSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful result list.
    pub fn with_results(self, results: Vec<WebResult>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Results(results));
        self
    }

    /// Queues a network failure.
    pub fn with_unreachable(self, message: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Unreachable(message.into()));
        self
    }

    /// Sets simulated latency per search.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Queries received so far.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebSearchProvider for MockWebSearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<WebResult>, SearchError> {
        self.queries.lock().unwrap().push(query.to_string());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let outcome = self.outcomes.lock().unwrap().pop_front();
        match outcome {
            Some(MockOutcome::Results(mut results)) => {
                results.truncate(max_results);
                Ok(results)
            }
            Some(MockOutcome::Unreachable(message)) => Err(SearchError::network(message)),
            None => Ok(Vec::new()),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
