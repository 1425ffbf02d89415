//! Retrieval handlers: web search and catalog vector search.
//!
//! Both are best-effort. A failing or slow service yields an `unavailable`
//! result instead of an error, so a combined query still returns whatever
//! the other service found.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::{Handler, HandlerError};
use crate::domain::retrieval::Retrieved;
use crate::domain::routing::{Arguments, HandlerName, HandlerOutput};
use crate::ports::{SearchError, VectorIndex, WebSearchProvider};

fn query_argument(handler: HandlerName, args: &Arguments) -> Result<String, HandlerError> {
    let query = args
        .text("query")
        .ok_or_else(|| HandlerError::missing(handler, "query"))?
        .trim();
    if query.is_empty() {
        return Err(HandlerError::invalid(handler, "query", "must not be blank"));
    }
    Ok(query.to_string())
}

/// Runs a search under a deadline and folds failures into `unavailable`.
async fn bounded<T, F>(handler: HandlerName, limit: Duration, search: F) -> Retrieved<T>
where
    F: std::future::Future<Output = Result<Vec<T>, SearchError>>,
{
    match timeout(limit, search).await {
        Ok(Ok(items)) => {
            debug!(handler = %handler, hits = items.len(), "retrieval finished");
            Retrieved::ok(items)
        }
        Ok(Err(e)) => {
            warn!(handler = %handler, error = %e, "retrieval failed");
            Retrieved::unavailable(e.to_string())
        }
        Err(_) => {
            let e = SearchError::Timeout {
                timeout_secs: limit.as_secs(),
            };
            warn!(handler = %handler, error = %e, "retrieval timed out");
            Retrieved::unavailable(e.to_string())
        }
    }
}

/// Ranked web results from a [`WebSearchProvider`].
pub struct WebSearchHandler {
    provider: Arc<dyn WebSearchProvider>,
    max_results: usize,
    timeout: Duration,
}

impl WebSearchHandler {
    pub fn new(provider: Arc<dyn WebSearchProvider>, max_results: usize, timeout: Duration) -> Self {
        Self {
            provider,
            max_results,
            timeout,
        }
    }
}

#[async_trait]
impl Handler for WebSearchHandler {
    fn name(&self) -> HandlerName {
        HandlerName::WebSearch
    }

    async fn call(&self, args: &Arguments) -> Result<HandlerOutput, HandlerError> {
        let query = query_argument(self.name(), args)?;
        let retrieved = bounded(
            self.name(),
            self.timeout,
            self.provider.search(&query, self.max_results),
        )
        .await;
        Ok(HandlerOutput::Web(retrieved))
    }
}

/// Nearest catalog records from a [`VectorIndex`].
pub struct VectorSearchHandler {
    index: Arc<dyn VectorIndex>,
    top_k: usize,
    timeout: Duration,
}

impl VectorSearchHandler {
    pub fn new(index: Arc<dyn VectorIndex>, top_k: usize, timeout: Duration) -> Self {
        Self {
            index,
            top_k,
            timeout,
        }
    }
}

#[async_trait]
impl Handler for VectorSearchHandler {
    fn name(&self) -> HandlerName {
        HandlerName::VectorSearch
    }

    async fn call(&self, args: &Arguments) -> Result<HandlerOutput, HandlerError> {
        let query = query_argument(self.name(), args)?;
        let retrieved = bounded(
            self.name(),
            self.timeout,
            self.index.nearest(&query, self.top_k),
        )
        .await;
        Ok(HandlerOutput::Records(retrieved))
    }
}
