//! Web search stand-in used when no search API key is configured.

use async_trait::async_trait;

use crate::domain::retrieval::WebResult;
use crate::ports::{SearchError, WebSearchProvider};

/// Always reports that web search is not configured.
#[derive(Debug, Clone, Default)]
pub struct DisabledWebSearch;

#[async_trait]
impl WebSearchProvider for DisabledWebSearch {
    async fn search(&self, _query: &str, _max_results: usize) -> Result<Vec<WebResult>, SearchError> {
        Err(SearchError::not_configured("web search"))
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}
