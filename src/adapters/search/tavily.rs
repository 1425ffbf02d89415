//! Tavily web search adapter.
//!
//! `POST {base_url}/search` with a bearer API key. Each hit's `content`
//! becomes the result snippet.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::domain::retrieval::WebResult;
use crate::ports::{SearchError, WebSearchProvider};

pub const DEFAULT_TAVILY_BASE_URL: &str = "https://api.tavily.com";

/// Configuration for the Tavily adapter.
#[derive(Debug, Clone)]
pub struct TavilyConfig {
    api_key: Secret<String>,
    pub base_url: String,
    pub timeout: Duration,
    /// "basic" or "advanced".
    pub search_depth: String,
}

impl TavilyConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: DEFAULT_TAVILY_BASE_URL.to_string(),
            timeout: Duration::from_secs(5),
            search_depth: "advanced".to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_search_depth(mut self, depth: impl Into<String>) -> Self {
        self.search_depth = depth.into();
        self
    }
}

/// Web search backed by the Tavily API.
pub struct TavilySearch {
    config: TavilyConfig,
    client: Client,
}

impl TavilySearch {
    pub fn new(config: TavilyConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SearchError::network(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.config.base_url)
    }

    fn to_results(response: TavilyResponse, max_results: usize) -> Vec<WebResult> {
        response
            .results
            .into_iter()
            .take(max_results)
            .map(|hit| WebResult::new(hit.title, hit.url, hit.content))
            .collect()
    }
}

#[async_trait]
impl WebSearchProvider for TavilySearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<WebResult>, SearchError> {
        let body = TavilyRequest {
            query,
            max_results,
            search_depth: &self.config.search_depth,
            include_answer: false,
        };

        let response = self
            .client
            .post(self.search_url())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else {
                    SearchError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => SearchError::AuthenticationFailed,
                429 => SearchError::RateLimited,
                code => SearchError::http(code, message),
            });
        }

        let parsed: TavilyResponse = response
            .json()
            .await
            .map_err(|e| SearchError::parse(format!("Failed to parse response: {}", e)))?;

        debug!(hits = parsed.results.len(), "tavily search returned");
        Ok(Self::to_results(parsed, max_results))
    }

    fn name(&self) -> &'static str {
        "tavily"
    }
}

#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    query: &'a str,
    max_results: usize,
    search_depth: &'a str,
    include_answer: bool,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyHit>,
}

#[derive(Debug, Deserialize)]
struct TavilyHit {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}
