//! Retrieval configuration: web search and catalog search

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::{check_range, check_url, ValidationError};
use crate::adapters::search::DEFAULT_TAVILY_BASE_URL;
use crate::adapters::vector::DEFAULT_HASHING_DIMENSIONS;

/// Retrieval configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Tavily API key. Without one web search reports itself unavailable.
    pub tavily_api_key: Option<String>,

    /// Tavily API base URL
    #[serde(default = "default_tavily_base_url")]
    pub tavily_base_url: String,

    /// Web results per query
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Catalog records per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Per-call timeout in seconds, for both search services
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Embedding backend for catalog search
    #[serde(default)]
    pub embedder: EmbedderKind,

    /// Dimensions of the hashing embedder
    #[serde(default = "default_hashing_dimensions")]
    pub hashing_dimensions: usize,

    /// JSON catalog file; the built-in catalog is used when unset
    pub catalog_path: Option<PathBuf>,
}

/// Embedding backend
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmbedderKind {
    #[default]
    Hashing,
    Gemini,
}

impl SearchConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if Tavily is configured
    pub fn has_tavily(&self) -> bool {
        self.tavily_api_key
            .as_ref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    /// Validate search configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_url("search.tavily_base_url", &self.tavily_base_url)?;
        check_range("search.max_results", self.max_results as u64, 1, 20)?;
        check_range("search.top_k", self.top_k as u64, 1, 50)?;
        if self.timeout_secs == 0 || self.timeout_secs > 60 {
            return Err(ValidationError::InvalidTimeout("search.timeout_secs"));
        }
        check_range(
            "search.hashing_dimensions",
            self.hashing_dimensions as u64,
            16,
            4096,
        )?;
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tavily_api_key: None,
            tavily_base_url: default_tavily_base_url(),
            max_results: default_max_results(),
            top_k: default_top_k(),
            timeout_secs: default_timeout(),
            embedder: EmbedderKind::default(),
            hashing_dimensions: default_hashing_dimensions(),
            catalog_path: None,
        }
    }
}

fn default_tavily_base_url() -> String {
    DEFAULT_TAVILY_BASE_URL.to_string()
}

fn default_max_results() -> usize {
    5
}

fn default_top_k() -> usize {
    3
}

fn default_timeout() -> u64 {
    5
}

fn default_hashing_dimensions() -> usize {
    DEFAULT_HASHING_DIMENSIONS
}
