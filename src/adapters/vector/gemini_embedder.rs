//! Gemini `embedContent` embedder.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::adapters::ai::GeminiConfig;
use crate::ports::{Embedder, SearchError};

pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-004";

/// Embedder backed by the Gemini embeddings endpoint.
///
/// Reuses [`GeminiConfig`] for the key, base URL and timeout; `config.model`
/// names the embedding model.
pub struct GeminiEmbedder {
    config: GeminiConfig,
    client: Client,
}

impl GeminiEmbedder {
    pub fn new(config: GeminiConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SearchError::network(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    fn embed_url(&self) -> String {
        format!(
            "{}/models/{}:embedContent",
            self.config.base_url, self.config.model
        )
    }
}

#[async_trait]
impl Embedder for GeminiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, SearchError> {
        let body = EmbedRequest {
            content: EmbedContent {
                parts: vec![EmbedPart { text }],
            },
        };

        let response = self
            .client
            .post(self.embed_url())
            .header("x-goog-api-key", self.config.api_key())
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

        let parsed: EmbedResponse = response
            .json()
            .await
            .map_err(|e| SearchError::parse(format!("Failed to parse response: {}", e)))?;

        if parsed.embedding.values.is_empty() {
            return Err(SearchError::parse("empty embedding"));
        }
        Ok(parsed.embedding.values)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    content: EmbedContent<'a>,
}

#[derive(Debug, Serialize)]
struct EmbedContent<'a> {
    parts: Vec<EmbedPart<'a>>,
}

#[derive(Debug, Serialize)]
struct EmbedPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: EmbeddingValues,
}

#[derive(Debug, Deserialize)]
struct EmbeddingValues {
    #[serde(default)]
    values: Vec<f32>,
}
