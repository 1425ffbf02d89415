//! Embedder Port - Turns text into vectors for catalog search.

use async_trait::async_trait;

use super::SearchError;

/// Port for text embedding.
///
/// A given embedder must always return vectors of the same length, since
/// catalog and query vectors are compared directly.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, SearchError>;

    /// Short embedder name for logs.
    fn name(&self) -> &'static str;
}
