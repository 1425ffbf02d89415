//! Vector Index Port - Nearest-neighbour search over the product catalog.

use async_trait::async_trait;

use super::SearchError;
use crate::domain::retrieval::RecordHit;

/// Port for catalog similarity search.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// The `k` records closest to `query`, nearest first.
    async fn nearest(&self, query: &str, k: usize) -> Result<Vec<RecordHit>, SearchError>;

    /// Number of indexed records.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
