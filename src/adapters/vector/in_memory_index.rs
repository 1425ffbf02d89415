//! Brute-force in-memory vector index over the product catalog.
//!
//! Records are embedded once when the index is built. A query is embedded on
//! every search and compared to each record by L2 distance.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::domain::retrieval::{CatalogRecord, RecordHit};
use crate::ports::{Embedder, SearchError, VectorIndex};

struct Entry {
    record: CatalogRecord,
    embedding: Vec<f32>,
}

/// Flat L2 index; nearest first, ties keep catalog order.
pub struct InMemoryVectorIndex {
    embedder: Arc<dyn Embedder>,
    entries: Vec<Entry>,
}

impl InMemoryVectorIndex {
    /// Embeds every record and builds the index.
    pub async fn build(
        embedder: Arc<dyn Embedder>,
        records: Vec<CatalogRecord>,
    ) -> Result<Self, SearchError> {
        let mut entries = Vec::with_capacity(records.len());
        for record in records {
            let embedding = embedder.embed(&record.embedding_text()).await?;
            entries.push(Entry { record, embedding });
        }

        info!(
            records = entries.len(),
            embedder = embedder.name(),
            "catalog index built"
        );
        Ok(Self { embedder, entries })
    }
}

/// Euclidean distance between two vectors of equal length.
pub fn l2_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    async fn nearest(&self, query: &str, k: usize) -> Result<Vec<RecordHit>, SearchError> {
        if k == 0 || self.entries.is_empty() {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed(query).await?;

        let mut scored = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            if entry.embedding.len() != query_embedding.len() {
                return Err(SearchError::InvalidInput(format!(
                    "query embedding has {} dimensions, catalog has {}",
                    query_embedding.len(),
                    entry.embedding.len()
                )));
            }
            scored.push((l2_distance(&query_embedding, &entry.embedding), entry));
        }

        // Stable sort keeps catalog order for equal distances.
        scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(distance, entry)| RecordHit {
                record: entry.record.clone(),
                distance,
            })
            .collect())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::vector::{builtin_catalog, HashingEmbedder};

    async fn index() -> InMemoryVectorIndex {
        InMemoryVectorIndex::build(Arc::new(HashingEmbedder::default()), builtin_catalog())
            .await
            .unwrap()
    }

    #[test]
    fn l2_distance_is_euclidean() {
        assert_eq!(l2_distance(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
        assert_eq!(l2_distance(&[1.0, 2.0], &[1.0, 2.0]), 0.0);
    }

    #[tokio::test]
    async fn returns_k_hits_nearest_first() {
        let hits = index().await.nearest("gaming laptop", 3).await.unwrap();

        assert_eq!(hits.len(), 3);
        assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));
        assert_eq!(hits[0].record.id, "lap-002");
    }

    #[tokio::test]
    async fn category_words_pull_matching_records() {
        let hits = index()
            .await
            .nearest("noise cancelling headphones", 1)
            .await
            .unwrap();
        assert_eq!(hits[0].record.category, "headphones");
    }

    #[tokio::test]
    async fn k_larger_than_catalog_returns_everything() {
        let index = index().await;
        let hits = index.nearest("anything", 100).await.unwrap();
        assert_eq!(hits.len(), index.len());
    }

    #[tokio::test]
    async fn empty_index_returns_nothing() {
        let index = InMemoryVectorIndex::build(Arc::new(HashingEmbedder::default()), Vec::new())
            .await
            .unwrap();
        assert!(index.is_empty());
        assert!(index.nearest("laptop", 3).await.unwrap().is_empty());
    }
}
