//! Local hashing embedder.
//!
//! Hashes lower-cased terms into fixed buckets (FNV-1a), weights them by
//! term frequency, and L2-normalizes. Deterministic and always available;
//! good enough for keyword-overlap similarity over a small catalog.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::ports::{Embedder, SearchError};

pub const DEFAULT_HASHING_DIMENSIONS: usize = 256;

/// Term-hashing embedder with no external dependencies.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimensions: usize,
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_HASHING_DIMENSIONS)
    }
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn bucket(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h as usize) % dims
    }

    /// Lower-cased alphanumeric terms, with a plural `s` dropped.
    fn terms(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|s| s.len() >= 2)
            .map(|s| {
                let term = s.to_lowercase();
                match term.strip_suffix('s') {
                    Some(stem) if stem.len() >= 3 && !stem.ends_with('s') => stem.to_string(),
                    _ => term,
                }
            })
            .collect()
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let terms = Self::terms(text);
        let mut vec = vec![0.0f32; self.dimensions];
        if terms.is_empty() {
            return vec;
        }

        let mut tf: HashMap<&str, f32> = HashMap::new();
        for term in &terms {
            *tf.entry(term.as_str()).or_default() += 1.0;
        }

        let total = terms.len() as f32;
        for (term, count) in tf {
            // Longer terms carry more signal than short function words.
            let weight = 1.0 + (term.len() as f32).ln();
            vec[Self::bucket(term, self.dimensions)] += (count / total) * weight;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

#[async_trait]
impl Embedder for HashingEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, SearchError> {
        Ok(self.vector(text))
    }

    fn name(&self) -> &'static str {
        "hashing"
    }
}
