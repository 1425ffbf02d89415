//! Catalog search adapters.
//!
//! - `HashingEmbedder` - Local term-hashing embedder
//! - `GeminiEmbedder` - Gemini `embedContent`
//! - `InMemoryVectorIndex` - Flat L2 index over the catalog
//! - `builtin_catalog` / `load_catalog` - Catalog sources

mod catalog;
mod gemini_embedder;
mod hashing_embedder;
mod in_memory_index;

pub use catalog::{builtin_catalog, load_catalog};
pub use gemini_embedder::{GeminiEmbedder, DEFAULT_EMBEDDING_MODEL};
pub use hashing_embedder::{HashingEmbedder, DEFAULT_HASHING_DIMENSIONS};
pub use in_memory_index::{l2_distance, InMemoryVectorIndex};
