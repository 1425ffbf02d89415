//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Model providers (Gemini, offline keywords, mock)
//! - `search` - Web search (Tavily, disabled, mock)
//! - `vector` - Embedders and the in-memory catalog index
//! - `storage` - Session log stores (file, in-memory)
//! - `http` - axum REST API

pub mod ai;
pub mod http;
pub mod search;
pub mod storage;
pub mod vector;
