//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Text generation for the model fallback
//! - `WebSearchProvider` - Ranked web search
//! - `Embedder` - Text embeddings for catalog search
//! - `VectorIndex` - Nearest-neighbour catalog search
//! - `SessionStore` - Session transcript persistence

mod ai_provider;
mod embedder;
mod session_store;
mod vector_index;
mod web_search;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, ResponseFormat, TokenUsage,
};
pub use embedder::Embedder;
pub use session_store::{SessionStore, SessionStoreError};
pub use vector_index::VectorIndex;
pub use web_search::{SearchError, WebSearchProvider};
