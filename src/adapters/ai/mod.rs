//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! ## Available Adapters
//!
//! - `GeminiProvider` - Google Gemini `generateContent`
//! - `OfflineProvider` - Keyword stand-in used when no API key is configured
//! - `MockAIProvider` - Configurable mock for testing

mod gemini_provider;
mod mock_provider;
mod offline_provider;

pub use gemini_provider::{
    GeminiConfig, GeminiProvider, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL,
};
pub use mock_provider::{MockAIProvider, MockError};
pub use offline_provider::OfflineProvider;
