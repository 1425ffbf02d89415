//! Web search adapters.
//!
//! - `TavilySearch` - Tavily search API
//! - `DisabledWebSearch` - Used when no search API key is configured
//! - `MockWebSearch` - Configurable mock for testing

mod disabled;
mod mock;
mod tavily;

pub use disabled::DisabledWebSearch;
pub use mock::MockWebSearch;
pub use tavily::{TavilyConfig, TavilySearch, DEFAULT_TAVILY_BASE_URL};
