//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports:
//! the handler registry, route dispatch, the model fallback, result
//! summaries, and the command/query handlers that tie them to the session log.

pub mod dispatcher;
pub mod fallback;
pub mod handlers;
pub mod registry;
pub mod summary;

pub use dispatcher::{DispatchError, Dispatcher};
pub use fallback::{system_prompt, ModelFallback, DEFAULT_MAX_OUTPUT_TOKENS};
pub use handlers::{
    GetSessionHandler, GetSessionQuery, ListSessionsHandler, ProcessQueryCommand,
    ProcessQueryHandler, SaveSessionCommand, SaveSessionHandler, EMPTY_QUERY_MESSAGE,
};
pub use registry::{
    GeometryHandler, Handler, HandlerError, HandlerRegistry, VectorSearchHandler,
    WebSearchHandler,
};
pub use summary::{Summarizer, DEFAULT_SUMMARY_TOKENS, NO_SUMMARY};
