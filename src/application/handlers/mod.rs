//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod query;
pub mod sessions;

pub use query::{ProcessQueryCommand, ProcessQueryHandler, EMPTY_QUERY_MESSAGE};
pub use sessions::{
    GetSessionHandler, GetSessionQuery, ListSessionsHandler, SaveSessionCommand,
    SaveSessionHandler,
};
