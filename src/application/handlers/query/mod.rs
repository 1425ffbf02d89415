//! Query pipeline handlers.

mod process_query;

pub use process_query::{ProcessQueryCommand, ProcessQueryHandler, EMPTY_QUERY_MESSAGE};
