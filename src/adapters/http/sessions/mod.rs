//! Sessions HTTP adapter - REST API for session transcripts.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::SessionHandlers;
pub use routes::sessions_router;
