//! Query HTTP adapter - REST API for the query pipeline.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::QueryHandlers;
pub use routes::query_router;
