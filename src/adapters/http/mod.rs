//! HTTP adapters - REST API implementations.
//!
//! Each area has its own HTTP adapter for endpoint exposure; [`app_router`]
//! mounts them under one middleware stack.

pub mod health;
pub mod middleware;
pub mod query;
pub mod sessions;

// Re-export key types for convenience
pub use query::{query_router, QueryHandlers};
pub use sessions::{sessions_router, SessionHandlers};

use axum::{routing::get, Router};
use std::time::Duration;

/// Assemble the full API.
///
/// # Routes
///
/// - `GET /` - Liveness check
/// - `POST /api/query`, `GET /api/handlers` - Query pipeline
/// - `GET /api/sessions`, `GET|PUT /api/sessions/:name` - Session log
pub fn app_router(
    query: QueryHandlers,
    sessions: SessionHandlers,
    request_timeout: Duration,
    cors_origins: &[String],
) -> Router {
    let router = Router::new()
        .route("/", get(health::health))
        .nest("/api", query_router().with_state(query))
        .nest("/api/sessions", sessions_router().with_state(sessions));

    middleware::apply(router, request_timeout, cors_origins)
}
