//! HTTP middleware for axum.
//!
//! This module contains middleware layers for cross-cutting concerns:
//!
//! - `panic` - Converts handler panics into error envelopes
//! - `cors` - CORS policy from configured origins
//! - [`apply`] - The full stack: request ids, tracing, panic boundary,
//!   request timeout, CORS

pub mod cors;
pub mod panic;

pub use cors::cors_layer;
pub use panic::panic_response;

use axum::Router;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Wraps a router in the service middleware stack.
pub fn apply(router: Router, request_timeout: Duration, cors_origins: &[String]) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(TimeoutLayer::new(request_timeout))
            .layer(cors_layer(cors_origins)),
    )
}
