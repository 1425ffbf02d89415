//! Panic boundary.
//!
//! A panic inside a handler becomes a 500 response carrying an error
//! envelope. The panic payload is logged, never returned.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::any::Any;
use tracing::error;

use crate::domain::routing::ResponseEnvelope;

/// Message returned to clients for any panic.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal error while processing the request";

/// Response builder for `CatchPanicLayer::custom`.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    error!(panic = %detail, "request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ResponseEnvelope::normalize_error(None, INTERNAL_ERROR_MESSAGE)),
    )
        .into_response()
}
