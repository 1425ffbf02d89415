//! HTTP handlers for query endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use crate::application::{
    HandlerRegistry, ProcessQueryCommand, ProcessQueryHandler, EMPTY_QUERY_MESSAGE,
};
use crate::domain::routing::ResponseEnvelope;
use crate::domain::session::SessionName;

use super::dto::{HandlersResponse, QueryRequest};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct QueryHandlers {
    process_handler: Arc<ProcessQueryHandler>,
    registry: HandlerRegistry,
}

impl QueryHandlers {
    pub fn new(process_handler: Arc<ProcessQueryHandler>, registry: HandlerRegistry) -> Self {
        Self {
            process_handler,
            registry,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/query - Classify and answer a query
pub async fn post_query(
    State(handlers): State<QueryHandlers>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            debug!(error = %rejection.body_text(), "rejected query body");
            return bad_request(format!("Invalid request body: {}", rejection.body_text()));
        }
    };

    if req.query.trim().is_empty() {
        return bad_request(EMPTY_QUERY_MESSAGE);
    }

    let mut cmd = ProcessQueryCommand::new(req.query);
    if let Some(raw) = req.session {
        match SessionName::new(raw) {
            Ok(name) => cmd = cmd.in_session(name),
            Err(e) => return bad_request(e.to_string()),
        }
    }

    let envelope = handlers.process_handler.handle(cmd).await;
    (StatusCode::OK, Json(envelope)).into_response()
}

/// GET /api/handlers - List enabled handlers and routes
pub async fn list_handlers(State(handlers): State<QueryHandlers>) -> Response {
    let response = HandlersResponse::from(&handlers.registry);
    (StatusCode::OK, Json(response)).into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ResponseEnvelope::normalize_error(None, message)),
    )
        .into_response()
}
