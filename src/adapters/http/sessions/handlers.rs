//! HTTP handlers for session endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::application::{
    GetSessionHandler, GetSessionQuery, ListSessionsHandler, SaveSessionCommand,
    SaveSessionHandler,
};
use crate::domain::session::SessionName;
use crate::ports::SessionStoreError;

use super::dto::{ErrorResponse, SaveSessionRequest, SessionListResponse, SessionResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SessionHandlers {
    list_handler: Arc<ListSessionsHandler>,
    get_handler: Arc<GetSessionHandler>,
    save_handler: Arc<SaveSessionHandler>,
}

impl SessionHandlers {
    pub fn new(
        list_handler: Arc<ListSessionsHandler>,
        get_handler: Arc<GetSessionHandler>,
        save_handler: Arc<SaveSessionHandler>,
    ) -> Self {
        Self {
            list_handler,
            get_handler,
            save_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/sessions - List stored sessions
pub async fn list_sessions(State(handlers): State<SessionHandlers>) -> Response {
    match handlers.list_handler.handle().await {
        Ok(names) => {
            let response: SessionListResponse = names.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_store_error(e),
    }
}

/// GET /api/sessions/:name - Get a session transcript
pub async fn get_session(
    State(handlers): State<SessionHandlers>,
    Path(name): Path<String>,
) -> Response {
    let name = match SessionName::new(name) {
        Ok(name) => name,
        Err(e) => return invalid_name(e),
    };

    match handlers.get_handler.handle(GetSessionQuery { name: name.clone() }).await {
        Ok(turns) => {
            let response = SessionResponse {
                name: name.to_string(),
                turns,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_store_error(e),
    }
}

/// PUT /api/sessions/:name - Overwrite a session transcript
pub async fn put_session(
    State(handlers): State<SessionHandlers>,
    Path(name): Path<String>,
    payload: Result<Json<SaveSessionRequest>, JsonRejection>,
) -> Response {
    let name = match SessionName::new(name) {
        Ok(name) => name,
        Err(e) => return invalid_name(e),
    };
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(rejection.body_text())),
            )
                .into_response()
        }
    };

    let cmd = SaveSessionCommand {
        name,
        turns: req.turns,
    };
    match handlers.save_handler.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_store_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn invalid_name(error: impl std::fmt::Display) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(error.to_string())),
    )
        .into_response()
}

fn handle_store_error(err: SessionStoreError) -> Response {
    match err {
        SessionStoreError::NotFound(name) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Session", name.as_str())),
        )
            .into_response(),
        other => {
            error!(error = %other, "session store failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Session storage failed")),
            )
                .into_response()
        }
    }
}
