//! Axum router configuration for session endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_session, list_sessions, put_session, SessionHandlers};

/// Create the sessions API router.
///
/// # Routes
///
/// - `GET /` - List stored sessions
/// - `GET /:name` - Get a session transcript
/// - `PUT /:name` - Overwrite a session transcript
///
/// Suitable for mounting at `/api/sessions`.
pub fn sessions_router() -> Router<SessionHandlers> {
    Router::new()
        .route("/", get(list_sessions))
        .route("/:name", get(get_session).put(put_session))
}
