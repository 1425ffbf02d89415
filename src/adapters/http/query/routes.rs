//! Axum router configuration for query endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{list_handlers, post_query, QueryHandlers};

/// Create the query API router.
///
/// # Routes
///
/// - `POST /query` - Classify and answer a query
/// - `GET /handlers` - List enabled handlers and routes
///
/// Suitable for mounting at `/api`.
pub fn query_router() -> Router<QueryHandlers> {
    Router::new()
        .route("/query", post(post_query))
        .route("/handlers", get(list_handlers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_are_defined() {
        let _router = query_router();
    }
}
