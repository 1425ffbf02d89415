//! Liveness endpoint.

use axum::Json;
use serde::{Deserialize, Serialize};

/// Service name reported by the health check.
pub const SERVICE_NAME: &str = "query-router";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

/// GET / - Liveness check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}
