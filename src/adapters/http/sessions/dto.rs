//! HTTP DTOs for session endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::session::{SessionName, Turn};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to overwrite a session.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveSessionRequest {
    pub turns: Vec<Turn>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Stored session names.
#[derive(Debug, Clone, Serialize)]
pub struct SessionListResponse {
    pub sessions: Vec<String>,
}

impl From<Vec<SessionName>> for SessionListResponse {
    fn from(names: Vec<SessionName>) -> Self {
        Self {
            sessions: names.into_iter().map(String::from).collect(),
        }
    }
}

/// A session transcript.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub name: String,
    pub turns: Vec<Turn>,
}

/// Error body for session endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }
}
