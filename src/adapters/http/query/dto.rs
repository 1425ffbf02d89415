//! Data transfer objects for query endpoints.

use serde::{Deserialize, Serialize};

use crate::application::HandlerRegistry;
use crate::domain::routing::{Domain, HandlerName, Route};

// ═══════════════════════════════════════════════════════════════════════════
// Request DTOs
// ═══════════════════════════════════════════════════════════════════════════

/// Request to answer a query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Free-text query
    pub query: String,
    /// Session to record the exchange in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Response DTOs
// ═══════════════════════════════════════════════════════════════════════════

/// One enabled handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandlerInfo {
    pub name: HandlerName,
    pub domain: Domain,
    pub params: Vec<String>,
}

/// Enabled handlers and dispatchable routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandlersResponse {
    pub handlers: Vec<HandlerInfo>,
    pub routes: Vec<Route>,
}

impl From<&HandlerRegistry> for HandlersResponse {
    fn from(registry: &HandlerRegistry) -> Self {
        let handlers = registry
            .names()
            .into_iter()
            .map(|name| HandlerInfo {
                name,
                domain: name.domain(),
                params: name.params().iter().map(|p| p.to_string()).collect(),
            })
            .collect();
        Self {
            handlers,
            routes: registry.routes(),
        }
    }
}
