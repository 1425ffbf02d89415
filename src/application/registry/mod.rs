//! Handler registry.
//!
//! Maps each [`HandlerName`] to the implementation that serves it. The set
//! of names is closed; which of them are registered depends on the enabled
//! domains.

mod geometry;
mod retrieval;

pub use geometry::GeometryHandler;
pub use retrieval::{VectorSearchHandler, WebSearchHandler};

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::routing::{Arguments, HandlerName, HandlerOutput, Route};

/// Errors a handler reports for bad input. Service failures are not errors:
/// retrieval handlers turn them into `unavailable` results.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HandlerError {
    #[error("{handler} requires argument '{name}'")]
    MissingArgument { handler: HandlerName, name: String },

    #[error("{handler} argument '{name}' is invalid: {reason}")]
    InvalidArgument {
        handler: HandlerName,
        name: String,
        reason: String,
    },

    #[error("{handler} result is too large to represent")]
    Overflow { handler: HandlerName },
}

impl HandlerError {
    pub fn missing(handler: HandlerName, name: impl Into<String>) -> Self {
        Self::MissingArgument {
            handler,
            name: name.into(),
        }
    }

    pub fn invalid(handler: HandlerName, name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            handler,
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// One entry in the handler set.
#[async_trait]
pub trait Handler: Send + Sync {
    fn name(&self) -> HandlerName;

    async fn call(&self, args: &Arguments) -> Result<HandlerOutput, HandlerError>;
}

/// Lookup table from handler name to implementation.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<HandlerName, Arc<dyn Handler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler under its own name, replacing any previous one.
    pub fn register(&mut self, handler: Arc<dyn Handler>) {
        self.handlers.insert(handler.name(), handler);
    }

    pub fn with(mut self, handler: Arc<dyn Handler>) -> Self {
        self.register(handler);
        self
    }

    /// Registry with the four geometry handlers.
    pub fn with_geometry(self) -> Self {
        GeometryHandler::all()
            .into_iter()
            .fold(self, |registry, handler| registry.with(Arc::new(handler)))
    }

    pub fn get(&self, name: HandlerName) -> Option<Arc<dyn Handler>> {
        self.handlers.get(&name).cloned()
    }

    pub fn contains(&self, name: HandlerName) -> bool {
        self.handlers.contains_key(&name)
    }

    /// Registered names, in canonical order.
    pub fn names(&self) -> Vec<HandlerName> {
        HandlerName::ALL
            .into_iter()
            .filter(|name| self.contains(*name))
            .collect()
    }

    /// Routes that can be dispatched: every registered handler, plus
    /// `combined` when both retrieval handlers are present.
    pub fn routes(&self) -> Vec<Route> {
        let mut routes: Vec<Route> = self.names().into_iter().map(Route::Single).collect();
        if self.contains(HandlerName::VectorSearch) && self.contains(HandlerName::WebSearch) {
            routes.push(Route::Combined);
        }
        routes
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.names())
            .finish()
    }
}
