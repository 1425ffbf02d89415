//! Classified intents and their provenance.

use serde::{Deserialize, Serialize};

use super::{Arguments, Route};

/// How a response was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Classified locally by the rule table.
    Pattern,
    /// Classified (or answered) by the external model.
    Model,
    /// Any failure path.
    Error,
}

/// Result of classifying a query.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// A route with complete arguments.
    Matched {
        route: Route,
        args: Arguments,
        provenance: Provenance,
    },
    /// No rule matched; the query needs the model fallback.
    Fallback { query: String },
    /// A rule matched but an argument could not be converted.
    Malformed { route: Route, message: String },
}

impl Intent {
    pub fn pattern(route: impl Into<Route>, args: Arguments) -> Self {
        Intent::Matched {
            route: route.into(),
            args,
            provenance: Provenance::Pattern,
        }
    }

    pub fn model(route: impl Into<Route>, args: Arguments) -> Self {
        Intent::Matched {
            route: route.into(),
            args,
            provenance: Provenance::Model,
        }
    }

    pub fn fallback(query: impl Into<String>) -> Self {
        Intent::Fallback {
            query: query.into(),
        }
    }

    /// The resolved route, if any.
    pub fn route(&self) -> Option<Route> {
        match self {
            Intent::Matched { route, .. } | Intent::Malformed { route, .. } => Some(*route),
            Intent::Fallback { .. } => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Intent::Fallback { .. })
    }
}
