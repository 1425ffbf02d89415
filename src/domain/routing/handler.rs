//! Handler names, domains, and dispatch routes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Query domain. Each domain contributes its rules and handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Geometry,
    Products,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Geometry => "geometry",
            Domain::Products => "products",
        }
    }

    /// Handlers this domain makes available.
    pub fn handlers(&self) -> &'static [HandlerName] {
        match self {
            Domain::Geometry => &[
                HandlerName::CircleArea,
                HandlerName::RectanglePerimeter,
                HandlerName::CubeVolume,
                HandlerName::TriangleArea,
            ],
            Domain::Products => &[HandlerName::WebSearch, HandlerName::VectorSearch],
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Domain {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "geometry" => Ok(Domain::Geometry),
            "products" | "product" => Ok(Domain::Products),
            other => Err(UnknownName(other.to_string())),
        }
    }
}

/// The closed set of handlers known to the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerName {
    CircleArea,
    RectanglePerimeter,
    CubeVolume,
    TriangleArea,
    WebSearch,
    VectorSearch,
}

impl HandlerName {
    pub const ALL: [HandlerName; 6] = [
        HandlerName::CircleArea,
        HandlerName::RectanglePerimeter,
        HandlerName::CubeVolume,
        HandlerName::TriangleArea,
        HandlerName::WebSearch,
        HandlerName::VectorSearch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HandlerName::CircleArea => "circle_area",
            HandlerName::RectanglePerimeter => "rectangle_perimeter",
            HandlerName::CubeVolume => "cube_volume",
            HandlerName::TriangleArea => "triangle_area",
            HandlerName::WebSearch => "web_search",
            HandlerName::VectorSearch => "vector_search",
        }
    }

    /// Declared parameters, in positional order.
    pub fn params(&self) -> &'static [&'static str] {
        match self {
            HandlerName::CircleArea => &["radius"],
            HandlerName::RectanglePerimeter => &["length", "width"],
            HandlerName::CubeVolume => &["side"],
            HandlerName::TriangleArea => &["base", "height"],
            HandlerName::WebSearch | HandlerName::VectorSearch => &["query"],
        }
    }

    /// True for handlers that call out to a service.
    pub fn is_retrieval(&self) -> bool {
        matches!(self, HandlerName::WebSearch | HandlerName::VectorSearch)
    }

    pub fn domain(&self) -> Domain {
        if self.is_retrieval() {
            Domain::Products
        } else {
            Domain::Geometry
        }
    }
}

impl fmt::Display for HandlerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HandlerName {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circle_area" => Ok(HandlerName::CircleArea),
            "rectangle_perimeter" => Ok(HandlerName::RectanglePerimeter),
            "cube_volume" => Ok(HandlerName::CubeVolume),
            "triangle_area" => Ok(HandlerName::TriangleArea),
            "web_search" | "web_research" => Ok(HandlerName::WebSearch),
            "vector_search" | "rag" => Ok(HandlerName::VectorSearch),
            other => Err(UnknownName(other.to_string())),
        }
    }
}

/// Error for a name outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown name: {0}")]
pub struct UnknownName(pub String);

/// Where a classified query goes.
///
/// Serialized as the handler name, or `"combined"` for the paired
/// vector + web retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Route {
    Single(HandlerName),
    Combined,
}

impl Route {
    pub const COMBINED: &'static str = "combined";

    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Single(name) => name.as_str(),
            Route::Combined => Self::COMBINED,
        }
    }

    /// Parameters the route needs before it can be dispatched.
    pub fn params(&self) -> &'static [&'static str] {
        match self {
            Route::Single(name) => name.params(),
            Route::Combined => &["query"],
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Route {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(Self::COMBINED) {
            return Ok(Route::Combined);
        }
        s.parse().map(Route::Single)
    }
}

impl From<Route> for String {
    fn from(route: Route) -> Self {
        route.as_str().to_string()
    }
}

impl TryFrom<String> for Route {
    type Error = UnknownName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HandlerName> for Route {
    fn from(name: HandlerName) -> Self {
        Route::Single(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_names_round_trip_through_strings() {
        for name in HandlerName::ALL {
            assert_eq!(name.as_str().parse::<HandlerName>().unwrap(), name);
        }
    }

    #[test]
    fn model_aliases_resolve_to_retrieval_handlers() {
        assert_eq!("rag".parse::<HandlerName>().unwrap(), HandlerName::VectorSearch);
        assert_eq!(
            "Web_Research".parse::<HandlerName>().unwrap(),
            HandlerName::WebSearch
        );
    }

    #[test]
    fn unknown_handler_name_is_rejected() {
        let err = "sphere_volume".parse::<HandlerName>().unwrap_err();
        assert_eq!(err.to_string(), "unknown name: sphere_volume");
    }

    #[test]
    fn route_serializes_as_plain_string() {
        let json = serde_json::to_string(&Route::Single(HandlerName::CubeVolume)).unwrap();
        assert_eq!(json, "\"cube_volume\"");

        let json = serde_json::to_string(&Route::Combined).unwrap();
        assert_eq!(json, "\"combined\"");

        let route: Route = serde_json::from_str("\"combined\"").unwrap();
        assert_eq!(route, Route::Combined);
    }

    #[test]
    fn params_follow_declared_order() {
        assert_eq!(HandlerName::RectanglePerimeter.params(), &["length", "width"]);
        assert_eq!(HandlerName::TriangleArea.params(), &["base", "height"]);
    }

    #[test]
    fn domains_partition_handlers() {
        for name in HandlerName::ALL {
            assert!(name.domain().handlers().contains(&name));
        }
    }

    #[test]
    fn domain_parses_case_insensitively() {
        assert_eq!(" Geometry ".parse::<Domain>().unwrap(), Domain::Geometry);
        assert_eq!("products".parse::<Domain>().unwrap(), Domain::Products);
        assert!("music".parse::<Domain>().is_err());
    }
}
