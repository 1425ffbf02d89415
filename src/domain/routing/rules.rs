//! The ordered rule table used by the pattern classifier.
//!
//! Rules are matched in order against the lower-cased, trimmed query and the
//! first hit wins, so order encodes priority. Each domain contributes a block
//! of rules; the table for a deployment is the concatenation of the enabled
//! domains' blocks in configured order.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Domain, HandlerName, Route};

/// How a matching rule turns the query into arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// Capture groups parsed as numbers, bound positionally to the names.
    Numeric(&'static [&'static str]),
    /// The trimmed original query, bound to `query`.
    RawQuery,
}

/// One `(pattern, route, extraction)` entry.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    route: Route,
    extraction: Extraction,
}

impl Rule {
    /// Builds a rule whose captures feed the handler's declared params.
    fn numeric(pattern: &str, handler: HandlerName) -> Self {
        Self {
            pattern: compile(pattern),
            route: Route::Single(handler),
            extraction: Extraction::Numeric(handler.params()),
        }
    }

    /// Builds a keyword rule that forwards the query text.
    fn keyword(pattern: &str, route: Route) -> Self {
        Self {
            pattern: compile(pattern),
            route,
            extraction: Extraction::RawQuery,
        }
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn extraction(&self) -> Extraction {
        self.extraction
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("rule patterns are static and valid")
}

const NUM: &str = r"([0-9]*\.?[0-9]+)";

static GEOMETRY_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    let circle = [
        format!(r"area of (?:a )?circle(?: with radius)?\s*=?\s*{NUM}"),
        format!(r"circle area (?:with )?r\s*=\s*{NUM}"),
        format!(r"what is the area of a circle whose radius is {NUM}"),
        r"circle radius (\d+\.?\d*) area".to_string(),
        r"area of circle:?\s*(\d+\.?\d*)".to_string(),
    ];
    let rectangle = [
        format!(
            r"perimeter of (?:a )?rectangle(?: with length)?\s*=?\s*{NUM}\s*(?:[,x]|and)?\s*(?:width)?\s*=?\s*{NUM}"
        ),
        format!(r"rectangle perimeter l\s*=\s*{NUM} w\s*=\s*{NUM}"),
        format!(r"perimeter for rectangle with sides? {NUM} and {NUM}"),
        r"rectangle length (\d+\.?\d*) width (\d+\.?\d*) perimeter".to_string(),
        r"perimeter of rect:?\s*(\d+\.?\d*)\s*by\s*(\d+\.?\d*)".to_string(),
    ];
    let cube = [
        format!(r"volume of (?:a )?cube(?: with side)?\s*=?\s*{NUM}"),
        format!(r"cube volume s\s*=\s*{NUM}"),
        format!(r"what is the volume of a cube with edge length {NUM}"),
        r"cube side (\d+\.?\d*) volume".to_string(),
        r"volume of cube:?\s*(\d+\.?\d*)".to_string(),
    ];
    let triangle = [
        format!(
            r"area of (?:a )?triangle(?: with base)?\s*=?\s*{NUM}\s*(?:[,x]|and)?\s*(?:height)?\s*=?\s*{NUM}"
        ),
        format!(r"triangle area b\s*=\s*{NUM} h\s*=\s*{NUM}"),
        format!(r"area for triangle with base {NUM} and height {NUM}"),
        r"triangle base (\d+\.?\d*) height (\d+\.?\d*) area".to_string(),
        r"area of triangle:?\s*base\s*(\d+\.?\d*)\s*height\s*(\d+\.?\d*)".to_string(),
    ];

    let blocks = [
        (HandlerName::CircleArea, circle),
        (HandlerName::RectanglePerimeter, rectangle),
        (HandlerName::CubeVolume, cube),
        (HandlerName::TriangleArea, triangle),
    ];

    blocks
        .iter()
        .flat_map(|(handler, patterns)| {
            patterns
                .iter()
                .map(move |pattern| Rule::numeric(pattern, *handler))
        })
        .collect()
});

static PRODUCT_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::keyword(
            r"\b(?:price[sd]?|pricing|live|current|today)\b",
            Route::Single(HandlerName::WebSearch),
        ),
        Rule::keyword(
            r"\b(?:specs?|specifications?|features?|compare|comparison|differences?)\b",
            Route::Single(HandlerName::VectorSearch),
        ),
        Rule::keyword(r"\b(?:best|recommend\w*|top|under)\b", Route::Combined),
    ]
});

/// Ordered rules for a set of domains.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Rules for the given domains, in the given order. Duplicate domains
    /// are only added once.
    pub fn for_domains(domains: &[Domain]) -> Self {
        let mut seen = Vec::new();
        let mut rules = Vec::new();
        for domain in domains {
            if seen.contains(domain) {
                continue;
            }
            seen.push(*domain);
            rules.extend(Self::domain_rules(*domain).iter().cloned());
        }
        Self { rules }
    }

    fn domain_rules(domain: Domain) -> &'static [Rule] {
        match domain {
            Domain::Geometry => &GEOMETRY_RULES,
            Domain::Products => &PRODUCT_RULES,
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
