//! Argument bundles passed to handlers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single argument value: numeric for geometry, text for retrieval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Number(f64),
    Text(String),
}

impl ArgValue {
    /// Numeric view. Numeric-looking text counts, since model replies
    /// sometimes quote their numbers.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ArgValue::Number(n) => Some(*n),
            ArgValue::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ArgValue::Text(s) => Some(s),
            ArgValue::Number(_) => None,
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Number(n) => write!(f, "{}", n),
            ArgValue::Text(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<f64> for ArgValue {
    fn from(n: f64) -> Self {
        ArgValue::Number(n)
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::Text(s.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        ArgValue::Text(s)
    }
}

/// Named arguments for one handler invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Arguments(BTreeMap<String, ArgValue>);

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an argument.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ArgValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.0.get(name)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(ArgValue::as_number)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ArgValue::as_text)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ArgValue)> {
        self.0.iter()
    }
}

impl fmt::Display for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .0
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        write!(f, "{}", rendered.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_text_reads_as_number() {
        let args = Arguments::new().with("radius", "5").with("side", 2.5);
        assert_eq!(args.number("radius"), Some(5.0));
        assert_eq!(args.number("side"), Some(2.5));
        assert_eq!(args.number("missing"), None);
    }

    #[test]
    fn non_numeric_text_is_not_a_number() {
        let args = Arguments::new().with("radius", "five");
        assert_eq!(args.number("radius"), None);
        assert_eq!(args.text("radius"), Some("five"));
    }

    #[test]
    fn serializes_as_flat_json_object() {
        let args = Arguments::new().with("length", 3.0).with("width", 4.0);
        let json = serde_json::to_value(&args).unwrap();
        assert_eq!(json, serde_json::json!({"length": 3.0, "width": 4.0}));
    }

    #[test]
    fn deserializes_numbers_and_strings() {
        let args: Arguments =
            serde_json::from_str(r#"{"radius": 5, "query": "laptops"}"#).unwrap();
        assert_eq!(args.get("radius"), Some(&ArgValue::Number(5.0)));
        assert_eq!(args.text("query"), Some("laptops"));
    }

    #[test]
    fn displays_name_value_pairs() {
        let args = Arguments::new().with("base", 3.0).with("height", 4.5);
        assert_eq!(args.to_string(), "base=3, height=4.5");
    }
}
