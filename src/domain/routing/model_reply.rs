//! Structured-output parsing for model classification replies.
//!
//! The model is asked for a single JSON object shaped as
//! `{"tool_call": <name|null>, "args": {...}, "explain"|"response": <text>}`.
//! Replies come back over an unstructured text channel, so parsing is
//! best-effort:
//!
//! 1. strict JSON parse of the trimmed reply, with Markdown code fences removed;
//! 2. as a last resort, parse the slice from the first `{` to the last `}`;
//! 3. the parsed value must deserialize into the expected reply shape.
//!
//! A reply that fails all three is free text, not an error.

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::{ArgValue, Arguments, Route};

/// Why a reply could not be read as a structured object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplyParseError {
    #[error("reply is empty")]
    Empty,

    #[error("reply contains no JSON object")]
    NotJson,

    #[error("reply JSON has an unexpected shape: {0}")]
    UnexpectedShape(String),
}

/// The expected reply object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ModelReply {
    #[serde(default, alias = "route")]
    pub tool_call: Option<String>,
    #[serde(default)]
    pub args: Option<Map<String, Value>>,
    #[serde(default)]
    pub explain: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
}

impl ModelReply {
    /// Free text carried by the reply, preferring `response`.
    pub fn text(&self) -> Option<&str> {
        self.response
            .as_deref()
            .or(self.explain.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Scalar arguments as an [`Arguments`] bundle. Non-scalar values are dropped.
    pub fn arguments(&self) -> Arguments {
        let mut args = Arguments::new();
        if let Some(map) = &self.args {
            for (name, value) in map {
                match value {
                    Value::Number(n) => {
                        if let Some(n) = n.as_f64() {
                            args.insert(name.as_str(), n);
                        }
                    }
                    Value::String(s) => args.insert(name.as_str(), s.as_str()),
                    _ => {}
                }
            }
        }
        args
    }
}

/// Parses a model reply into the expected shape.
pub fn parse_structured_reply(text: &str) -> Result<ModelReply, ReplyParseError> {
    let trimmed = strip_code_fence(text.trim());
    if trimmed.is_empty() {
        return Err(ReplyParseError::Empty);
    }

    let value = match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => value,
        Err(_) => scan_object(trimmed).ok_or(ReplyParseError::NotJson)?,
    };

    if !value.is_object() {
        return Err(ReplyParseError::UnexpectedShape(format!(
            "expected an object, got {}",
            json_kind(&value)
        )));
    }

    serde_json::from_value(value).map_err(|e| ReplyParseError::UnexpectedShape(e.to_string()))
}

/// Last-resort extraction: the first `{` through the last `}`.
fn scan_object(text: &str) -> Option<Value> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string ("json") on the opening fence line.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// What the pipeline should do with a model reply.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelDecision {
    /// The model named a known route with complete arguments.
    Call { route: Route, args: Arguments },
    /// The model answered in free text (or its structured answer was unusable).
    Reply(String),
    /// The model could not be reached or returned nothing usable.
    Unavailable(String),
}

impl ModelDecision {
    /// Interprets raw reply text for the query it answers.
    ///
    /// `allowed` limits which routes the model may pick; anything else is
    /// treated as free text.
    pub fn from_reply(text: &str, query: &str, allowed: &[Route]) -> Self {
        let reply = match parse_structured_reply(text) {
            Ok(reply) => reply,
            Err(ReplyParseError::Empty) => {
                return ModelDecision::Unavailable("model returned an empty reply".to_string())
            }
            Err(_) => return ModelDecision::Reply(text.trim().to_string()),
        };

        let named = reply
            .tool_call
            .as_deref()
            .and_then(|name| name.parse::<Route>().ok())
            .filter(|route| allowed.contains(route));

        if let Some(route) = named {
            if let Some(args) = complete_arguments(route, &reply.arguments(), query) {
                return ModelDecision::Call { route, args };
            }
        }

        match reply.text() {
            Some(text) => ModelDecision::Reply(text.to_string()),
            None => ModelDecision::Reply(UNUSABLE_REPLY.to_string()),
        }
    }
}

/// Reply text used when the model's answer carried nothing to show.
pub const UNUSABLE_REPLY: &str = "Could not process query";

/// Checks a route's arguments and normalizes them for dispatch.
///
/// Numeric params must all be present and numeric. Retrieval routes take an
/// optional `query`, defaulting to the original query.
pub fn complete_arguments(route: Route, args: &Arguments, query: &str) -> Option<Arguments> {
    match route {
        Route::Single(handler) if !handler.is_retrieval() => {
            let mut complete = Arguments::new();
            for name in handler.params() {
                complete.insert(*name, args.number(name)?);
            }
            Some(complete)
        }
        _ => {
            let text = args
                .get("query")
                .map(|value| match value {
                    ArgValue::Text(s) => s.trim().to_string(),
                    ArgValue::Number(n) => n.to_string(),
                })
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| query.trim().to_string());
            Some(Arguments::new().with("query", text))
        }
    }
}
