//! The normalized response envelope.
//!
//! Every request ends in exactly one of three branches: a handler result,
//! fallback text, or an error message. The branch is an enum internally, so
//! the one-branch rule cannot be broken in code; the flat wire form is
//! re-checked when an envelope is deserialized.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use thiserror::Error;

use super::{Arguments, Provenance, Route};
use crate::domain::retrieval::{RecordHit, Retrieved, WebResult};

/// Fixed precision used when displaying numeric results.
pub const DISPLAY_DECIMALS: usize = 4;

/// What a handler produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HandlerOutput {
    Numeric { value: f64, display: String },
    Web(Retrieved<WebResult>),
    Records(Retrieved<RecordHit>),
    Combined {
        database: Retrieved<RecordHit>,
        web: Retrieved<WebResult>,
    },
}

impl HandlerOutput {
    pub fn numeric(value: f64) -> Self {
        HandlerOutput::Numeric {
            value,
            display: format!("{:.*}", DISPLAY_DECIMALS, value),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            HandlerOutput::Numeric { value, .. } => Some(*value),
            _ => None,
        }
    }
}

/// A dispatched handler with its inputs and output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlerResult {
    pub handler: Route,
    pub args: Arguments,
    pub output: HandlerOutput,
    /// Short recommendation written over retrieval output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl HandlerResult {
    pub fn new(handler: Route, args: Arguments, output: HandlerOutput) -> Self {
        Self {
            handler,
            args,
            output,
            summary: None,
        }
    }

    pub fn with_summary(mut self, summary: Option<String>) -> Self {
        self.summary = summary;
        self
    }
}

/// The populated branch of an envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvelopeBody {
    Result(HandlerResult),
    Fallback(String),
    Error(String),
}

/// Response returned for every query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "EnvelopeWire", try_from = "EnvelopeWire")]
pub struct ResponseEnvelope {
    provenance: Provenance,
    handler: Option<Route>,
    body: EnvelopeBody,
}

impl ResponseEnvelope {
    /// Envelope for a dispatched handler.
    pub fn normalize_result(provenance: Provenance, result: HandlerResult) -> Self {
        Self {
            provenance,
            handler: Some(result.handler),
            body: EnvelopeBody::Result(result),
        }
    }

    /// Envelope for free text produced by (or on behalf of) the model.
    pub fn normalize_fallback(text: impl Into<String>) -> Self {
        Self {
            provenance: Provenance::Model,
            handler: None,
            body: EnvelopeBody::Fallback(text.into()),
        }
    }

    /// Envelope for any failure path. The route is kept when it was resolved.
    pub fn normalize_error(route: Option<Route>, message: impl Into<String>) -> Self {
        Self {
            provenance: Provenance::Error,
            handler: route,
            body: EnvelopeBody::Error(message.into()),
        }
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    pub fn handler(&self) -> Option<Route> {
        self.handler
    }

    pub fn body(&self) -> &EnvelopeBody {
        &self.body
    }

    pub fn handler_result(&self) -> Option<&HandlerResult> {
        match &self.body {
            EnvelopeBody::Result(result) => Some(result),
            _ => None,
        }
    }

    pub fn fallback_text(&self) -> Option<&str> {
        match &self.body {
            EnvelopeBody::Fallback(text) => Some(text),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.body {
            EnvelopeBody::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.body, EnvelopeBody::Error(_))
    }

    /// Markdown rendering used for session transcripts.
    pub fn to_markdown(&self) -> String {
        match &self.body {
            EnvelopeBody::Fallback(text) => text.clone(),
            EnvelopeBody::Error(message) => format!("**Error:** {}", message),
            EnvelopeBody::Result(result) => render_result(result),
        }
    }
}

fn render_result(result: &HandlerResult) -> String {
    let mut out = String::new();
    match &result.output {
        HandlerOutput::Numeric { display, .. } => {
            let _ = write!(out, "**{}**({}) = {}", result.handler, result.args, display);
        }
        HandlerOutput::Web(web) => {
            let _ = writeln!(out, "**{}** ({})", result.handler, result.args);
            render_web(&mut out, web);
        }
        HandlerOutput::Records(records) => {
            let _ = writeln!(out, "**{}** ({})", result.handler, result.args);
            render_records(&mut out, records);
        }
        HandlerOutput::Combined { database, web } => {
            let _ = writeln!(out, "**{}** ({})", result.handler, result.args);
            out.push_str("\n### Catalog\n");
            render_records(&mut out, database);
            out.push_str("\n### Web\n");
            render_web(&mut out, web);
        }
    }
    if let Some(summary) = &result.summary {
        let _ = write!(out, "\n### Summary\n{}\n", summary);
    }
    out.trim_end().to_string()
}

fn render_web(out: &mut String, web: &Retrieved<WebResult>) {
    if !web.is_available() {
        let _ = writeln!(out, "_web search unavailable: {}_", detail(&web.detail));
        return;
    }
    if web.is_empty() {
        out.push_str("_no web results_\n");
    }
    for (rank, item) in web.items.iter().enumerate() {
        let _ = writeln!(out, "{}. [{}]({}): {}", rank + 1, item.title, item.url, item.snippet);
    }
}

fn render_records(out: &mut String, records: &Retrieved<RecordHit>) {
    if !records.is_available() {
        let _ = writeln!(out, "_catalog search unavailable: {}_", detail(&records.detail));
        return;
    }
    if records.is_empty() {
        out.push_str("_no catalog matches_\n");
    }
    for (rank, hit) in records.items.iter().enumerate() {
        let record = &hit.record;
        let price = record
            .price
            .map(|p| format!(" ${:.2}", p))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{}. {} ({}){}: {}",
            rank + 1,
            record.name,
            record.category,
            price,
            record.description
        );
    }
}

fn detail(detail: &Option<String>) -> &str {
    detail.as_deref().unwrap_or("no detail")
}

/// Error for a wire envelope that does not carry exactly one branch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    #[error("envelope must carry exactly one of handler_result, fallback_text, error; found {0}")]
    BranchCount(usize),

    #[error("handler {outer:?} does not match handler_result.handler {inner}")]
    HandlerMismatch { outer: Option<Route>, inner: Route },
}

/// Flat wire form: all three branches present as nullable fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EnvelopeWire {
    provenance: Provenance,
    #[serde(default)]
    handler: Option<Route>,
    #[serde(default)]
    handler_result: Option<HandlerResult>,
    #[serde(default)]
    fallback_text: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl From<ResponseEnvelope> for EnvelopeWire {
    fn from(envelope: ResponseEnvelope) -> Self {
        let mut wire = EnvelopeWire {
            provenance: envelope.provenance,
            handler: envelope.handler,
            handler_result: None,
            fallback_text: None,
            error: None,
        };
        match envelope.body {
            EnvelopeBody::Result(result) => wire.handler_result = Some(result),
            EnvelopeBody::Fallback(text) => wire.fallback_text = Some(text),
            EnvelopeBody::Error(message) => wire.error = Some(message),
        }
        wire
    }
}

impl TryFrom<EnvelopeWire> for ResponseEnvelope {
    type Error = EnvelopeError;

    fn try_from(wire: EnvelopeWire) -> Result<Self, Self::Error> {
        let populated = usize::from(wire.handler_result.is_some())
            + usize::from(wire.fallback_text.is_some())
            + usize::from(wire.error.is_some());
        if populated != 1 {
            return Err(EnvelopeError::BranchCount(populated));
        }

        let body = match (wire.handler_result, wire.fallback_text, wire.error) {
            (Some(result), _, _) => {
                if wire.handler != Some(result.handler) {
                    return Err(EnvelopeError::HandlerMismatch {
                        outer: wire.handler,
                        inner: result.handler,
                    });
                }
                EnvelopeBody::Result(result)
            }
            (_, Some(text), _) => EnvelopeBody::Fallback(text),
            (_, _, Some(message)) => EnvelopeBody::Error(message),
            (None, None, None) => return Err(EnvelopeError::BranchCount(0)),
        };

        Ok(Self {
            provenance: wire.provenance,
            handler: wire.handler,
            body,
        })
    }
}
