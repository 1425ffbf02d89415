//! Recommendation summaries over retrieval output.
//!
//! Web, catalog and combined results get a short summary. When a model is
//! configured it writes the summary within a deadline; without one, or when
//! the model fails, a template names the top catalog records instead.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::domain::retrieval::{RecordHit, Retrieved, WebResult};
use crate::domain::routing::HandlerOutput;
use crate::ports::{AIError, AIProvider, CompletionRequest, FinishReason, MessageRole};

/// Summary text when there is nothing to recommend.
pub const NO_SUMMARY: &str = "Could not generate summary";

/// Output budget for a summary reply.
pub const DEFAULT_SUMMARY_TOKENS: u32 = 1024;

/// Names listed by the template summary.
const TEMPLATE_NAMES: usize = 3;

const SUMMARY_INSTRUCTIONS: &str = "You are a product recommendation expert. \
Summarize the web research and product database results you are given for the user's query.\n\
1. Identify key information from web research (prices, reviews, availability).\n\
2. Highlight relevant products from the database (specs, features).\n\
3. Give a concise recommendation and name sources where applicable.\n\
Be objective and factual, highlight differences between products, and answer in Markdown.";

enum Mode {
    Off,
    Template,
    Model {
        provider: Arc<dyn AIProvider>,
        timeout: Duration,
    },
}

/// Writes the summary attached to retrieval results.
pub struct Summarizer {
    mode: Mode,
    max_output_tokens: u32,
}

impl Summarizer {
    /// No summaries at all.
    pub fn off() -> Self {
        Self {
            mode: Mode::Off,
            max_output_tokens: DEFAULT_SUMMARY_TOKENS,
        }
    }

    /// Template summaries only; the model is never called.
    pub fn template() -> Self {
        Self {
            mode: Mode::Template,
            ..Self::off()
        }
    }

    /// Model-written summaries, falling back to the template.
    pub fn model(provider: Arc<dyn AIProvider>, timeout: Duration) -> Self {
        Self {
            mode: Mode::Model { provider, timeout },
            ..Self::off()
        }
    }

    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = max;
        self
    }

    /// Summary for a handler output. Numeric outputs never get one.
    pub async fn summarize(&self, query: &str, output: &HandlerOutput) -> Option<String> {
        let (records, web) = match output {
            HandlerOutput::Numeric { .. } => return None,
            HandlerOutput::Web(web) => (None, Some(web)),
            HandlerOutput::Records(records) => (Some(records), None),
            HandlerOutput::Combined { database, web } => (Some(database), Some(web)),
        };

        match &self.mode {
            Mode::Off => None,
            Mode::Template => Some(template_summary(query, records, web)),
            Mode::Model { provider, timeout } => {
                match self.ask(provider.as_ref(), *timeout, query, records, web).await {
                    Ok(text) => Some(text),
                    Err(e) => {
                        warn!(
                            provider = %provider.provider_info().name,
                            error = %e,
                            "summary model failed; using template"
                        );
                        Some(template_summary(query, records, web))
                    }
                }
            }
        }
    }

    async fn ask(
        &self,
        provider: &dyn AIProvider,
        deadline: Duration,
        query: &str,
        records: Option<&Retrieved<RecordHit>>,
        web: Option<&Retrieved<WebResult>>,
    ) -> Result<String, AIError> {
        let request = CompletionRequest::new()
            .with_system_prompt(SUMMARY_INSTRUCTIONS)
            .with_message(MessageRole::User, summary_prompt(query, records, web))
            .with_max_tokens(self.max_output_tokens)
            .with_temperature(0.3);

        let response = match timeout(deadline, provider.complete(request)).await {
            Ok(result) => result?,
            Err(_) => return Err(AIError::timeout(deadline.as_secs())),
        };

        debug!(
            model = %response.model,
            finish_reason = ?response.finish_reason,
            prompt_tokens = response.usage.prompt_tokens,
            completion_tokens = response.usage.completion_tokens,
            "summary written"
        );
        if response.finish_reason == FinishReason::Length {
            warn!(model = %response.model, "summary hit the output token limit");
        }

        let text = response.content.trim();
        if text.is_empty() {
            return Err(AIError::parse("empty summary"));
        }
        Ok(text.to_string())
    }
}

/// User message carrying the query and both result lists.
pub fn summary_prompt(
    query: &str,
    records: Option<&Retrieved<RecordHit>>,
    web: Option<&Retrieved<WebResult>>,
) -> String {
    format!(
        "Web Research Results:\n{}\n\nProduct Database Results:\n{}\n\nUser Query:\n{}",
        section(web),
        section(records),
        query
    )
}

fn section<T: serde::Serialize>(source: Option<&Retrieved<T>>) -> String {
    match source {
        None => "(not searched)".to_string(),
        Some(retrieved) if !retrieved.is_available() => format!(
            "(unavailable: {})",
            retrieved.detail.as_deref().unwrap_or("no detail")
        ),
        Some(retrieved) => {
            serde_json::to_string_pretty(&retrieved.items).unwrap_or_else(|_| "[]".to_string())
        }
    }
}

/// Deterministic summary naming the top catalog records, or the top web
/// titles when the catalog returned nothing.
pub fn template_summary(
    query: &str,
    records: Option<&Retrieved<RecordHit>>,
    web: Option<&Retrieved<WebResult>>,
) -> String {
    let mut names: Vec<&str> = records
        .map(|r| {
            r.items
                .iter()
                .take(TEMPLATE_NAMES)
                .map(|hit| hit.record.name.as_str())
                .collect()
        })
        .unwrap_or_default();
    if names.is_empty() {
        names = web
            .map(|w| {
                w.items
                    .iter()
                    .take(TEMPLATE_NAMES)
                    .map(|item| item.title.as_str())
                    .collect()
            })
            .unwrap_or_default();
    }

    if names.is_empty() {
        NO_SUMMARY.to_string()
    } else {
        format!(
            "Based on your query '{}', I recommend: {}",
            query,
            names.join(", ")
        )
    }
}
