//! Offline Provider - keyword classifier used when no model API key is set.
//!
//! Looks for a shape keyword plus enough numbers in the query and answers in
//! the same structured-reply shape a real model is asked for, so the rest of
//! the pipeline runs unchanged. Anything else gets a free-text reply saying
//! the model is not configured.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;

use crate::domain::routing::HandlerName;
use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo};

static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+\.?[0-9]*)").expect("number pattern is valid"));

/// Shape keywords checked in order, with the handler they select.
const SHAPES: [(&str, HandlerName); 4] = [
    ("circle", HandlerName::CircleArea),
    ("rectangle", HandlerName::RectanglePerimeter),
    ("cube", HandlerName::CubeVolume),
    ("triangle", HandlerName::TriangleArea),
];

/// Keyword-based stand-in for a text-generation model.
#[derive(Debug, Clone, Default)]
pub struct OfflineProvider;

impl OfflineProvider {
    pub fn new() -> Self {
        Self
    }

    /// Builds the structured reply for a query.
    fn reply_for(query: &str) -> serde_json::Value {
        let lowered = query.to_lowercase();
        let numbers: Vec<f64> = NUMBER
            .captures_iter(&lowered)
            .filter_map(|c| c.get(1)?.as_str().parse().ok())
            .collect();

        for (keyword, handler) in SHAPES {
            let params = handler.params();
            if lowered.contains(keyword) && numbers.len() >= params.len() {
                let args: serde_json::Map<String, serde_json::Value> = params
                    .iter()
                    .zip(&numbers)
                    .map(|(name, value)| (name.to_string(), json!(value)))
                    .collect();
                return json!({
                    "tool_call": handler.as_str(),
                    "args": args,
                    "explain": format!("Detected {} query (offline keyword match)", handler),
                });
            }
        }

        json!({
            "tool_call": null,
            "response": format!(
                "The language model is not configured, so \"{}\" could not be answered.",
                query.trim()
            ),
        })
    }
}

#[async_trait]
impl AIProvider for OfflineProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let query = request
            .last_user_message()
            .ok_or_else(|| AIError::InvalidRequest("no user message".to_string()))?;

        Ok(CompletionResponse::stop(
            Self::reply_for(query).to_string(),
            "offline-keywords",
        ))
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("offline", "offline-keywords")
    }
}
