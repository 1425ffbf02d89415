//! Model fallback for queries no rule matched.
//!
//! The model is shown the enabled routes and asked for one JSON object. Its
//! reply is interpreted by [`ModelDecision::from_reply`]; provider failures
//! and timeouts become [`ModelDecision::Unavailable`].

use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::domain::routing::{HandlerName, ModelDecision, Route};
use crate::ports::{AIError, AIProvider, CompletionRequest, FinishReason, MessageRole};

/// Default output budget for a classification reply.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 512;

fn describe(route: Route) -> &'static str {
    match route {
        Route::Single(HandlerName::CircleArea) => "area of a circle",
        Route::Single(HandlerName::RectanglePerimeter) => "perimeter of a rectangle",
        Route::Single(HandlerName::CubeVolume) => "volume of a cube",
        Route::Single(HandlerName::TriangleArea) => "area of a triangle",
        Route::Single(HandlerName::WebSearch) => {
            "live web search for prices, news and current availability"
        }
        Route::Single(HandlerName::VectorSearch) => {
            "search the product catalog for specs, features and comparisons"
        }
        Route::Combined => "catalog search plus web search, for recommendations",
    }
}

/// Builds the classification prompt for a set of routes.
pub fn system_prompt(routes: &[Route]) -> String {
    let mut prompt = String::from(
        "You classify user queries for a tool router. Available tools:\n",
    );
    for route in routes {
        let _ = writeln!(
            prompt,
            "- {}({}): {}",
            route,
            route.params().join(", "),
            describe(*route)
        );
    }
    prompt.push_str(
        "\nRespond with exactly one JSON object and nothing else:\n\
         {\"tool_call\": <tool name or null>, \"args\": {<param>: <value>}, \"explain\": <short reason>}\n\
         Numeric parameters must be numbers. Search tools take a \"query\" string.\n\
         If no tool applies, set \"tool_call\" to null and put your answer in \"response\".",
    );
    prompt
}

/// Asks the model to classify (or answer) a query.
pub struct ModelFallback {
    provider: Arc<dyn AIProvider>,
    timeout: Duration,
    max_output_tokens: u32,
    allowed: Vec<Route>,
    system_prompt: String,
}

impl ModelFallback {
    pub fn new(provider: Arc<dyn AIProvider>, allowed: Vec<Route>, timeout: Duration) -> Self {
        Self {
            system_prompt: system_prompt(&allowed),
            provider,
            timeout,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            allowed,
        }
    }

    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = max;
        self
    }

    pub fn allowed(&self) -> &[Route] {
        &self.allowed
    }

    pub async fn resolve(&self, query: &str) -> ModelDecision {
        let request = CompletionRequest::new()
            .with_system_prompt(self.system_prompt.clone())
            .with_message(MessageRole::User, query)
            .with_max_tokens(self.max_output_tokens)
            .with_temperature(0.0)
            .with_json_output();

        let outcome = match timeout(self.timeout, self.provider.complete(request)).await {
            Ok(result) => result,
            Err(_) => Err(AIError::timeout(self.timeout.as_secs())),
        };

        match outcome {
            Ok(response) => {
                debug!(
                    model = %response.model,
                    finish_reason = ?response.finish_reason,
                    prompt_tokens = response.usage.prompt_tokens,
                    completion_tokens = response.usage.completion_tokens,
                    "model replied"
                );
                if response.finish_reason == FinishReason::Length {
                    warn!(
                        model = %response.model,
                        max_tokens = self.max_output_tokens,
                        "model reply hit the output token limit"
                    );
                }
                ModelDecision::from_reply(&response.content, query, &self.allowed)
            }
            Err(e) => {
                warn!(
                    provider = %self.provider.provider_info().name,
                    error = %e,
                    "model fallback failed"
                );
                ModelDecision::Unavailable(e.to_string())
            }
        }
    }
}
