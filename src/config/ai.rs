//! Model fallback configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::{check_range, check_url, ValidationError};
use crate::adapters::ai::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use crate::application::DEFAULT_MAX_OUTPUT_TOKENS;

/// Model fallback configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Gemini API key. Without one the offline keyword provider is used.
    pub gemini_api_key: Option<String>,

    /// Gemini model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Gemini API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Output token budget for a classification reply
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Attach summaries to retrieval results
    #[serde(default = "default_summarize")]
    pub summarize: bool,

    /// Deadline for a model-written summary, in seconds
    #[serde(default = "default_timeout")]
    pub summary_timeout_secs: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get summary deadline as Duration
    pub fn summary_timeout(&self) -> Duration {
        Duration::from_secs(self.summary_timeout_secs)
    }

    /// Summaries are written by the model only when one is configured.
    pub fn uses_model_summaries(&self) -> bool {
        self.summarize && self.has_gemini()
    }

    /// Longest a request can spend waiting on the model, in seconds.
    pub fn model_budget_secs(&self) -> u64 {
        let summary = if self.uses_model_summaries() {
            self.summary_timeout_secs
        } else {
            0
        };
        self.timeout_secs + summary
    }

    /// Check if Gemini is configured
    pub fn has_gemini(&self) -> bool {
        self.gemini_api_key
            .as_ref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AI__MODEL"));
        }
        check_url("ai.base_url", &self.base_url)?;
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout("ai.timeout_secs"));
        }
        check_range("ai.max_output_tokens", self.max_output_tokens.into(), 16, 8192)?;
        if self.summary_timeout_secs == 0 || self.summary_timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout("ai.summary_timeout_secs"));
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_output_tokens: default_max_output_tokens(),
            summarize: default_summarize(),
            summary_timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_GEMINI_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_max_output_tokens() -> u32 {
    DEFAULT_MAX_OUTPUT_TOKENS
}

fn default_summarize() -> bool {
    true
}
