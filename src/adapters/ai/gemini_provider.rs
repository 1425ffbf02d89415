//! Gemini Provider - Implementation of AIProvider for Google's Gemini API.
//!
//! Calls `models/{model}:generateContent` with the API key in the
//! `x-goog-api-key` header. JSON output is requested through
//! `generationConfig.responseMimeType`.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-1.5-flash")
//!     .with_timeout(Duration::from_secs(10));
//!
//! let provider = GeminiProvider::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, MessageRole,
    ProviderInfo, ResponseFormat, TokenUsage,
};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gemini-1.5-flash").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    pub(crate) fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini API provider implementation.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::unavailable(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    /// Converts our request to Gemini's format.
    fn to_gemini_request(request: &CompletionRequest) -> GeminiRequest {
        let contents = request
            .messages
            .iter()
            .map(|msg| GeminiContent {
                role: Some(
                    match msg.role {
                        MessageRole::User => "user",
                        MessageRole::Assistant => "model",
                    }
                    .to_string(),
                ),
                parts: vec![GeminiPart {
                    text: msg.content.clone(),
                }],
            })
            .collect();

        let system_instruction = request.system_prompt.as_ref().map(|prompt| GeminiContent {
            role: None,
            parts: vec![GeminiPart {
                text: prompt.clone(),
            }],
        });

        GeminiRequest {
            system_instruction,
            contents,
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
                response_mime_type: match request.response_format {
                    ResponseFormat::Json => Some("application/json".to_string()),
                    ResponseFormat::Text => None,
                },
            },
        }
    }

    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        let body = Self::to_gemini_request(request);

        self.client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::timeout(self.config.timeout.as_secs())
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    /// Maps non-success statuses to provider errors.
    async fn handle_response_status(response: Response) -> Result<Response, AIError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(AIError::AuthenticationFailed),
            // Gemini reports a bad key as a 400 with this reason.
            400 if error_body.contains("API_KEY_INVALID") => Err(AIError::AuthenticationFailed),
            400 => Err(AIError::InvalidRequest(error_body)),
            429 => Err(AIError::rate_limited(30)),
            500..=599 => Err(AIError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(AIError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Turns a decoded Gemini response into a completion.
    fn into_completion(
        response: GeminiResponse,
        fallback_model: &str,
    ) -> Result<CompletionResponse, AIError> {
        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return Err(AIError::content_filtered(reason));
        }

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AIError::parse("No candidates in response"))?;

        let finish_reason = match candidate.finish_reason.as_deref() {
            Some("STOP") | None => FinishReason::Stop,
            Some("MAX_TOKENS") => FinishReason::Length,
            Some("SAFETY") | Some("BLOCKLIST") | Some("PROHIBITED_CONTENT") => {
                FinishReason::ContentFilter
            }
            Some(_) => FinishReason::Other,
        };

        let content: String = candidate
            .content
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        let usage = response
            .usage_metadata
            .map(|u| TokenUsage::new(u.prompt_token_count, u.candidates_token_count))
            .unwrap_or_default();

        Ok(CompletionResponse {
            content,
            usage,
            model: response
                .model_version
                .unwrap_or_else(|| fallback_model.to_string()),
            finish_reason,
        })
    }
}

#[async_trait]
impl AIProvider for GeminiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let response = self.send_request(&request).await?;
        let response = Self::handle_response_status(response).await?;

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        Self::into_completion(gemini_response, &self.config.model)
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("gemini", self.config.model.clone())
    }
}

// Gemini API wire types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    usage_metadata: Option<GeminiUsage>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn config_builder_works() {
        let config = GeminiConfig::new("test-key")
            .with_model("gemini-1.5-pro-latest")
            .with_base_url("https://custom.api.com/")
            .with_timeout(Duration::from_secs(3));

        assert_eq!(config.model, "gemini-1.5-pro-latest");
        assert_eq!(config.base_url, "https://custom.api.com");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn generate_url_includes_model() {
        let provider = GeminiProvider::new(GeminiConfig::new("k")).unwrap();
        assert_eq!(
            provider.generate_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn request_carries_system_prompt_and_json_mime_type() {
        let request = CompletionRequest::new()
            .with_system_prompt("classify")
            .with_message(MessageRole::User, "tell me a joke")
            .with_temperature(0.0)
            .with_max_tokens(256)
            .with_json_output();

        let body = serde_json::to_value(GeminiProvider::to_gemini_request(&request)).unwrap();

        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "classify");
        assert!(body["systemInstruction"].get("role").is_none());
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "tell me a joke");
        assert_eq!(body["generationConfig"]["temperature"], 0.0);
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 256);
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
    }

    #[test]
    fn text_request_omits_mime_type() {
        let request = CompletionRequest::new().with_message(MessageRole::User, "hi");
        let body = serde_json::to_value(GeminiProvider::to_gemini_request(&request)).unwrap();
        assert!(body["generationConfig"].get("responseMimeType").is_none());
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn response_parts_are_concatenated() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "{\"tool_call\": "}, {"text": "null}"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 4, "totalTokenCount": 16},
            "modelVersion": "gemini-1.5-flash-002"
        }))
        .unwrap();

        let completion = GeminiProvider::into_completion(response, "gemini-1.5-flash").unwrap();
        assert_eq!(completion.content, "{\"tool_call\": null}");
        assert_eq!(completion.usage.total_tokens, 16);
        assert_eq!(completion.model, "gemini-1.5-flash-002");
        assert_eq!(completion.finish_reason, FinishReason::Stop);
    }

    #[test]
    fn blocked_prompt_is_content_filtered() {
        let response: GeminiResponse =
            serde_json::from_value(json!({"promptFeedback": {"blockReason": "SAFETY"}})).unwrap();
        let err = GeminiProvider::into_completion(response, "m").unwrap_err();
        assert!(matches!(err, AIError::ContentFiltered { .. }));
    }

    #[test]
    fn empty_candidates_is_a_parse_error() {
        let response: GeminiResponse = serde_json::from_value(json!({"candidates": []})).unwrap();
        let err = GeminiProvider::into_completion(response, "m").unwrap_err();
        assert!(matches!(err, AIError::Parse(_)));
    }

    #[test]
    fn max_tokens_maps_to_length() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "partial"}]}, "finishReason": "MAX_TOKENS"}]
        }))
        .unwrap();
        let completion = GeminiProvider::into_completion(response, "m").unwrap();
        assert_eq!(completion.finish_reason, FinishReason::Length);
        assert_eq!(completion.model, "m");
    }

    #[test]
    fn provider_info_reports_model() {
        let provider =
            GeminiProvider::new(GeminiConfig::new("k").with_model("gemini-pro")).unwrap();
        assert_eq!(provider.provider_info(), ProviderInfo::new("gemini", "gemini-pro"));
    }
}
