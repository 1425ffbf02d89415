//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidHost(String),

    #[error("Invalid timeout for {0}")]
    InvalidTimeout(&'static str),

    #[error("Invalid URL for {0}: must start with http:// or https://")]
    InvalidUrl(&'static str),

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: u64,
        max: u64,
    },

    #[error("Unknown domain: {0}")]
    UnknownDomain(String),

    #[error("At least one domain must be enabled")]
    NoDomains,

    #[error("Gemini embeddings require a Gemini API key")]
    EmbedderRequiresGeminiKey,

    #[error("server.request_timeout_secs ({request}) must exceed the model and search deadlines ({required}s)")]
    RequestTimeoutTooShort { request: u64, required: u64 },
}

pub(super) fn check_url(field: &'static str, url: &str) -> Result<(), ValidationError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ValidationError::InvalidUrl(field))
    }
}

pub(super) fn check_range(
    field: &'static str,
    value: u64,
    min: u64,
    max: u64,
) -> Result<(), ValidationError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange { field, min, max })
    }
}
