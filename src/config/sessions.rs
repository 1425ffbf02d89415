//! Session log configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Session log configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionsConfig {
    /// Directory holding one JSON file per session
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
}

impl SessionsConfig {
    /// Validate session configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.directory.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("SESSIONS__DIRECTORY"));
        }
        Ok(())
    }
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("./data/sessions")
}
