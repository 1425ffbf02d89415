//! Listener, logging, and HTTP policy settings

use serde::Deserialize;
use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound for the whole-request deadline.
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Selects the log format; production logs are JSON
    pub environment: Environment,

    /// `EnvFilter` directive, overridden by `RUST_LOG`
    pub log_level: String,

    /// Deadline for a whole request, model fallback included
    pub request_timeout_secs: u64,

    /// Comma-separated allowed origins; unset allows any origin
    pub cors_origins: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::Development,
            log_level: "info,query_router=debug,tower_http=info".to_string(),
            request_timeout_secs: 30,
            cors_origins: None,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Configured origins, blanks dropped.
    pub fn cors_origins_list(&self) -> Vec<String> {
        let Some(raw) = &self.cors_origins else {
            return Vec::new();
        };
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        self.socket_addr()
            .map_err(|_| ValidationError::InvalidHost(self.host.clone()))?;
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout("server.request_timeout_secs"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_all_interfaces() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(!config.is_production());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn origins_are_trimmed_and_blanks_dropped() {
        let config = ServerConfig {
            cors_origins: Some(" http://localhost:5173,,http://app.local ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.cors_origins_list(),
            vec!["http://localhost:5173", "http://app.local"]
        );
        assert!(ServerConfig::default().cors_origins_list().is_empty());
    }

    #[test]
    fn bad_listener_settings_are_rejected() {
        let zero_port = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert_eq!(zero_port.validate(), Err(ValidationError::InvalidPort));

        let bad_host = ServerConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert_eq!(
            bad_host.validate(),
            Err(ValidationError::InvalidHost("not a host".to_string()))
        );
    }

    #[test]
    fn request_timeout_must_be_within_bounds() {
        for secs in [0, MAX_REQUEST_TIMEOUT_SECS + 1] {
            let config = ServerConfig {
                request_timeout_secs: secs,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ValidationError::InvalidTimeout(_))
            ));
        }
    }
}
