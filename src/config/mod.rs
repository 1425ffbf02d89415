//! Service configuration.
//!
//! Every setting comes from the environment (plus an optional `.env`), read
//! through `config` with the `QUERY_ROUTER` prefix and `__` between nesting
//! levels. Every section has defaults, so an empty environment is a working
//! development setup.
//!
//! # Example
//!
//! ```no_run
//! use query_router::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("enabled domains: {}", config.router.domains);
//! ```

mod ai;
mod error;
mod router;
mod search;
mod server;
mod sessions;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use router::RouterConfig;
pub use search::{EmbedderKind, SearchConfig};
pub use server::{Environment, ServerConfig};
pub use sessions::SessionsConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// development setup (offline model, web search unavailable).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Model fallback configuration (Gemini)
    #[serde(default)]
    pub ai: AiConfig,

    /// Web and catalog search configuration
    #[serde(default)]
    pub search: SearchConfig,

    /// Enabled domains
    #[serde(default)]
    pub router: RouterConfig,

    /// Session log storage
    #[serde(default)]
    pub sessions: SessionsConfig,
}

impl AppConfig {
    /// Reads `.env` (if present) and `QUERY_ROUTER__<SECTION>__<KEY>`
    /// variables, e.g. `QUERY_ROUTER__ROUTER__DOMAINS=geometry`.
    ///
    /// Only type errors fail here; value checks live in [`AppConfig::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("QUERY_ROUTER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Checks every section, then the cross-section rules.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.search.validate()?;
        self.router.validate()?;
        self.sessions.validate()?;
        if self.search.embedder == EmbedderKind::Gemini && !self.ai.has_gemini() {
            return Err(ValidationError::EmbedderRequiresGeminiKey);
        }
        // A request may wait on the model, then search, then a summary.
        let required = self.ai.model_budget_secs() + self.search.timeout_secs;
        if self.server.request_timeout_secs <= required {
            return Err(ValidationError::RequestTimeoutTooShort {
                request: self.server.request_timeout_secs,
                required,
            });
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::routing::Domain;
    use std::env;
    use std::sync::Mutex;

    // Environment variables are process-global.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 7] = [
        "QUERY_ROUTER__SERVER__PORT",
        "QUERY_ROUTER__SERVER__ENVIRONMENT",
        "QUERY_ROUTER__AI__GEMINI_API_KEY",
        "QUERY_ROUTER__SEARCH__TOP_K",
        "QUERY_ROUTER__SEARCH__EMBEDDER",
        "QUERY_ROUTER__ROUTER__DOMAINS",
        "QUERY_ROUTER__SESSIONS__DIRECTORY",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn empty_environment_loads_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert!(!config.ai.has_gemini());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn nested_variables_fill_sections() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("QUERY_ROUTER__SERVER__PORT", "3000");
        env::set_var("QUERY_ROUTER__AI__GEMINI_API_KEY", "AIza-test");
        env::set_var("QUERY_ROUTER__SEARCH__TOP_K", "4");
        env::set_var("QUERY_ROUTER__ROUTER__DOMAINS", "products");
        env::set_var("QUERY_ROUTER__SESSIONS__DIRECTORY", "/tmp/router-sessions");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.ai.has_gemini());
        assert_eq!(config.search.top_k, 4);
        assert_eq!(config.router.domain_list().unwrap(), vec![Domain::Products]);
        assert_eq!(
            config.sessions.directory,
            std::path::PathBuf::from("/tmp/router-sessions")
        );
    }

    #[test]
    fn environment_variable_selects_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("QUERY_ROUTER__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn request_timeout_must_outlast_model_and_search() {
        let mut config = AppConfig::default();
        config.ai.timeout_secs = 60;
        config.server.request_timeout_secs = 30;
        assert_eq!(
            config.validate(),
            Err(ValidationError::RequestTimeoutTooShort {
                request: 30,
                required: 65,
            })
        );

        config.server.request_timeout_secs = 66;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn model_summaries_count_toward_the_request_budget() {
        let mut config = AppConfig::default();
        config.ai.gemini_api_key = Some("AIza-test".to_string());
        config.server.request_timeout_secs = 25;
        assert_eq!(
            config.validate(),
            Err(ValidationError::RequestTimeoutTooShort {
                request: 25,
                required: 25,
            })
        );

        config.ai.summarize = false;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn gemini_embedder_requires_key() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("QUERY_ROUTER__SEARCH__EMBEDDER", "gemini");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.search.embedder, EmbedderKind::Gemini);
        assert_eq!(
            config.validate(),
            Err(ValidationError::EmbedderRequiresGeminiKey)
        );
    }
}
