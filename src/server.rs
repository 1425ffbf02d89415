//! Service bootstrap: tracing, adapter selection, and router assembly.

use axum::Router;
use std::net::AddrParseError;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::adapters::ai::{GeminiConfig, GeminiProvider, OfflineProvider};
use crate::adapters::http::{app_router, QueryHandlers, SessionHandlers};
use crate::adapters::search::{DisabledWebSearch, TavilyConfig, TavilySearch};
use crate::adapters::storage::FileSessionStore;
use crate::adapters::vector::{
    builtin_catalog, load_catalog, GeminiEmbedder, HashingEmbedder, InMemoryVectorIndex,
    DEFAULT_EMBEDDING_MODEL,
};
use crate::application::{
    Dispatcher, GetSessionHandler, HandlerRegistry, ListSessionsHandler, ModelFallback,
    ProcessQueryHandler, SaveSessionHandler, Summarizer, VectorSearchHandler, WebSearchHandler,
};
use crate::config::{AppConfig, ConfigError, EmbedderKind, ValidationError};
use crate::domain::routing::{Domain, PatternClassifier};
use crate::ports::{
    AIError, AIProvider, Embedder, SearchError, SessionStore, VectorIndex, WebSearchProvider,
};

/// Errors that stop the service from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to initialize model provider: {0}")]
    Provider(#[from] AIError),

    #[error("Failed to initialize search: {0}")]
    Search(#[from] SearchError),

    #[error("Invalid bind address: {0}")]
    Address(#[from] AddrParseError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured filter. Production logs are JSON.
pub fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if config.is_production() {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if result.is_err() {
        warn!("tracing subscriber already installed");
    }
}

/// Port implementations the router is built from.
#[derive(Clone)]
pub struct Components {
    pub provider: Arc<dyn AIProvider>,
    pub web_search: Arc<dyn WebSearchProvider>,
    pub vector_index: Arc<dyn VectorIndex>,
    pub sessions: Arc<dyn SessionStore>,
}

impl Components {
    /// Selects adapters from configuration.
    ///
    /// Missing API keys fall back to the offline model and disabled web
    /// search. The catalog is only embedded when the products domain is on.
    pub async fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        let domains = config.router.domain_list()?;

        let provider: Arc<dyn AIProvider> = match &config.ai.gemini_api_key {
            Some(key) if config.ai.has_gemini() => {
                info!(model = %config.ai.model, "using Gemini for model fallback");
                Arc::new(GeminiProvider::new(gemini_config(config, key, &config.ai.model))?)
            }
            _ => {
                warn!("no Gemini API key configured; using offline keyword fallback");
                Arc::new(OfflineProvider::new())
            }
        };

        let web_search: Arc<dyn WebSearchProvider> = match &config.search.tavily_api_key {
            Some(key) if config.search.has_tavily() => Arc::new(TavilySearch::new(
                TavilyConfig::new(key.clone())
                    .with_base_url(config.search.tavily_base_url.clone())
                    .with_timeout(config.search.timeout()),
            )?),
            _ => {
                if domains.contains(&Domain::Products) {
                    warn!("no Tavily API key configured; web search will be unavailable");
                }
                Arc::new(DisabledWebSearch)
            }
        };

        let vector_index = Self::catalog_index(config, domains.contains(&Domain::Products)).await?;

        let sessions: Arc<dyn SessionStore> =
            Arc::new(FileSessionStore::new(&config.sessions.directory));

        Ok(Self {
            provider,
            web_search,
            vector_index,
            sessions,
        })
    }

    async fn catalog_index(
        config: &AppConfig,
        enabled: bool,
    ) -> Result<Arc<dyn VectorIndex>, StartupError> {
        let embedder: Arc<dyn Embedder> = match (&config.search.embedder, &config.ai.gemini_api_key)
        {
            (EmbedderKind::Gemini, Some(key)) => Arc::new(GeminiEmbedder::new(gemini_config(
                config,
                key,
                DEFAULT_EMBEDDING_MODEL,
            ))?),
            (EmbedderKind::Gemini, None) => return Err(ValidationError::EmbedderRequiresGeminiKey.into()),
            (EmbedderKind::Hashing, _) => {
                Arc::new(HashingEmbedder::new(config.search.hashing_dimensions))
            }
        };

        let records = if !enabled {
            Vec::new()
        } else if let Some(path) = &config.search.catalog_path {
            load_catalog(path).await?
        } else {
            builtin_catalog()
        };

        Ok(Arc::new(InMemoryVectorIndex::build(embedder, records).await?))
    }
}

fn gemini_config(config: &AppConfig, key: &str, model: &str) -> GeminiConfig {
    GeminiConfig::new(key)
        .with_model(model)
        .with_base_url(config.ai.base_url.clone())
        .with_timeout(config.ai.timeout())
}

/// Handler registry for the enabled domains.
pub fn build_registry(
    config: &AppConfig,
    domains: &[Domain],
    components: &Components,
) -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    for domain in domains {
        registry = match domain {
            Domain::Geometry => registry.with_geometry(),
            Domain::Products => registry
                .with(Arc::new(WebSearchHandler::new(
                    components.web_search.clone(),
                    config.search.max_results,
                    config.search.timeout(),
                )))
                .with(Arc::new(VectorSearchHandler::new(
                    components.vector_index.clone(),
                    config.search.top_k,
                    config.search.timeout(),
                ))),
        };
    }
    registry
}

/// Model summaries need a configured key; otherwise the template is used.
fn summarizer(config: &AppConfig, components: &Components) -> Summarizer {
    if !config.ai.summarize {
        Summarizer::off()
    } else if config.ai.uses_model_summaries() {
        Summarizer::model(components.provider.clone(), config.ai.summary_timeout())
    } else {
        Summarizer::template()
    }
}

/// Builds the full HTTP application from configuration and components.
pub fn build_router(config: &AppConfig, components: Components) -> Result<Router, StartupError> {
    let domains = config.router.domain_list()?;
    let registry = build_registry(config, &domains, &components);
    info!(
        domains = ?domains,
        handlers = registry.len(),
        "handler registry ready"
    );

    let fallback = ModelFallback::new(components.provider.clone(), registry.routes(), config.ai.timeout())
        .with_max_output_tokens(config.ai.max_output_tokens);
    let process = ProcessQueryHandler::new(
        Arc::new(PatternClassifier::for_domains(&domains)),
        Dispatcher::new(registry.clone()),
        fallback,
        components.sessions.clone(),
    )
    .with_summarizer(summarizer(config, &components));

    let query = QueryHandlers::new(Arc::new(process), registry);
    let sessions = SessionHandlers::new(
        Arc::new(ListSessionsHandler::new(components.sessions.clone())),
        Arc::new(GetSessionHandler::new(components.sessions.clone())),
        Arc::new(SaveSessionHandler::new(components.sessions)),
    );

    Ok(app_router(
        query,
        sessions,
        config.server.request_timeout(),
        &config.server.cors_origins_list(),
    ))
}

/// Validates configuration, builds the app, and serves until ctrl-c.
pub async fn run(config: AppConfig) -> Result<(), StartupError> {
    config.validate()?;
    let addr = config.server.socket_addr()?;

    let components = Components::from_config(&config).await?;
    let app = build_router(&config, components)?;

    let listener = TcpListener::bind(addr).await?;
    info!(address = %addr, "query router listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("received shutdown signal");
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::routing::{HandlerName, Route};

    fn test_config(dir: &std::path::Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.sessions.directory = dir.to_path_buf();
        config
    }

    #[tokio::test]
    async fn default_config_uses_offline_adapters() {
        let dir = tempfile::tempdir().unwrap();
        let components = Components::from_config(&test_config(dir.path())).await.unwrap();

        assert_eq!(components.provider.provider_info().name, "offline");
        assert_eq!(components.web_search.name(), "disabled");
        assert!(!components.vector_index.is_empty());
    }

    #[tokio::test]
    async fn geometry_only_skips_catalog_and_retrieval_handlers() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config(dir.path());
        config.router.domains = "geometry".to_string();

        let components = Components::from_config(&config).await.unwrap();
        assert!(components.vector_index.is_empty());

        let registry = build_registry(&config, &[Domain::Geometry], &components);
        assert_eq!(registry.len(), 4);
        assert!(!registry.routes().contains(&Route::Combined));
    }

    #[tokio::test]
    async fn products_domain_registers_combined_route() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let components = Components::from_config(&config).await.unwrap();

        let registry = build_registry(&config, &[Domain::Products], &components);
        assert!(registry.contains(HandlerName::WebSearch));
        assert!(registry.contains(HandlerName::VectorSearch));
        assert!(registry.routes().contains(&Route::Combined));
    }

    #[tokio::test]
    async fn gemini_embedder_without_key_fails_startup() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config(dir.path());
        config.search.embedder = EmbedderKind::Gemini;

        let result = Components::from_config(&config).await;
        assert!(matches!(
            result,
            Err(StartupError::Validation(ValidationError::EmbedderRequiresGeminiKey))
        ));
    }
}
