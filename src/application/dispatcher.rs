//! Route dispatch.
//!
//! A single route is a registry lookup plus one handler call. The combined
//! route runs vector and web search concurrently and keeps each source's own
//! ordering; results are not merged or re-ranked.

use tracing::debug;

use super::registry::{HandlerError, HandlerRegistry};
use crate::domain::routing::{Arguments, HandlerName, HandlerOutput, Route};

/// Errors from dispatching a route.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DispatchError {
    #[error("handler '{0}' is not enabled")]
    UnknownHandler(HandlerName),

    #[error(transparent)]
    Handler(#[from] HandlerError),

    #[error("handler '{handler}' returned an unexpected output")]
    UnexpectedOutput { handler: HandlerName },
}

/// Sends classified routes to their handlers.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: HandlerRegistry,
}

impl Dispatcher {
    pub fn new(registry: HandlerRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub async fn dispatch(
        &self,
        route: Route,
        args: &Arguments,
    ) -> Result<HandlerOutput, DispatchError> {
        debug!(route = %route, "dispatching");
        match route {
            Route::Single(name) => self.call(name, args).await,
            Route::Combined => self.combined(args).await,
        }
    }

    async fn call(&self, name: HandlerName, args: &Arguments) -> Result<HandlerOutput, DispatchError> {
        let handler = self
            .registry
            .get(name)
            .ok_or(DispatchError::UnknownHandler(name))?;
        Ok(handler.call(args).await?)
    }

    async fn combined(&self, args: &Arguments) -> Result<HandlerOutput, DispatchError> {
        let (database, web) = tokio::join!(
            self.call(HandlerName::VectorSearch, args),
            self.call(HandlerName::WebSearch, args),
        );

        let database = match database? {
            HandlerOutput::Records(records) => records,
            _ => {
                return Err(DispatchError::UnexpectedOutput {
                    handler: HandlerName::VectorSearch,
                })
            }
        };
        let web = match web? {
            HandlerOutput::Web(results) => results,
            _ => {
                return Err(DispatchError::UnexpectedOutput {
                    handler: HandlerName::WebSearch,
                })
            }
        };

        Ok(HandlerOutput::Combined { database, web })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::search::MockWebSearch;
    use crate::adapters::vector::{builtin_catalog, HashingEmbedder, InMemoryVectorIndex};
    use crate::application::registry::{VectorSearchHandler, WebSearchHandler};
    use crate::domain::retrieval::WebResult;
    use std::sync::Arc;
    use std::time::Duration;

    async fn products_registry(web: MockWebSearch) -> HandlerRegistry {
        let index = InMemoryVectorIndex::build(Arc::new(HashingEmbedder::default()), builtin_catalog())
            .await
            .unwrap();
        HandlerRegistry::new()
            .with_geometry()
            .with(Arc::new(WebSearchHandler::new(
                Arc::new(web),
                5,
                Duration::from_secs(5),
            )))
            .with(Arc::new(VectorSearchHandler::new(
                Arc::new(index),
                3,
                Duration::from_secs(5),
            )))
    }

    #[tokio::test]
    async fn single_route_calls_its_handler() {
        let dispatcher = Dispatcher::new(HandlerRegistry::new().with_geometry());
        let output = dispatcher
            .dispatch(
                Route::Single(HandlerName::CubeVolume),
                &Arguments::new().with("side", 3.0),
            )
            .await
            .unwrap();
        assert_eq!(output.as_number(), Some(27.0));
    }

    #[tokio::test]
    async fn unregistered_handler_is_unknown() {
        let dispatcher = Dispatcher::new(HandlerRegistry::new().with_geometry());
        let err = dispatcher
            .dispatch(
                Route::Single(HandlerName::WebSearch),
                &Arguments::new().with("query", "x"),
            )
            .await
            .unwrap_err();
        assert_eq!(err, DispatchError::UnknownHandler(HandlerName::WebSearch));

        let err = dispatcher
            .dispatch(Route::Combined, &Arguments::new().with("query", "x"))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::UnknownHandler(_)));
    }

    #[tokio::test]
    async fn handler_errors_pass_through() {
        let dispatcher = Dispatcher::new(HandlerRegistry::new().with_geometry());
        let err = dispatcher
            .dispatch(Route::Single(HandlerName::CircleArea), &Arguments::new())
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::Handler(HandlerError::MissingArgument { .. })));
    }

    #[tokio::test]
    async fn combined_route_returns_both_sources_in_order() {
        let web = MockWebSearch::new().with_results(vec![
            WebResult::new("Laptop deals", "https://deals.example", "s1"),
            WebResult::new("Laptop review", "https://review.example", "s2"),
        ]);
        let dispatcher = Dispatcher::new(products_registry(web).await);

        let output = dispatcher
            .dispatch(
                Route::Combined,
                &Arguments::new().with("query", "best gaming laptop"),
            )
            .await
            .unwrap();

        let HandlerOutput::Combined { database, web } = output else {
            panic!("expected combined output");
        };
        assert_eq!(database.len(), 3);
        assert_eq!(database.items[0].record.id, "lap-002");
        assert_eq!(web.items[0].title, "Laptop deals");
        assert_eq!(web.items[1].title, "Laptop review");
    }

    #[tokio::test]
    async fn combined_route_survives_an_unavailable_source() {
        let web = MockWebSearch::new().with_unreachable("dns failure");
        let dispatcher = Dispatcher::new(products_registry(web).await);

        let output = dispatcher
            .dispatch(Route::Combined, &Arguments::new().with("query", "best headphones"))
            .await
            .unwrap();

        let HandlerOutput::Combined { database, web } = output else {
            panic!("expected combined output");
        };
        assert!(database.is_available());
        assert!(!database.is_empty());
        assert!(!web.is_available());
        assert!(web.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn combined_route_finishes_within_the_search_timeout_when_a_source_hangs() {
        let web = MockWebSearch::new()
            .with_results(vec![WebResult::new("late", "https://slow.example", "")])
            .with_delay(Duration::from_secs(60));
        let dispatcher = Dispatcher::new(products_registry(web).await);

        let started = tokio::time::Instant::now();
        let output = dispatcher
            .dispatch(Route::Combined, &Arguments::new().with("query", "best headphones"))
            .await
            .unwrap();
        let elapsed = started.elapsed();

        let HandlerOutput::Combined { database, web } = output else {
            panic!("expected combined output");
        };
        assert_eq!(database.len(), 3);
        assert!(!web.is_available());
        assert!(web.is_empty());
        assert!(elapsed >= Duration::from_secs(5));
        assert!(elapsed < Duration::from_secs(6));
    }
}
