//! ProcessQueryHandler - Classify, dispatch, and normalize a single query.

use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::application::dispatcher::Dispatcher;
use crate::application::fallback::ModelFallback;
use crate::application::summary::Summarizer;
use crate::domain::routing::{
    Arguments, HandlerResult, Intent, IntentClassifier, ModelDecision, Provenance,
    ResponseEnvelope, Route,
};
use crate::domain::session::{SessionName, Turn};
use crate::ports::SessionStore;

/// Error text for a query with no content.
pub const EMPTY_QUERY_MESSAGE: &str = "Query must not be empty";

/// Command to answer one query.
#[derive(Debug, Clone)]
pub struct ProcessQueryCommand {
    pub query: String,
    /// Session to record the exchange in, if any.
    pub session: Option<SessionName>,
}

impl ProcessQueryCommand {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            session: None,
        }
    }

    pub fn in_session(mut self, session: SessionName) -> Self {
        self.session = Some(session);
        self
    }
}

/// Handler for the query pipeline.
///
/// Never fails: every outcome, including internal errors, is an envelope.
pub struct ProcessQueryHandler {
    classifier: Arc<dyn IntentClassifier>,
    dispatcher: Dispatcher,
    fallback: ModelFallback,
    summarizer: Summarizer,
    sessions: Arc<dyn SessionStore>,
}

impl ProcessQueryHandler {
    pub fn new(
        classifier: Arc<dyn IntentClassifier>,
        dispatcher: Dispatcher,
        fallback: ModelFallback,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            classifier,
            dispatcher,
            fallback,
            summarizer: Summarizer::off(),
            sessions,
        }
    }

    /// Attaches summaries to retrieval results.
    pub fn with_summarizer(mut self, summarizer: Summarizer) -> Self {
        self.summarizer = summarizer;
        self
    }

    #[instrument(skip(self, cmd), fields(session = cmd.session.as_ref().map(|s| s.as_str())))]
    pub async fn handle(&self, cmd: ProcessQueryCommand) -> ResponseEnvelope {
        let envelope = self.answer(&cmd.query).await;

        info!(
            provenance = ?envelope.provenance(),
            handler = envelope.handler().map(|r| r.as_str()),
            "query answered"
        );

        if let Some(session) = &cmd.session {
            self.record(session, &cmd.query, &envelope).await;
        }

        envelope
    }

    async fn answer(&self, query: &str) -> ResponseEnvelope {
        let query = query.trim();
        if query.is_empty() {
            return ResponseEnvelope::normalize_error(None, EMPTY_QUERY_MESSAGE);
        }

        // 1. Classify locally
        match self.classifier.classify(query) {
            Intent::Matched {
                route,
                args,
                provenance,
            } => self.run(query, provenance, route, args).await,
            Intent::Malformed { route, message } => {
                warn!(route = %route, error = %message, "rule matched with unusable arguments");
                ResponseEnvelope::normalize_error(Some(route), message)
            }
            // 2. Ask the model
            Intent::Fallback { query } => match self.fallback.resolve(&query).await {
                ModelDecision::Call { route, args } => {
                    self.run(query.as_str(), Provenance::Model, route, args).await
                }
                ModelDecision::Reply(text) => ResponseEnvelope::normalize_fallback(text),
                ModelDecision::Unavailable(reason) => ResponseEnvelope::normalize_fallback(
                    format!("Could not process query: {}", reason),
                ),
            },
        }
    }

    // 3. Dispatch, summarize, and normalize
    async fn run(
        &self,
        query: &str,
        provenance: Provenance,
        route: Route,
        args: Arguments,
    ) -> ResponseEnvelope {
        match self.dispatcher.dispatch(route, &args).await {
            Ok(output) => {
                let summary = self.summarizer.summarize(query, &output).await;
                ResponseEnvelope::normalize_result(
                    provenance,
                    HandlerResult::new(route, args, output).with_summary(summary),
                )
            }
            Err(e) => {
                warn!(route = %route, error = %e, "dispatch failed");
                ResponseEnvelope::normalize_error(Some(route), e.to_string())
            }
        }
    }

    async fn record(&self, session: &SessionName, query: &str, envelope: &ResponseEnvelope) {
        let turns = [Turn::user(query), Turn::assistant(envelope.to_markdown())];
        match self.sessions.append(session, &turns).await {
            Ok(total) => info!(session = %session, turns = total, "session updated"),
            Err(e) => warn!(session = %session, error = %e, "failed to record session turn"),
        }
    }
}
