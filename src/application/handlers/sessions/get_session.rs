//! GetSessionHandler - Query handler for a session transcript.

use std::sync::Arc;

use crate::domain::session::{SessionName, Turn};
use crate::ports::{SessionStore, SessionStoreError};

/// Query to get a session by name.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub name: SessionName,
}

/// Handler for retrieving a session transcript.
pub struct GetSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl GetSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// # Errors
    /// `SessionStoreError::NotFound` if no session has that name.
    pub async fn handle(&self, query: GetSessionQuery) -> Result<Vec<Turn>, SessionStoreError> {
        self.store.load(&query.name).await
    }
}
