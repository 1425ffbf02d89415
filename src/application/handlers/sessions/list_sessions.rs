//! ListSessionsHandler - Query handler for stored session names.

use std::sync::Arc;

use crate::domain::session::SessionName;
use crate::ports::{SessionStore, SessionStoreError};

/// Handler for listing sessions.
pub struct ListSessionsHandler {
    store: Arc<dyn SessionStore>,
}

impl ListSessionsHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self) -> Result<Vec<SessionName>, SessionStoreError> {
        self.store.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::session::Turn;

    #[tokio::test]
    async fn lists_saved_sessions_in_order() {
        let store = Arc::new(InMemorySessionStore::new());
        for name in ["zeta", "alpha"] {
            store
                .save(&SessionName::new(name).unwrap(), &[Turn::user("hi")])
                .await
                .unwrap();
        }

        let names = ListSessionsHandler::new(store).handle().await.unwrap();
        let names: Vec<&str> = names.iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let handler = ListSessionsHandler::new(Arc::new(InMemorySessionStore::new()));
        assert!(handler.handle().await.unwrap().is_empty());
    }
}
