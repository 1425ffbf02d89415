//! In-Memory Session Store Adapter
//!
//! Keeps session transcripts in memory. Useful for testing and development.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::session::{SessionName, Turn};
use crate::ports::{SessionStore, SessionStoreError};

/// In-memory storage for session transcripts
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<BTreeMap<SessionName, Vec<Turn>>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn list(&self) -> Result<Vec<SessionName>, SessionStoreError> {
        Ok(self.sessions.read().await.keys().cloned().collect())
    }

    async fn load(&self, name: &SessionName) -> Result<Vec<Turn>, SessionStoreError> {
        self.sessions
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| SessionStoreError::NotFound(name.clone()))
    }

    async fn save(&self, name: &SessionName, turns: &[Turn]) -> Result<(), SessionStoreError> {
        self.sessions
            .write()
            .await
            .insert(name.clone(), turns.to_vec());
        Ok(())
    }

    async fn append(&self, name: &SessionName, turns: &[Turn]) -> Result<usize, SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(name.clone()).or_default();
        session.extend_from_slice(turns);
        Ok(session.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn append_and_load() {
        let store = InMemorySessionStore::new();
        let name = SessionName::new("s").unwrap();

        store.append(&name, &[Turn::user("q")]).await.unwrap();
        store.append(&name, &[Turn::assistant("a")]).await.unwrap();

        assert_eq!(
            store.load(&name).await.unwrap(),
            vec![Turn::user("q"), Turn::assistant("a")]
        );
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn missing_session_is_not_found() {
        let store = InMemorySessionStore::new();
        let err = store.load(&SessionName::new("nope").unwrap()).await.unwrap_err();
        assert!(matches!(err, SessionStoreError::NotFound(_)));
    }
}
