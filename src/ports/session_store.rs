//! Session Store Port - Persistence for session transcripts.
//!
//! A session is stored wholesale as an ordered list of turns. `append` is a
//! read-modify-write that implementations must serialize per session name so
//! concurrent appends are never lost.

use async_trait::async_trait;

use crate::domain::session::{SessionName, Turn};

/// Errors that can occur during session storage operations
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session not found: {0}")]
    NotFound(SessionName),

    #[error("Failed to serialize session: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize session {name}: {reason}")]
    DeserializationFailed { name: SessionName, reason: String },

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for loading and saving session transcripts
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Names of all stored sessions, sorted.
    async fn list(&self) -> Result<Vec<SessionName>, SessionStoreError>;

    /// Load a session's turns.
    ///
    /// # Errors
    /// Returns `SessionStoreError::NotFound` if the session does not exist
    async fn load(&self, name: &SessionName) -> Result<Vec<Turn>, SessionStoreError>;

    /// Overwrite a session with the given turns, creating it if needed.
    async fn save(&self, name: &SessionName, turns: &[Turn]) -> Result<(), SessionStoreError>;

    /// Append turns to a session, creating it if needed.
    ///
    /// Returns the session length after the append.
    async fn append(&self, name: &SessionName, turns: &[Turn]) -> Result<usize, SessionStoreError>;
}
