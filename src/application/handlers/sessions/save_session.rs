//! SaveSessionHandler - Command handler that overwrites a session transcript.

use std::sync::Arc;
use tracing::info;

use crate::domain::session::{SessionName, Turn};
use crate::ports::{SessionStore, SessionStoreError};

/// Command to replace a session's turns.
#[derive(Debug, Clone)]
pub struct SaveSessionCommand {
    pub name: SessionName,
    pub turns: Vec<Turn>,
}

/// Handler for saving a session wholesale.
pub struct SaveSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl SaveSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: SaveSessionCommand) -> Result<(), SessionStoreError> {
        self.store.save(&cmd.name, &cmd.turns).await?;
        info!(session = %cmd.name, turns = cmd.turns.len(), "session saved");
        Ok(())
    }
}
