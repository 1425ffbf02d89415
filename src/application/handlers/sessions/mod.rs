//! Session log handlers.

mod get_session;
mod list_sessions;
mod save_session;

pub use get_session::{GetSessionHandler, GetSessionQuery};
pub use list_sessions::ListSessionsHandler;
pub use save_session::{SaveSessionCommand, SaveSessionHandler};
