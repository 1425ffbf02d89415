//! Session log domain.
//!
//! A session is an ordered transcript of user and assistant turns, stored
//! under a caller-chosen name. Sessions are optional: a query that names no
//! session is answered without recording anything.

mod name;
mod turn;

pub use name::{SessionName, SessionNameError, MAX_SESSION_NAME_LENGTH};
pub use turn::{Turn, TurnRole};
