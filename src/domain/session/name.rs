//! Validated session names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maximum length for a session name.
pub const MAX_SESSION_NAME_LENGTH: usize = 64;

/// Why a string is not a usable session name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionNameError {
    #[error("session name cannot be empty")]
    Empty,

    #[error("session name must be at most {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("session name contains {0:?}; use letters, digits, '_' or '-'")]
    InvalidCharacter(char),
}

/// Name of a session log.
///
/// # Invariants
///
/// - 1-64 characters
/// - only ASCII letters, digits, `_` and `-`
///
/// Names are used as file stems, so the character set keeps them from
/// escaping the session directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionName(String);

impl SessionName {
    pub fn new(name: impl Into<String>) -> Result<Self, SessionNameError> {
        let name = name.into();
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(SessionNameError::Empty);
        }
        if trimmed.len() > MAX_SESSION_NAME_LENGTH {
            return Err(SessionNameError::TooLong {
                max: MAX_SESSION_NAME_LENGTH,
                actual: trimmed.len(),
            });
        }
        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        {
            return Err(SessionNameError::InvalidCharacter(bad));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionName {
    type Err = SessionNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for SessionName {
    type Error = SessionNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SessionName> for String {
    fn from(name: SessionName) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_simple_names() {
        let name = SessionName::new(" shapes-2024_q1 ").unwrap();
        assert_eq!(name.as_str(), "shapes-2024_q1");
    }

    #[test]
    fn rejects_empty_names() {
        assert_eq!(SessionName::new("   "), Err(SessionNameError::Empty));
    }

    #[test]
    fn rejects_long_names() {
        let long = "a".repeat(MAX_SESSION_NAME_LENGTH + 1);
        assert!(matches!(
            SessionName::new(long),
            Err(SessionNameError::TooLong { max: 64, actual: 65 })
        ));
    }

    #[test]
    fn rejects_path_characters() {
        for (bad, ch) in [("../etc", '.'), ("a/b", '/'), ("a.json", '.'), ("name with space", ' ')] {
            assert_eq!(SessionName::new(bad), Err(SessionNameError::InvalidCharacter(ch)));
        }
    }

    #[test]
    fn deserialization_validates() {
        assert!(serde_json::from_str::<SessionName>("\"ok_name\"").is_ok());
        assert!(serde_json::from_str::<SessionName>("\"../bad\"").is_err());
    }
}
