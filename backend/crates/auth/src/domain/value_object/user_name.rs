//! User Name Value Object
//!
//! The handle used to sign in. Names are compared exactly (case-sensitive)
//! after trimming.

use derive_more::Display;
use thiserror::Error;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("name is required")]
    Empty,

    #[error("name is too long ({length} chars, maximum {max})")]
    TooLong { length: usize, max: usize },

    #[error("name cannot contain control characters")]
    ControlCharacter,
}

/// Validated user name
///
/// # Invariants
/// - Trimmed and non-empty
/// - At most [`USER_NAME_MAX_LENGTH`] characters
/// - No control characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub struct UserName(String);

impl UserName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let trimmed = input.as_ref().trim();

        if trimmed.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = trimmed.chars().count();
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if trimmed.chars().any(char::is_control) {
            return Err(UserNameError::ControlCharacter);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
