//! Task Value Objects

use derive_more::Display;
use thiserror::Error;

/// Maximum length for a task title (in characters)
pub const TASK_TITLE_MAX_LENGTH: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskTitleError {
    #[error("title is required")]
    Empty,

    #[error("title is too long ({length} chars, maximum {max})")]
    TooLong { length: usize, max: usize },
}

/// Trimmed, non-empty task title
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub struct TaskTitle(String);

impl TaskTitle {
    pub fn new(input: impl AsRef<str>) -> Result<Self, TaskTitleError> {
        let trimmed = input.as_ref().trim();

        if trimmed.is_empty() {
            return Err(TaskTitleError::Empty);
        }

        let length = trimmed.chars().count();
        if length > TASK_TITLE_MAX_LENGTH {
            return Err(TaskTitleError::TooLong {
                length,
                max: TASK_TITLE_MAX_LENGTH,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring match
    pub fn matches(&self, query: &str) -> bool {
        self.0.to_lowercase().contains(&query.to_lowercase())
    }
}
