//! Error types for `spaced_review`.

use crate::tasks::{EmptyContent, InvalidReviewResult, TaskNotFound};

/// Errors that can occur while tracking and reviewing tasks.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A request body was not valid JSON for the endpoint.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error occurred.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A `SQLite` database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A blocking storage job panicked or was cancelled.
    #[error("Background job failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// Question or answer was empty after trimming.
    #[error(transparent)]
    EmptyContent(#[from] EmptyContent),

    /// A review result string was not recognised.
    #[error(transparent)]
    InvalidReviewResult(#[from] InvalidReviewResult),

    /// No task exists with the requested id.
    #[error(transparent)]
    TaskNotFound(#[from] TaskNotFound),

    /// The configuration could not be resolved.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the error was caused by bad caller input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Json(_) | Self::EmptyContent(_) | Self::InvalidReviewResult(_))
    }

    /// Whether the error reports a missing task.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::TaskNotFound(_))
    }
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classification() {
        assert!(Error::from(EmptyContent).is_validation());
        assert!(Error::from(InvalidReviewResult("maybe".to_string())).is_validation());
        assert!(!Error::from(TaskNotFound("abc".to_string())).is_validation());
        assert!(!Error::Config("bad".to_string()).is_validation());

        let bad_json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(Error::from(bad_json).is_validation());
    }

    #[test]
    fn test_not_found_classification() {
        assert!(Error::from(TaskNotFound("abc".to_string())).is_not_found());
        assert!(!Error::from(EmptyContent).is_not_found());
    }

    #[test]
    fn test_transparent_messages() {
        assert_eq!(Error::from(EmptyContent).to_string(), "question and answer are required");
        assert_eq!(
            Error::from(TaskNotFound("abc".to_string())).to_string(),
            "task not found: abc"
        );
    }
}
