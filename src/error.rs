//! Error types for the attendance tracker.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Reading or writing the storage file failed.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("course not found: {0}")]
    CourseNotFound(String),

    #[error("student not found: {0}")]
    StudentNotFound(String),

    /// User input was rejected before touching the collection.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Errors caused by stale ids in the UI rather than by the storage layer.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CourseNotFound(_) | Self::StudentNotFound(_))
    }
}
