//! Error types for the lif_io crate.
//!
//! Provides structured error handling for every file the outer collaborators
//! write or read.

use thiserror::Error;

/// Main error type for lif_io operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File system errors
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<IoError>,
    },
}

/// Result type alias for lif_io operations.
pub type Result<T> = std::result::Result<T, IoError>;

impl IoError {
    #[must_use]
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        Self::Serialization(msg.into())
    }

    /// Wraps an error with additional context.
    #[must_use]
    pub fn with_context<S: Into<String>>(self, context: S) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }
}
