//! Error types and Result aliases for Markdex.
//!
//! This module defines the error hierarchy used throughout the crate.
//! All public functions return `Result<T, Error>` or `Result<T>`.

use thiserror::Error;

/// Result type alias using Markdex's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Markdex operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// An operation that requires a root directory ran before one was set.
    #[error("root directory is not set")]
    NoRootSet,

    /// A path was rejected by the containment boundary.
    #[error("access to '{path}' is not allowed")]
    AccessDenied { path: String },

    /// Malformed path or URI supplied by the presentation layer.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// File watching error.
    #[error("watch error: {0}")]
    Watch(#[from] WatchError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// File watcher errors.
#[derive(Error, Debug)]
pub enum WatchError {
    /// Failed to establish the watch for a root.
    #[error("failed to watch '{path}': {reason}")]
    InitFailed { path: String, reason: String },

    /// The underlying notification backend reported an error.
    #[error("watch backend error: {0}")]
    Backend(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an access-denied error for a path.
    pub fn access_denied(path: impl Into<String>) -> Self {
        Self::AccessDenied { path: path.into() }
    }

    /// Create an invalid-input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

#[cfg(test)]
mod tests;
