//! Error types for focusflow.

use thiserror::Error;

/// All errors that can occur in focusflow.
#[derive(Error, Debug)]
pub enum FlowError {
    /// Database open, migration, or query failure.
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration loading or path resolution failure.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The user asked for something that does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The input could not be turned into a valid request.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Filesystem failure (backup files, config files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failure.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
