//! Error types for the MathGenie core library.

use thiserror::Error;

/// Top-level error type for MathGenie core operations.
#[derive(Error, Debug)]
pub enum GenieError {
    /// Quiz request parameters are out of range or empty.
    #[error("Invalid quiz parameters: {0}")]
    InvalidParams(String),

    /// An unknown difficulty label was supplied.
    #[error("Unknown difficulty '{0}' (expected beginner, intermediate, advanced or olympiad)")]
    UnknownDifficulty(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization or deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// SQLite settings storage error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, GenieError>;
