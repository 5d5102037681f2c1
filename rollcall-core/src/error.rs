//! Error types for rollcall-core

use thiserror::Error;

/// Main error type for the rollcall-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed row in an import file
    #[error("import error at line {line}: {message}")]
    Import { line: usize, message: String },
}

/// Result type alias for rollcall-core
pub type Result<T> = std::result::Result<T, Error>;
