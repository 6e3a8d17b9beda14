//! Error types for sqlite-repl
//!
//! This module defines the error types used throughout the application.
//! Errors reported by the database engine while running a statement are not
//! represented here: the statement executor renders them and only signals
//! failure through [`ShellError::StatementFailed`] in one-shot mode.

use thiserror::Error;

/// Result type alias for sqlite-repl
pub type Result<T> = std::result::Result<T, ShellError>;

/// Main error type for sqlite-repl
#[derive(Error, Debug)]
pub enum ShellError {
    /// The database file could not be opened
    #[error("Unable to open database {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: sqlx::Error,
    },

    /// Database-related errors outside statement execution (e.g. closing)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO-related errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Line editor errors
    #[error("Line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A statement run in fatal mode failed; the error was already reported
    #[error("statement failed")]
    StatementFailed,
}

impl ShellError {
    /// Build an open error for the given database path
    pub fn open(path: impl Into<String>, source: sqlx::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    /// Build a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
