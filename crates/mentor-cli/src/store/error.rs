//! Error types for the session store.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or writing session snapshots.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// A stored snapshot could not be decoded
    #[error("Session '{id}' has an unreadable snapshot: {source}")]
    CorruptSnapshot {
        id: String,
        #[source]
        source: serde_json::Error,
    },
    /// Serialization errors when writing a snapshot
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG base directory errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// A blocking database task did not finish
    #[error("Task join error: {0}")]
    Join(String),
}

/// Builder for creating database errors with context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> StoreError {
        StoreError::Database {
            message: self.message,
            source,
        }
    }
}

impl StoreError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| StoreError::database(message).with_source(e))
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
