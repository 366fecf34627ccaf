//! Error types for hazard-storage

use std::fmt;
use thiserror::Error;

/// Storage error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Database errors (SQLite)
    Database,
    /// Database file could not be opened
    Open,
    /// Key index outside of `[min_key, max_key]`
    KeyOutOfRange,
    /// Key has no record
    RecordNotFound,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Database => "database",
            ErrorKind::Open => "open",
            ErrorKind::KeyOutOfRange => "key_out_of_range",
            ErrorKind::RecordNotFound => "record_not_found",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Storage error type
#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct StorageError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub message: String,
}

impl StorageError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    pub fn open(path: impl fmt::Display, reason: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::Open,
            format!("Cannot open database {}: {}", path, reason.into()),
        )
    }

    pub fn key_out_of_range(index: u64, min: u64, max: u64) -> Self {
        Self::new(
            ErrorKind::KeyOutOfRange,
            format!("Key index {} not in {}..={}", index, min, max),
        )
    }

    pub fn record_not_found(key: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::RecordNotFound,
            format!("Record not found: {}", key.into()),
        )
    }
}

// SQLite error conversions
#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::database(format!("SQLite error: {}", err)).with_source(err)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, StorageError>;
