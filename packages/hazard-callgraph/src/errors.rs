//! Error types for hazard-callgraph
//!
//! Only input errors are fatal. Unresolvable calls and policy gaps are
//! values (`CalleeCandidate::Unknown`, an un-ignored call), never errors,
//! and cache problems are absorbed by the loader.

use thiserror::Error;

use crate::config::ConfigError;
use hazard_storage::StorageError;

/// Main error type for hazard-callgraph operations
#[derive(Debug, Error)]
pub enum CallgraphError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Keyed database error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Record text is not valid JSON of the expected shape
    #[error("Undecodable record '{key}': {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Record decoded but violates the record contract
    #[error("Malformed record '{key}': {reason}")]
    MalformedRecord { key: String, reason: String },

    /// Any fatal error while loading a database file, with the file named
    #[error("Failed to load {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: Box<CallgraphError>,
    },

    /// Output file could not be written
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CallgraphError {
    /// Create a malformed-record error
    pub fn malformed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        CallgraphError::MalformedRecord {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a decode error for the record stored under `key`
    pub fn decode(key: impl Into<String>, source: serde_json::Error) -> Self {
        CallgraphError::Decode {
            key: key.into(),
            source,
        }
    }

    /// Attach the database path to a load failure
    pub fn in_file(self, path: impl AsRef<std::path::Path>) -> Self {
        CallgraphError::Load {
            path: path.as_ref().display().to_string(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for hazard-callgraph operations
pub type Result<T> = std::result::Result<T, CallgraphError>;
