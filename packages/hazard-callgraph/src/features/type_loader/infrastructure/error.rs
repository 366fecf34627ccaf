//! Error types for the registry snapshot cache

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache corrupted: {0}")]
    Corrupted(String),

    #[error("Cache version mismatch: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("Cache digest mismatch")]
    DigestMismatch,

    #[error("Serialization error: {0}")]
    Serialization(#[from] rmp_serde::encode::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] rmp_serde::decode::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache not found")]
    NotFound,
}

pub type CacheResult<T> = Result<T, CacheError>;
