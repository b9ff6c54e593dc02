//! Error types shared by the catalog, the progress store and slot storage.

use thiserror::Error;

/// Errors raised by progress store operations.
#[derive(Error, Debug)]
pub enum TrailError {
    #[error("Unknown location: {0}")]
    InvalidLocation(String),

    #[error("Invalid photo proof: {0}")]
    InvalidPhoto(String),

    #[error("Player name has not been set")]
    PlayerNameUnset,

    #[error("Hunt incomplete: {visited} of {total} locations visited")]
    HuntIncomplete { visited: usize, total: usize },

    #[error("Invalid saved progress: {0}")]
    Import(#[from] serde_json::Error),

    #[error("Invalid export encoding: {0}")]
    Encoding(#[from] base64::DecodeError),
}

pub type TrailResult<T> = Result<T, TrailError>;

/// Errors raised while validating a location catalog.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Catalog has no locations")]
    Empty,

    #[error("Duplicate location id '{0}'")]
    DuplicateId(String),
}

/// Errors raised by a key-value slot backend.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage unavailable")]
    Unavailable,

    #[error("Storage write failed: {0}")]
    Write(String),
}
