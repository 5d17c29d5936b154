//! Store error types.

use thiserror::Error;

/// Errors produced by the results store and its storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying storage read or write failed.
    #[error("storage failure: {0}")]
    Storage(String),

    /// The collection could not be (de)serialized.
    #[error("serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An import payload was rejected before any state changed.
    #[error("invalid import payload: {0}")]
    InvalidImport(String),
}
