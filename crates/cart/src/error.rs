//! Cart store error type.
//!
//! Cart operations never hand these to their callers: they are logged and the
//! operation degrades to "no change". The type exists so the internal load /
//! persist helpers can use `?`.

use thiserror::Error;

use crate::storage::StoreError;

/// Internal failure of a cart operation.
#[derive(Debug, Error)]
pub enum CartError {
    /// The durable store rejected a read or write.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// The cart could not be encoded.
    #[error("encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
