//! Durable key-value slot the cart is persisted to.
//!
//! The contract mirrors browser local storage: synchronous string `get`,
//! `set` and `remove` on string keys. Any call may fail (storage disabled,
//! quota exceeded, unreadable backing file); callers decide how to degrade.
//!
//! # Backends
//!
//! - [`MemoryStore`] - in-process map with an optional size quota
//! - [`FileStore`] - JSON object file, survives process restarts

use std::sync::Arc;

use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors a durable store can raise.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Writing the value would exceed the store's capacity.
    #[error("quota exceeded writing {key} ({needed} bytes, limit {limit})")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },

    /// The store cannot be used at all.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a JSON object of strings.
    #[error("storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// A synchronous string key-value slot.
pub trait DurableStore {
    /// Read the value stored under `key`, `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the value cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete the entry for `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: DurableStore + ?Sized> DurableStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

impl<S: DurableStore + ?Sized> DurableStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}
