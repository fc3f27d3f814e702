//! Local key-value persistence.
//!
//! Stands in for browser local storage: a flat map from string keys to string
//! values. The cart lives under a single key and is always rewritten whole.
//!
//! # Backends
//!
//! - [`MemoryStore`] - in-process map with an optional byte quota
//! - [`FileStore`] - one file per key in a data directory

mod file;
mod memory;

use std::sync::Arc;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Standard storage keys.
pub mod keys {
    /// Key holding the JSON-serialized cart.
    pub const CART_PRODUCTS: &str = "cartProducts";
}

/// Errors from a key-value backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be encoded for storage.
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),

    /// Write would exceed the store's byte quota.
    #[error("quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },

    /// Backend cannot be used right now.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Key cannot be represented by this backend.
    #[error("invalid key: {0:?}")]
    InvalidKey(String),
}

/// A string-keyed slot store.
///
/// Operations are synchronous. Writes are all-or-nothing per key; there is no
/// locking across processes, so concurrent writers are last-write-wins.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written or is full.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
