//! Byte-oriented key-value backends for the session mirror.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Errors from a key-value backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The value does not fit in the backend's quota.
    #[error("Quota exceeded: value needs {needed} bytes, limit is {limit}")]
    QuotaExceeded { needed: usize, limit: usize },

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A durable store holding whole values under string keys.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`. A missing key is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;
}
