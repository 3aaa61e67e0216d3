//! Durable local storage for the cart.
//!
//! A small string key-value store: [`CartStorage`] is the seam,
//! [`FileStorage`] persists to a single JSON file on disk, and
//! [`MemoryStorage`] backs tests and embedders that do not want disk I/O.
//!
//! Writes are unconditional full overwrites of the stored value - there is
//! no transaction and no compare-and-swap, matching the last-write-wins
//! model the cart has always had.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Errors that can occur reading or writing local storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The storage file is not valid JSON.
    #[error("Storage format error: {0}")]
    Format(#[from] serde_json::Error),
}

/// String key-value storage for serialized cart state.
pub trait CartStorage {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
