//! Key-value persistence for store collections
//!
//! A [`MemoryStore`](crate::store::MemoryStore) saves each collection as one
//! JSON document under a fixed key. Backends only move strings around; the
//! store owns the encoding.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageError;

pub const TABLES_KEY: &str = "tables";
pub const COLUMNS_KEY: &str = "columns";
pub const ROWS_KEY: &str = "rows";
pub const CELLS_KEY: &str = "cells";
pub const OPTIONS_KEY: &str = "options";

/// A flat string-to-string storage backend.
pub trait KeyValueStorage {
    /// Returns the stored document, or `None` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes a key. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Keys are used as file names, so only ASCII letters, digits, `-` and `_`
/// are accepted.
pub(crate) fn check_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
