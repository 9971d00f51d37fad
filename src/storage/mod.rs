//! Persisted key-value storage.
//!
//! The local cache and the user preferences share one flat string store,
//! the same way the mobile app keeps both in a single key-value area.
//!
//! - `MemoryStorage` - process-local map, used for tests and ephemeral runs
//! - `FileStorage` - JSON file on disk, survives restarts

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::Result;

/// A flat string-to-string store.
///
/// Implementations must be safe to share between threads. Concurrent writes to
/// the same key are last-write-wins.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Deleting a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;

    /// List every key currently stored.
    fn keys(&self) -> Result<Vec<String>>;

    /// Check whether `key` holds a value.
    fn contains_key(&self, key: &str) -> Result<bool> {
        Ok(self.get_item(key)?.is_some())
    }

    /// Delete several keys at once.
    fn multi_remove(&self, keys: &[String]) -> Result<()> {
        for key in keys {
            self.remove_item(key)?;
        }
        Ok(())
    }
}
