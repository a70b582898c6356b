//! String-keyed storage backends
//!
//! The page persists its state in a browser-style key/value area. Two
//! backends are provided: an in-memory map scoped to the controller's
//! lifetime, and a `sled` database for state that must outlive the process.

use crate::error::{PhoneFinderError, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

/// Key/value storage with `localStorage`-like semantics
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` if the key is absent
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Write a single value
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key; removing an absent key is not an error
    fn remove_item(&self, key: &str) -> Result<()>;

    /// Write several values so that readers see all or none of them
    fn set_items(&self, items: &[(&str, String)]) -> Result<()>;

    /// Remove several keys at once
    fn remove_items(&self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.remove_item(key)?;
        }
        Ok(())
    }
}

/// In-memory backend
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.items
            .lock()
            .map_err(|_| PhoneFinderError::Storage("memory store lock poisoned".to_string()).into())
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn set_items(&self, items: &[(&str, String)]) -> Result<()> {
        let mut map = self.lock()?;
        for (key, value) in items {
            map.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }

    fn remove_items(&self, keys: &[&str]) -> Result<()> {
        let mut map = self.lock()?;
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }
}

/// `sled`-backed store
///
/// Multi-key writes go through a single `sled::Batch`, which is applied
/// atomically.
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    /// Open or create a store at `path`
    ///
    /// # Errors
    ///
    /// Returns `PhoneFinderError::Storage` if the database cannot be opened
    ///
    /// # Examples
    ///
    /// ```
    /// use phonefinder::storage::SledStore;
    ///
    /// # fn main() -> phonefinder::error::Result<()> {
    /// let dir = std::env::temp_dir().join("phonefinder-doc-store");
    /// let store = SledStore::open(&dir)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = sled::open(path)
            .map_err(|e| PhoneFinderError::Storage(format!("Failed to open database: {}", e)))?;
        Ok(Self { db })
    }

    fn flush(&self) -> Result<()> {
        self.db
            .flush()
            .map_err(|e| PhoneFinderError::Storage(format!("Flush failed: {}", e)))?;
        Ok(())
    }
}

impl KeyValueStore for SledStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .db
            .get(key.as_bytes())
            .map_err(|e| PhoneFinderError::Storage(format!("Get failed: {}", e)))?;

        match value {
            Some(bytes) => {
                let text = String::from_utf8(bytes.to_vec()).map_err(|e| {
                    PhoneFinderError::Storage(format!("Stored value is not UTF-8: {}", e))
                })?;
                Ok(Some(text))
            }
            None => Ok(None),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.db
            .insert(key.as_bytes(), value.as_bytes())
            .map_err(|e| PhoneFinderError::Storage(format!("Insert failed: {}", e)))?;
        self.flush()
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.db
            .remove(key.as_bytes())
            .map_err(|e| PhoneFinderError::Storage(format!("Remove failed: {}", e)))?;
        self.flush()
    }

    fn set_items(&self, items: &[(&str, String)]) -> Result<()> {
        let mut batch = sled::Batch::default();
        for (key, value) in items {
            batch.insert(key.as_bytes(), value.as_bytes());
        }
        self.db
            .apply_batch(batch)
            .map_err(|e| PhoneFinderError::Storage(format!("Batch write failed: {}", e)))?;
        self.flush()
    }

    fn remove_items(&self, keys: &[&str]) -> Result<()> {
        let mut batch = sled::Batch::default();
        for key in keys {
            batch.remove(key.as_bytes());
        }
        self.db
            .apply_batch(batch)
            .map_err(|e| PhoneFinderError::Storage(format!("Batch remove failed: {}", e)))?;
        self.flush()
    }
}
