//! # Persistence Backends
//!
//! The `PersistenceLayer` trait is the whole contract the cart needs from
//! storage: read raw text by key, write raw text by key.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{StorageError, StorageResult};

/// Durable key-value storage.
///
/// Implementations must be safe to share between tasks; the store holds one
/// behind an `Arc`.
pub trait PersistenceLayer: Send + Sync {
    /// Returns the value stored under `key`, or `None` if nothing is stored.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// Process-local storage. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    /// Creates storage pre-loaded with one value.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.into(), value.into());
        MemoryStorage {
            values: Mutex::new(values),
        }
    }
}

impl PersistenceLayer for MemoryStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let values = self.values.lock().map_err(|_| StorageError::LockPoisoned)?;
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        let mut values = self.values.lock().map_err(|_| StorageError::LockPoisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_read_write() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.read("k").unwrap(), None);

        storage.write("k", "[]").unwrap();
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("[]"));

        storage.write("k", "[1]").unwrap();
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_memory_rejects_empty_key() {
        let storage = MemoryStorage::new();
        assert!(matches!(
            storage.write("", "[]"),
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_with_value() {
        let storage = MemoryStorage::with_value("cart", "[]");
        assert_eq!(storage.read("cart").unwrap().as_deref(), Some("[]"));
    }
}
