//! In-memory key-value store for tests and ephemeral sessions.

use crate::storage::{KeyValueStore, StorageError, StorageResult};
use std::cell::RefCell;
use std::collections::HashMap;

/// Map-backed store with an optional byte quota over all stored values.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RefCell<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects writes that would push total value bytes above `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: RefCell::default(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Total bytes currently stored across all values.
    pub fn used_bytes(&self) -> usize {
        self.entries.borrow().values().map(String::len).sum()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.borrow_mut();
        if let Some(quota) = self.quota_bytes {
            let replaced = entries.get(key).map_or(0, String::len);
            let used: usize = entries.values().map(String::len).sum();
            if used - replaced + value.len() > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    bytes: value.len(),
                });
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryKeyValueStore;
    use crate::storage::{KeyValueStore, StorageError};

    #[test]
    fn quota_counts_replaced_value_once() {
        let store = MemoryKeyValueStore::with_quota(8);
        store.set("a", "12345678").unwrap();
        store.set("a", "87654321").unwrap();

        let err = store.set("b", "x").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { bytes: 1, .. }));
        assert_eq!(store.used_bytes(), 8);
    }

    #[test]
    fn remove_frees_space() {
        let store = MemoryKeyValueStore::with_quota(4);
        store.set("a", "1234").unwrap();
        store.remove("a").unwrap();
        store.set("b", "5678").unwrap();
        assert_eq!(store.get("b").unwrap().as_deref(), Some("5678"));
    }
}
