//! In-memory storage backed by DashMap.

use std::sync::Arc;

use dashmap::DashMap;

use super::Storage;
use crate::error::Result;

/// Process-local storage (lock-free, cheap to clone).
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    data: Arc<DashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.get(key).map(|v| v.value().clone()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.data.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.data.iter().map(|e| e.key().clone()).collect())
    }

    fn contains_key(&self, key: &str) -> Result<bool> {
        Ok(self.data.contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("a").unwrap(), None);

        storage.set_item("a", "1").unwrap();
        storage.set_item("a", "2").unwrap();
        assert_eq!(storage.get_item("a").unwrap().as_deref(), Some("2"));
        assert!(storage.contains_key("a").unwrap());

        storage.remove_item("a").unwrap();
        storage.remove_item("a").unwrap();
        assert!(!storage.contains_key("a").unwrap());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_clones_share_data() {
        let storage = MemoryStorage::new();
        let other = storage.clone();
        storage.set_item("k", "v").unwrap();

        assert_eq!(other.get_item("k").unwrap().as_deref(), Some("v"));
        assert_eq!(other.len(), 1);
    }

    #[test]
    fn test_multi_remove() {
        let storage = MemoryStorage::new();
        for key in ["a", "b", "c"] {
            storage.set_item(key, key).unwrap();
        }

        storage
            .multi_remove(&["a".to_string(), "c".to_string()])
            .unwrap();

        assert_eq!(storage.keys().unwrap(), vec!["b".to_string()]);
    }
}
