//! In-memory KvStore backend
//!
//! HashMap-backed implementation used by tests and ephemeral sessions.
//! Behavior matches the durable backend observably: same key semantics,
//! same size accounting.

use crate::db::error::StoreError;
use crate::db::kv::KvStore;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory key-value store
#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded store for tests
    pub fn with_data(data: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(data.into_iter().collect())),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.entries.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

#[async_trait]
impl KvStore for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.lock()?.remove(key).is_some())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.lock()?.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    async fn total_size(&self) -> Result<u64> {
        Ok(self
            .lock()?
            .iter()
            .map(|(k, v)| (k.len() + v.len()) as u64)
            .sum())
    }

    async fn clear(&self) -> Result<()> {
        self.lock()?.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_remove() {
        let store = MemoryKv::new();

        assert!(store.get("k").await.unwrap().is_none());

        store.put("k", "v1").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v1"));

        store.put("k", "v2").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));

        assert!(store.remove("k").await.unwrap());
        assert!(!store.remove("k").await.unwrap());
        assert!(store.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_keys_and_size() {
        let store = MemoryKv::with_data([
            ("b".to_string(), "22".to_string()),
            ("a".to_string(), "1".to_string()),
        ]);

        assert_eq!(store.keys().await.unwrap(), vec!["a", "b"]);
        assert_eq!(store.total_size().await.unwrap(), 5);

        store.clear().await.unwrap();
        assert!(store.keys().await.unwrap().is_empty());
        assert_eq!(store.total_size().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryKv::new();
        let clone = store.clone();

        store.put("shared", "yes").await.unwrap();
        assert_eq!(clone.get("shared").await.unwrap().as_deref(), Some("yes"));
    }
}
