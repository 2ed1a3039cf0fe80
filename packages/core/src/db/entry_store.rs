//! Entry Store - the persisted diary-entry collection
//!
//! The collection of all [`DiaryEntry`] values is serialized as a single
//! JSON array stored under one namespaced key. Every operation is a
//! read-modify-write of that one document, which keeps per-entry updates
//! atomic relative to each other on the backing store.
//!
//! # Recovery Behavior
//!
//! A collection that fails to deserialize is logged at `error!` and treated
//! as empty rather than wedging every caller behind a parse error. A write
//! that would push the serialized collection past the soft size cap logs a
//! `warn!` and proceeds - the cap is a quota monitor, not a hard limit.
//!
//! # Examples
//!
//! ```no_run
//! use reverie_core::db::{EntryStore, MemoryKv};
//! use reverie_core::models::DiaryEntry;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = EntryStore::new(Arc::new(MemoryKv::new()));
//!
//!     let entry = DiaryEntry::new("Met Sam for coffee".to_string());
//!     store.save(entry.clone()).await?;
//!
//!     assert!(store.get(&entry.id).await?.is_some());
//!     Ok(())
//! }
//! ```

use crate::db::kv::KvStore;
use crate::models::{DiaryEntry, EntryUpdate};
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;

/// Namespaced key the serialized entry collection lives under.
pub const ENTRIES_KEY: &str = "reverie.entries";

/// Soft cap on the serialized collection size. Crossing it logs a warning;
/// writes still succeed.
pub const SOFT_SIZE_LIMIT_BYTES: usize = 4 * 1024 * 1024;

/// Diary entry collection over a [`KvStore`] backend
#[derive(Clone)]
pub struct EntryStore {
    kv: Arc<dyn KvStore>,
}

impl EntryStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Append a new entry to the collection
    pub async fn save(&self, entry: DiaryEntry) -> Result<()> {
        let mut entries = self.read_collection().await?;
        entries.push(entry);
        self.write_collection(&entries).await
    }

    /// Load the full collection, oldest first
    pub async fn get_all(&self) -> Result<Vec<DiaryEntry>> {
        self.read_collection().await
    }

    /// Load one entry by id
    ///
    /// Returns `Ok(None)` when the entry does not exist (not an error).
    pub async fn get(&self, id: &str) -> Result<Option<DiaryEntry>> {
        let entries = self.read_collection().await?;
        Ok(entries.into_iter().find(|e| e.id == id))
    }

    /// Apply a partial update to one entry
    ///
    /// Refreshes `updated_at` on the touched entry. Returns whether the
    /// entry existed; updating a missing entry is not an error.
    pub async fn update(&self, id: &str, update: EntryUpdate) -> Result<bool> {
        let mut entries = self.read_collection().await?;

        let Some(entry) = entries.iter_mut().find(|e| e.id == id) else {
            return Ok(false);
        };

        if let Some(content) = update.content {
            entry.content = content;
        }
        if let Some(data) = update.mind_map_data {
            entry.mind_map_data = Some(data);
        }
        entry.updated_at = Utc::now();

        self.write_collection(&entries).await?;
        Ok(true)
    }

    /// Delete the whole collection
    pub async fn clear(&self) -> Result<()> {
        self.kv.remove(ENTRIES_KEY).await?;
        Ok(())
    }

    async fn read_collection(&self) -> Result<Vec<DiaryEntry>> {
        let Some(raw) = self.kv.get(ENTRIES_KEY).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::error!("Failed to load diary entries, treating collection as empty: {}", e);
                Ok(Vec::new())
            }
        }
    }

    async fn write_collection(&self, entries: &[DiaryEntry]) -> Result<()> {
        let serialized = serde_json::to_string(entries)?;

        if serialized.len() > SOFT_SIZE_LIMIT_BYTES {
            tracing::warn!(
                "Entry collection is {} bytes, approaching the storage limit",
                serialized.len()
            );
        }

        self.kv.put(ENTRIES_KEY, &serialized).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_kv::MemoryKv;
    use crate::models::MindMapData;

    fn store() -> EntryStore {
        EntryStore::new(Arc::new(MemoryKv::new()))
    }

    #[tokio::test]
    async fn test_save_and_get() {
        let store = store();
        let entry = DiaryEntry::new("first entry".to_string());

        store.save(entry.clone()).await.unwrap();

        let loaded = store.get(&entry.id).await.unwrap().unwrap();
        assert_eq!(loaded, entry);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = store();
        assert!(store.get("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_all_preserves_order() {
        let store = store();
        let first = DiaryEntry::new("first".to_string());
        let second = DiaryEntry::new("second".to_string());

        store.save(first.clone()).await.unwrap();
        store.save(second.clone()).await.unwrap();

        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[1].id, second.id);
    }

    #[tokio::test]
    async fn test_update_refreshes_timestamp() {
        let store = store();
        let entry = DiaryEntry::new("original".to_string());
        let created = entry.updated_at;
        store.save(entry.clone()).await.unwrap();

        let updated = store
            .update(&entry.id, EntryUpdate::new().with_content("revised".to_string()))
            .await
            .unwrap();
        assert!(updated);

        let loaded = store.get(&entry.id).await.unwrap().unwrap();
        assert_eq!(loaded.content, "revised");
        assert!(loaded.updated_at >= created);
    }

    #[tokio::test]
    async fn test_update_missing_returns_false() {
        let store = store();
        let updated = store
            .update("ghost", EntryUpdate::new().with_content("x".to_string()))
            .await
            .unwrap();
        assert!(!updated);
    }

    #[tokio::test]
    async fn test_update_attaches_mind_map() {
        let store = store();
        let entry = DiaryEntry::new("with graph".to_string());
        store.save(entry.clone()).await.unwrap();

        store
            .update(
                &entry.id,
                EntryUpdate::new().with_mind_map_data(MindMapData::default()),
            )
            .await
            .unwrap();

        let loaded = store.get(&entry.id).await.unwrap().unwrap();
        assert!(loaded.mind_map_data.is_some());
    }

    #[tokio::test]
    async fn test_corrupt_collection_treated_as_empty() {
        let kv = Arc::new(MemoryKv::new());
        kv.put(ENTRIES_KEY, "{not json").await.unwrap();

        let store = EntryStore::new(kv);
        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear() {
        let store = store();
        store.save(DiaryEntry::new("x".to_string())).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_oversized_collection_still_saves() {
        let store = store();
        let entry = DiaryEntry::new("y".repeat(SOFT_SIZE_LIMIT_BYTES + 1024));

        store.save(entry.clone()).await.unwrap();
        assert!(store.get(&entry.id).await.unwrap().is_some());
    }
}
