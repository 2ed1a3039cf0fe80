//! KvStore Trait - Persistence Abstraction Layer
//!
//! The trait abstracts the namespaced key-value storage every Reverie
//! collection lives in, enabling multiple backend implementations (libsql,
//! in-memory) without changing the entry-store or settings logic above it.
//!
//! # Design Decisions
//!
//! 1. **Async-first**: all methods are async so the embedded and any future
//!    networked backend share one call shape
//! 2. **String values**: every stored document is a serialized JSON string;
//!    (de)serialization belongs to the layer that owns the document's type
//! 3. **Error handling**: `anyhow::Result` at the trait seam for flexible
//!    context; backend-specific failures carry a `StoreError` underneath
//!
//! # Thread Safety
//!
//! Implementations must be `Send + Sync` so futures holding a store handle
//! can move between threads.

use anyhow::Result;
use async_trait::async_trait;

/// Abstraction over namespaced key-value persistence
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// Returns `Ok(None)` when the key does not exist (not an error).
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value
    async fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the value stored under `key`
    ///
    /// Returns whether a value existed. Deleting a missing key succeeds.
    async fn remove(&self, key: &str) -> Result<bool>;

    /// List all stored keys
    async fn keys(&self) -> Result<Vec<String>>;

    /// Total stored size in bytes (keys + values), for quota monitoring
    async fn total_size(&self) -> Result<u64>;

    /// Delete everything
    async fn clear(&self) -> Result<()>;
}
