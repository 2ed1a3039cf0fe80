//! Persistence Layer
//!
//! Reverie persists everything through a small key-value abstraction:
//!
//! - [`KvStore`] - async trait over namespaced string keys
//! - [`LibsqlKv`] - durable backend on an embedded libsql database
//! - [`MemoryKv`] - in-memory backend for tests and ephemeral sessions
//! - [`EntryStore`] - the diary-entry collection, serialized as one JSON
//!   document under a single namespaced key
//!
//! The single-document layout keeps reads and writes atomic per collection:
//! every update is a read-modify-write of one value, serialized by the
//! backing connection. Total collection size is checked against a soft cap
//! (~4 MB) with a warning, never a hard failure.

mod database;
mod entry_store;
mod error;
mod kv;
mod libsql_kv;
mod memory_kv;

pub use database::DatabaseService;
pub use entry_store::{EntryStore, ENTRIES_KEY, SOFT_SIZE_LIMIT_BYTES};
pub use error::StoreError;
pub use kv::KvStore;
pub use libsql_kv::LibsqlKv;
pub use memory_kv::MemoryKv;
