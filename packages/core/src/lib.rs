//! Reverie Core Business Logic Layer
//!
//! This crate provides the data model, graph management, and service
//! orchestration for Reverie, a reflective journaling system that turns
//! diary entries into interactive mind-maps.
//!
//! # Architecture
//!
//! - **Append-only graph**: one `main` node per entry; questions, answers,
//!   and comments are only ever added, never removed
//! - **Deterministic layout**: node positions are computed from a layout
//!   configuration threaded in by value, never from ambient state
//! - **Key-value persistence**: the entry collection is serialized as one
//!   JSON document behind a `KvStore` trait (libsql-backed in production)
//! - **Never-fail generation**: question generation degrades to a local
//!   fallback; a generation failure is never fatal to a session
//!
//! # Modules
//!
//! - [`models`] - Data structures (DiaryEntry, MindMapNode, MindMapEdge)
//! - [`graph`] - In-memory graph state and layout-aware node constructors
//! - [`db`] - Persistence layer with libsql integration
//! - [`settings`] - Typed application settings persisted through the store
//! - [`render`] - Declarative styling and interaction contract for canvases
//! - [`services`] - Business services (DiaryService, MindMapSession)

pub mod config;
pub mod db;
pub mod graph;
pub mod models;
pub mod render;
pub mod services;
pub mod settings;

// Re-export commonly used types
pub use config::*;
pub use models::*;
pub use services::*;
