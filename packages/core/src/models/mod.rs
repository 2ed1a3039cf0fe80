//! Data Models
//!
//! Core data structures for Reverie:
//!
//! - [`DiaryEntry`] - one diary submission with its optional mind-map
//! - [`MindMapNode`] / [`MindMapEdge`] - the mind-map graph elements
//! - [`EntryUpdate`] - partial update applied through the entry store

pub mod entry;
pub mod node;

pub use entry::{DiaryEntry, EntryUpdate, MindMapData, ValidationError};
pub use node::{MindMapEdge, MindMapNode, NodeKind, Position, QuestionState, MAIN_NODE_ID};
