//! Diary Entry Structures
//!
//! A [`DiaryEntry`] is one diary submission: free text, timestamps, and -
//! once the user has opened its mind-map and a mutation was persisted - the
//! embedded [`MindMapData`] graph snapshot.
//!
//! # Examples
//!
//! ```rust
//! use reverie_core::models::{DiaryEntry, EntryUpdate};
//!
//! let entry = DiaryEntry::new("Met Sam for coffee, felt anxious about the project".to_string());
//! assert!(entry.validate().is_ok());
//! assert!(entry.mind_map_data.is_none());
//!
//! // Partial update applied through the entry store
//! let update = EntryUpdate::new().with_content("Revised entry text".to_string());
//! assert!(!update.is_empty());
//! ```

use crate::models::node::{MindMapEdge, MindMapNode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors for entry operations
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Content is empty after trimming")]
    EmptyContent,
}

/// Persisted snapshot of a mind-map graph: the full node and edge
/// collections for one entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindMapData {
    pub nodes: Vec<MindMapNode>,
    pub edges: Vec<MindMapEdge>,
}

/// One diary submission.
///
/// `updated_at` is refreshed by the store on every mutation. `mind_map_data`
/// stays absent until the first graph mutation is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntry {
    /// Unique identifier (UUID v4)
    pub id: String,

    /// Diary text as written
    pub content: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,

    /// Mind-map graph, present once the first mutation was persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mind_map_data: Option<MindMapData>,
}

impl DiaryEntry {
    /// Create a new entry with a generated UUID and current timestamps.
    ///
    /// Content validation happens in the service layer before this is
    /// called; the constructor itself accepts any string.
    pub fn new(content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            content,
            created_at: now,
            updated_at: now,
            mind_map_data: None,
        }
    }

    /// Validate entry structure
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::MissingField("id".to_string()));
        }

        if self.content.trim().is_empty() {
            return Err(ValidationError::EmptyContent);
        }

        Ok(())
    }

    /// Month key for grouping, e.g. `"2026-08"`.
    pub fn month_key(&self) -> String {
        self.created_at.format("%Y-%m").to_string()
    }
}

/// Partial entry update for the store's `update` operation.
///
/// Only provided fields are changed; the store refreshes `updated_at` on
/// every applied update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryUpdate {
    /// Replace the diary text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Replace the mind-map snapshot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mind_map_data: Option<MindMapData>,
}

impl EntryUpdate {
    /// Create a new empty update
    pub fn new() -> Self {
        Self::default()
    }

    /// Set content update
    pub fn with_content(mut self, content: String) -> Self {
        self.content = Some(content);
        self
    }

    /// Set mind-map snapshot update
    pub fn with_mind_map_data(mut self, data: MindMapData) -> Self {
        self.mind_map_data = Some(data);
        self
    }

    /// Check if the update contains any changes
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.mind_map_data.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::node::{MindMapNode, Position};

    #[test]
    fn test_entry_creation() {
        let entry = DiaryEntry::new("Today was calm".to_string());

        assert!(!entry.id.is_empty());
        assert_eq!(entry.content, "Today was calm");
        assert!(entry.mind_map_data.is_none());
        assert_eq!(entry.created_at, entry.updated_at);
    }

    #[test]
    fn test_entry_ids_are_unique() {
        let a = DiaryEntry::new("a".to_string());
        let b = DiaryEntry::new("b".to_string());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_entry_validation() {
        let entry = DiaryEntry::new("Something happened".to_string());
        assert!(entry.validate().is_ok());

        let blank = DiaryEntry::new("   \n".to_string());
        assert!(matches!(blank.validate(), Err(ValidationError::EmptyContent)));
    }

    #[test]
    fn test_month_key() {
        let mut entry = DiaryEntry::new("x".to_string());
        entry.created_at = "2026-08-06T12:00:00Z".parse().unwrap();
        assert_eq!(entry.month_key(), "2026-08");
    }

    #[test]
    fn test_update_builder() {
        let update = EntryUpdate::new();
        assert!(update.is_empty());

        let update = EntryUpdate::new().with_content("new text".to_string());
        assert!(!update.is_empty());
        assert_eq!(update.content.as_deref(), Some("new text"));
    }

    #[test]
    fn test_entry_roundtrip_with_graph() {
        let mut entry = DiaryEntry::new("entry with a graph".to_string());
        entry.mind_map_data = Some(MindMapData {
            nodes: vec![MindMapNode::main(
                "entry with a graph".to_string(),
                Position::new(50.0, 250.0),
                Utc::now(),
            )],
            edges: vec![],
        });

        let json = serde_json::to_string(&entry).unwrap();
        let back: DiaryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, back);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let entry = DiaryEntry::new("wire check".to_string());
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("mindMapData").is_none());
    }
}
