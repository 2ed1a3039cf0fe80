//! Diary Service - entry creation, listing, and aggregates
//!
//! Owns the transient "current entry" reference handed to a mind-map
//! session on navigation, so opening the graph right after writing an entry
//! does not re-read the store.

use crate::db::EntryStore;
use crate::models::{DiaryEntry, NodeKind, QuestionState};
use crate::services::error::ServiceError;
use serde::{Deserialize, Serialize};

/// Entries of one calendar month, newest entry first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyGroup {
    /// Month key, e.g. `"2026-08"`
    pub month: String,
    pub entries: Vec<DiaryEntry>,
}

/// Aggregate statistics over all entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryStats {
    pub total_entries: usize,
    pub total_characters: usize,
    /// Questions whose text has been generated (pending ones do not count)
    pub total_questions: usize,
    pub total_answers: usize,
    pub average_characters: usize,
    pub longest_entry_id: Option<String>,
    pub most_nodes_entry_id: Option<String>,
}

/// Entry-level business operations
#[derive(Clone)]
pub struct DiaryService {
    store: EntryStore,
    current: Option<DiaryEntry>,
}

impl DiaryService {
    pub fn new(store: EntryStore) -> Self {
        Self {
            store,
            current: None,
        }
    }

    /// Create and persist a new entry from raw diary text.
    ///
    /// Text is trimmed; empty text is rejected before anything is created.
    /// The new entry becomes the current entry.
    pub async fn create_entry(&mut self, content: &str) -> Result<DiaryEntry, ServiceError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ServiceError::EmptyContent);
        }

        let entry = DiaryEntry::new(content.to_string());
        self.store.save(entry.clone()).await?;

        tracing::debug!("Created diary entry {}", entry.id);
        self.current = Some(entry.clone());
        Ok(entry)
    }

    /// All entries, oldest first
    pub async fn entries(&self) -> Result<Vec<DiaryEntry>, ServiceError> {
        Ok(self.store.get_all().await?)
    }

    /// One entry by id, checking the current-entry cache first
    pub async fn entry(&self, id: &str) -> Result<Option<DiaryEntry>, ServiceError> {
        if let Some(current) = &self.current {
            if current.id == id {
                return Ok(Some(current.clone()));
            }
        }
        Ok(self.store.get(id).await?)
    }

    /// The transient current entry, if any
    pub fn current(&self) -> Option<&DiaryEntry> {
        self.current.as_ref()
    }

    /// Replace the current entry (e.g. after a session persisted a graph)
    pub fn set_current(&mut self, entry: Option<DiaryEntry>) {
        self.current = entry;
    }

    /// Entries grouped by calendar month, newest month first; entries
    /// inside a group are newest first.
    pub async fn monthly_groups(&self) -> Result<Vec<MonthlyGroup>, ServiceError> {
        let mut entries = self.store.get_all().await?;
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut groups: Vec<MonthlyGroup> = Vec::new();
        for entry in entries {
            let month = entry.month_key();
            match groups.last_mut() {
                Some(group) if group.month == month => group.entries.push(entry),
                _ => groups.push(MonthlyGroup {
                    month,
                    entries: vec![entry],
                }),
            }
        }

        Ok(groups)
    }

    /// Aggregate statistics over all entries
    pub async fn stats(&self) -> Result<DiaryStats, ServiceError> {
        let entries = self.store.get_all().await?;
        if entries.is_empty() {
            return Ok(DiaryStats::default());
        }

        let mut stats = DiaryStats {
            total_entries: entries.len(),
            ..Default::default()
        };

        let mut longest = 0usize;
        let mut most_nodes = 0usize;

        for entry in &entries {
            let chars = entry.content.chars().count();
            stats.total_characters += chars;

            if chars > longest {
                longest = chars;
                stats.longest_entry_id = Some(entry.id.clone());
            }

            if let Some(data) = &entry.mind_map_data {
                stats.total_questions += data
                    .nodes
                    .iter()
                    .filter(|n| {
                        n.kind == NodeKind::Question
                            && n.question_state == Some(QuestionState::Resolved)
                    })
                    .count();
                stats.total_answers += data
                    .nodes
                    .iter()
                    .filter(|n| n.kind == NodeKind::Answer)
                    .count();

                if data.nodes.len() > most_nodes {
                    most_nodes = data.nodes.len();
                    stats.most_nodes_entry_id = Some(entry.id.clone());
                }
            }
        }

        stats.average_characters = stats.total_characters / stats.total_entries;
        Ok(stats)
    }
}
