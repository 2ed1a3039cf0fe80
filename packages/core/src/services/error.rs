//! Service Layer Error Types
//!
//! High-level error types for the diary and mind-map services. Generation
//! failures never appear here - the question engine absorbs them - and
//! persistence failures reach callers as a non-durable flag rather than an
//! error, so what remains is validation and lookup failures plus the
//! storage errors of operations that cannot proceed without the store.

use crate::models::ValidationError;
use thiserror::Error;

/// Service operation errors
#[derive(Error, Debug)]
pub enum ServiceError {
    /// No entry exists under the requested id. Fatal for the requesting
    /// view: the caller should navigate back to a safe default.
    #[error("Entry not found: {id}")]
    EntryNotFound { id: String },

    /// Submitted content was empty after trimming
    #[error("Content is empty")]
    EmptyContent,

    /// No node exists under the requested id in the open graph
    #[error("Node not found: {id}")]
    NodeNotFound { id: String },

    /// The target node cannot accept an answer (not a question, or its
    /// question text has not been generated yet)
    #[error("Node cannot accept an answer: {id}")]
    NotAnswerable { id: String },

    /// Entry validation failed
    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    /// Storage operation failed
    #[error("Storage operation failed: {0}")]
    Storage(#[from] anyhow::Error),
}

impl ServiceError {
    /// Create an entry not found error
    pub fn entry_not_found(id: impl Into<String>) -> Self {
        Self::EntryNotFound { id: id.into() }
    }

    /// Create a node not found error
    pub fn node_not_found(id: impl Into<String>) -> Self {
        Self::NodeNotFound { id: id.into() }
    }

    /// Create a not-answerable error
    pub fn not_answerable(id: impl Into<String>) -> Self {
        Self::NotAnswerable { id: id.into() }
    }
}
