//! Business Services
//!
//! This module contains the core business logic services:
//!
//! - `DiaryService` - entry creation, listing, grouping, and statistics
//! - `MindMapSession` - the per-entry orchestrator sequencing graph
//!   initialization, question generation, user actions, and persistence
//!
//! Services coordinate between the persistence layer, the graph state, and
//! the question engine, implementing the business rules and sequencing.

pub mod diary_service;
pub mod error;
pub mod mindmap_service;

pub use diary_service::{DiaryService, DiaryStats, MonthlyGroup};
pub use error::ServiceError;
pub use mindmap_service::{AnswerOutcome, CommentOutcome, InteractionOutcome, MindMapSession};
