//! Mind-Map Node and Edge Structures
//!
//! This module defines the graph elements of a mind-map: nodes of four kinds
//! (`main`, `question`, `answer`, `comment`) and the directed edges linking a
//! parent to each of its children.
//!
//! # Architecture
//!
//! - **Single main node**: every graph holds exactly one `main` node whose id
//!   is the fixed sentinel [`MAIN_NODE_ID`]
//! - **Tagged question state**: a question carries an explicit
//!   [`QuestionState`] (`pending` until its text arrives from generation,
//!   `resolved` afterwards) - consumers never infer state from content
//! - **Advisory lineage**: `parent_id` records which node a child grew from;
//!   it is not a foreign key enforced at write time
//!
//! # Examples
//!
//! ```rust
//! use reverie_core::models::{MindMapNode, MindMapEdge, Position, MAIN_NODE_ID};
//! use chrono::Utc;
//!
//! let now = Utc::now();
//! let main = MindMapNode::main("Met Sam for coffee...".to_string(), Position::new(50.0, 250.0), now);
//! let question = MindMapNode::pending_question(
//!     "question-1".to_string(),
//!     MAIN_NODE_ID.to_string(),
//!     Position::new(500.0, 150.0),
//!     now,
//! );
//! let edge = MindMapEdge::link(&main.id, &question.id);
//!
//! assert!(question.is_pending_question());
//! assert_eq!(edge.source, MAIN_NODE_ID);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed id of the single `main` node in every graph.
pub const MAIN_NODE_ID: &str = "main";

/// 2D canvas position of a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Position shifted by the given offsets
    pub fn shifted(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Kind of a mind-map node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// The root node holding the diary entry preview
    Main,
    /// An AI-generated (or fallback) reflective question
    Question,
    /// A user answer to a question
    Answer,
    /// A user comment attached to any node
    Comment,
}

/// Lifecycle state of a question node.
///
/// A question is created `Pending` before its text is known (generation is
/// asynchronous) and becomes `Resolved` when real text arrives. Only resolved
/// questions accept answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionState {
    Pending,
    Resolved,
}

/// One node of a mind-map graph.
///
/// # Fields
///
/// - `id`: unique within the graph (`"main"` for the root, `question-N` for
///   the initial placeholders, timestamped ids for everything created later)
/// - `kind`: serialized as `type` on the wire
/// - `content`: node text; empty while a question is still pending
/// - `position`: canvas coordinates computed by the layout functions
/// - `parent_id`: the node this one grew from (absent only on `main`)
/// - `question_state`: present exactly on question nodes
/// - `comment_date`: present exactly on comment nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindMapNode {
    /// Unique identifier within the graph
    pub id: String,

    /// Node kind (wire name `type`)
    #[serde(rename = "type")]
    pub kind: NodeKind,

    /// Node text
    pub content: String,

    /// Canvas position
    pub position: Position,

    /// Parent node id (creation lineage, not ownership)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// Present exactly when `kind == Question`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_state: Option<QuestionState>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// When the comment was written (comment nodes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_date: Option<DateTime<Utc>>,
}

impl MindMapNode {
    /// Create the root `main` node holding the entry preview.
    pub fn main(content: String, position: Position, now: DateTime<Utc>) -> Self {
        Self {
            id: MAIN_NODE_ID.to_string(),
            kind: NodeKind::Main,
            content,
            position,
            parent_id: None,
            question_state: None,
            created_at: now,
            comment_date: None,
        }
    }

    /// Create a question node whose text is not yet known.
    pub fn pending_question(
        id: String,
        parent_id: String,
        position: Position,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind: NodeKind::Question,
            content: String::new(),
            position,
            parent_id: Some(parent_id),
            question_state: Some(QuestionState::Pending),
            created_at: now,
            comment_date: None,
        }
    }

    /// Create a question node with known text (follow-up questions arrive
    /// resolved - their text is available at creation time).
    pub fn question(
        id: String,
        content: String,
        parent_id: String,
        position: Position,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind: NodeKind::Question,
            content,
            position,
            parent_id: Some(parent_id),
            question_state: Some(QuestionState::Resolved),
            created_at: now,
            comment_date: None,
        }
    }

    /// Create an answer node.
    pub fn answer(
        id: String,
        content: String,
        parent_id: String,
        position: Position,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind: NodeKind::Answer,
            content,
            position,
            parent_id: Some(parent_id),
            question_state: None,
            created_at: now,
            comment_date: None,
        }
    }

    /// Create a comment node.
    pub fn comment(
        id: String,
        content: String,
        parent_id: String,
        position: Position,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind: NodeKind::Comment,
            content,
            position,
            parent_id: Some(parent_id),
            question_state: None,
            created_at: now,
            comment_date: Some(now),
        }
    }

    /// True for a question node still waiting on generated text.
    pub fn is_pending_question(&self) -> bool {
        self.kind == NodeKind::Question && self.question_state == Some(QuestionState::Pending)
    }

    /// True for a question node that can accept an answer. Pending questions
    /// are never answerable.
    pub fn is_answerable(&self) -> bool {
        self.kind == NodeKind::Question && self.question_state == Some(QuestionState::Resolved)
    }

    /// Replace pending placeholder text with the real question.
    ///
    /// This is the only in-place content rewrite the graph ever performs.
    pub fn resolve(&mut self, content: String) {
        self.content = content;
        self.question_state = Some(QuestionState::Resolved);
    }
}

/// Directed edge from a parent node to one of its children.
///
/// Created together with the child node; edges are never removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindMapEdge {
    /// Unique identifier within the graph
    pub id: String,

    /// Parent node id
    pub source: String,

    /// Child node id
    pub target: String,
}

impl MindMapEdge {
    /// Create the edge linking `source` to `target`.
    ///
    /// The id is derived from the endpoints; it is unique because each child
    /// node has exactly one incoming edge and node ids are unique.
    pub fn link(source: &str, target: &str) -> Self {
        Self {
            id: format!("edge-{}-to-{}", source, target),
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}
