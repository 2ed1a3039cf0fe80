//! Graph State and Layout
//!
//! This module owns the in-memory mind-map for the currently open entry and
//! provides the layout-aware constructors for every way the graph can grow:
//!
//! - [`initialize_graph`] - the initial main-node + question fan-out
//! - [`append_answer`] - an answer placed to the right of its question
//! - [`append_follow_ups`] - a follow-up batch fanned out from an answer
//! - [`append_comment`] - a comment placed below-right of its target
//!
//! The constructors are pure: they take their inputs by reference, never
//! mutate them, and return the new nodes/edges for the caller to merge into
//! the authoritative [`GraphState`]. Placement is fully deterministic - a
//! vertical fan of `N` children with spacing `S` is centered on the parent,
//! the first child at `parent.y - (N-1)*S/2`.

use crate::config::LayoutConfig;
use crate::models::{MindMapData, MindMapEdge, MindMapNode, Position, MAIN_NODE_ID};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide sequence for generated node ids. Combined with a millisecond
/// timestamp so two nodes created in the same tick still get distinct ids.
static NODE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Generate a node id of the form `{prefix}-{millis}-{seq}`.
pub fn next_node_id(prefix: &str, now: DateTime<Utc>) -> String {
    let seq = NODE_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}-{}", prefix, now.timestamp_millis(), seq)
}

/// Index encoded in an initial placeholder id (`question-3` -> `2`).
///
/// Follow-up question ids carry a second `-` separated segment and therefore
/// never parse as a placeholder.
pub fn placeholder_index(id: &str) -> Option<usize> {
    let rest = id.strip_prefix("question-")?;
    let n: usize = rest.parse().ok()?;
    n.checked_sub(1)
}

/// In-memory node and edge collections for the open entry.
///
/// The session layer is the only writer; mutations are serialized through
/// `&mut self`. Append operations go through [`add_node`](Self::add_node) /
/// [`add_edge`](Self::add_edge); full replacement via the setters is used
/// when restoring persisted data.
#[derive(Debug, Clone, Default)]
pub struct GraphState {
    pub nodes: Vec<MindMapNode>,
    pub edges: Vec<MindMapEdge>,
}

impl GraphState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore state from a persisted snapshot.
    pub fn from_snapshot(data: MindMapData) -> Self {
        Self {
            nodes: data.nodes,
            edges: data.edges,
        }
    }

    /// Clone the current state into a persistable snapshot.
    pub fn snapshot(&self) -> MindMapData {
        MindMapData {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    /// Replace all nodes
    pub fn set_nodes(&mut self, nodes: Vec<MindMapNode>) {
        self.nodes = nodes;
    }

    /// Replace all edges
    pub fn set_edges(&mut self, edges: Vec<MindMapEdge>) {
        self.edges = edges;
    }

    /// Append a single node
    pub fn add_node(&mut self, node: MindMapNode) {
        debug_assert!(
            self.node(&node.id).is_none(),
            "duplicate node id: {}",
            node.id
        );
        self.nodes.push(node);
    }

    /// Append a single edge
    pub fn add_edge(&mut self, edge: MindMapEdge) {
        self.edges.push(edge);
    }

    /// Look up a node by id
    pub fn node(&self, id: &str) -> Option<&MindMapNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// True while at least one question is still waiting on generated text
    pub fn has_pending_questions(&self) -> bool {
        self.nodes.iter().any(|n| n.is_pending_question())
    }

    /// Fill pending placeholders with generated question text.
    ///
    /// Each placeholder is matched to its question by the index encoded in
    /// its id, so the order of `questions` is the order of the fan-out. A
    /// placeholder with no matching question stays pending (a later
    /// generation round picks it up). Returns how many were resolved.
    pub fn resolve_pending_questions(&mut self, questions: &[String]) -> usize {
        let mut resolved = 0;
        for node in &mut self.nodes {
            if !node.is_pending_question() {
                continue;
            }
            if let Some(text) = placeholder_index(&node.id).and_then(|i| questions.get(i)) {
                node.resolve(text.clone());
                resolved += 1;
            }
        }
        resolved
    }
}

/// Build the initial two-tier graph for a diary entry: one `main` node and
/// `question_count` pending question placeholders fanned out to its right.
pub fn initialize_graph(
    diary_content: &str,
    layout: &LayoutConfig,
    question_count: usize,
    now: DateTime<Utc>,
) -> GraphState {
    let mut state = GraphState::new();

    let preview = truncate_preview(diary_content, layout.preview_chars);
    state.add_node(MindMapNode::main(preview, layout.main_position, now));

    let question_x = layout.main_position.x + layout.question_x_offset;
    let start_y = fan_start(layout.main_position.y, question_count, layout.question_spacing);

    for index in 0..question_count {
        let id = format!("question-{}", index + 1);
        let position = Position::new(
            question_x,
            start_y + index as f64 * layout.question_spacing,
        );
        let node = MindMapNode::pending_question(id, MAIN_NODE_ID.to_string(), position, now);
        state.add_edge(MindMapEdge::link(MAIN_NODE_ID, &node.id));
        state.add_node(node);
    }

    state
}

/// Build an answer node and its edge for `question`. The answer sits one
/// horizontal step to the right, at the question's height.
pub fn append_answer(
    question: &MindMapNode,
    answer_text: &str,
    layout: &LayoutConfig,
    now: DateTime<Utc>,
) -> (MindMapNode, MindMapEdge) {
    let node = MindMapNode::answer(
        next_node_id("answer", now),
        answer_text.to_string(),
        question.id.clone(),
        question.position.shifted(layout.horizontal_spacing, 0.0),
        now,
    );
    let edge = MindMapEdge::link(&question.id, &node.id);
    (node, edge)
}

/// Build a follow-up question batch for `answer`: the questions are fanned
/// out vertically, centered on the answer, one horizontal step to its right.
/// They arrive with known text, so they are created resolved.
pub fn append_follow_ups(
    answer: &MindMapNode,
    questions: &[String],
    layout: &LayoutConfig,
    now: DateTime<Utc>,
) -> (Vec<MindMapNode>, Vec<MindMapEdge>) {
    let x = answer.position.x + layout.horizontal_spacing;
    let start_y = fan_start(answer.position.y, questions.len(), layout.follow_up_spacing);

    let mut nodes = Vec::with_capacity(questions.len());
    let mut edges = Vec::with_capacity(questions.len());

    for (index, text) in questions.iter().enumerate() {
        let node = MindMapNode::question(
            next_node_id("question", now),
            text.clone(),
            answer.id.clone(),
            Position::new(x, start_y + index as f64 * layout.follow_up_spacing),
            now,
        );
        edges.push(MindMapEdge::link(&answer.id, &node.id));
        nodes.push(node);
    }

    (nodes, edges)
}

/// Build a comment node and its edge for `target`. Comments sit below-right
/// so they never collide with the target's answer/follow-up children.
pub fn append_comment(
    target: &MindMapNode,
    comment_text: &str,
    layout: &LayoutConfig,
    now: DateTime<Utc>,
) -> (MindMapNode, MindMapEdge) {
    let node = MindMapNode::comment(
        next_node_id("comment", now),
        comment_text.to_string(),
        target.id.clone(),
        target
            .position
            .shifted(layout.horizontal_spacing, layout.comment_y_offset),
        now,
    );
    let edge = MindMapEdge::link(&target.id, &node.id);
    (node, edge)
}

/// Y coordinate of the first node in a vertical fan of `count` nodes with
/// the given spacing, centered on `center_y`.
fn fan_start(center_y: f64, count: usize, spacing: f64) -> f64 {
    let span = count.saturating_sub(1) as f64 * spacing;
    center_y - span / 2.0
}

/// Entry preview shown in the main node, character-truncated with an
/// ellipsis marker.
fn truncate_preview(content: &str, max_chars: usize) -> String {
    if content.chars().count() <= max_chars {
        content.to_string()
    } else {
        let mut preview: String = content.chars().take(max_chars).collect();
        preview.push_str("...");
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NodeKind, QuestionState};

    fn layout() -> LayoutConfig {
        LayoutConfig::default()
    }

    #[test]
    fn test_initialize_counts() {
        for count in 1..=4 {
            let state = initialize_graph("some diary text", &layout(), count, Utc::now());

            let mains = state.nodes.iter().filter(|n| n.kind == NodeKind::Main).count();
            let questions: Vec<_> = state
                .nodes
                .iter()
                .filter(|n| n.kind == NodeKind::Question)
                .collect();

            assert_eq!(mains, 1);
            assert_eq!(questions.len(), count);
            assert_eq!(state.edges.len(), count);
            assert!(questions.iter().all(|n| n.is_pending_question()));
            assert!(state.edges.iter().all(|e| e.source == MAIN_NODE_ID));
        }
    }

    #[test]
    fn test_initialize_vertical_symmetry() {
        let cfg = layout();
        let count = 3;
        let state = initialize_graph("text", &cfg, count, Utc::now());

        let base_y = cfg.main_position.y;
        let spacing = cfg.question_spacing;
        let span = (count - 1) as f64 * spacing;

        for i in 0..count {
            let node = state.node(&format!("question-{}", i + 1)).unwrap();
            let expected = base_y - span / 2.0 + i as f64 * spacing;
            assert_eq!(node.position.y, expected, "question {} misplaced", i + 1);
            assert_eq!(node.position.x, cfg.main_position.x + cfg.question_x_offset);
        }
    }

    #[test]
    fn test_initialize_two_questions_ordering() {
        let state = initialize_graph(
            "Met Sam for coffee, felt anxious about the project",
            &layout(),
            2,
            Utc::now(),
        );

        let ids: Vec<&str> = state.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["main", "question-1", "question-2"]);

        let q1 = state.node("question-1").unwrap();
        let q2 = state.node("question-2").unwrap();
        assert!(q1.position.y < q2.position.y);

        let edge_targets: Vec<&str> = state.edges.iter().map(|e| e.target.as_str()).collect();
        assert_eq!(edge_targets, vec!["question-1", "question-2"]);
    }

    #[test]
    fn test_preview_truncation() {
        let cfg = layout();
        let long = "x".repeat(400);
        let state = initialize_graph(&long, &cfg, 2, Utc::now());

        let main = state.node(MAIN_NODE_ID).unwrap();
        assert_eq!(main.content.chars().count(), cfg.preview_chars + 3);
        assert!(main.content.ends_with("..."));

        let short_state = initialize_graph("short", &cfg, 2, Utc::now());
        assert_eq!(short_state.node(MAIN_NODE_ID).unwrap().content, "short");
    }

    #[test]
    fn test_append_answer_does_not_mutate_question() {
        let cfg = layout();
        let state = initialize_graph("text", &cfg, 2, Utc::now());
        let mut question = state.node("question-1").unwrap().clone();
        question.resolve("What happened?".to_string());
        let before = question.clone();

        let (answer, edge) = append_answer(&question, "I felt relieved afterward", &cfg, Utc::now());

        assert_eq!(question, before);
        assert_eq!(answer.parent_id.as_deref(), Some("question-1"));
        assert_eq!(answer.position.x, question.position.x + cfg.horizontal_spacing);
        assert_eq!(answer.position.y, question.position.y);
        assert_eq!(edge.source, question.id);
        assert_eq!(edge.target, answer.id);
    }

    #[test]
    fn test_follow_ups_centered_on_answer() {
        let cfg = layout();
        let answer = MindMapNode::answer(
            "answer-1".to_string(),
            "answer".to_string(),
            "question-1".to_string(),
            Position::new(800.0, 150.0),
            Utc::now(),
        );
        let questions = vec!["Q1".to_string(), "Q2".to_string()];

        let (nodes, edges) = append_follow_ups(&answer, &questions, &cfg, Utc::now());

        assert_eq!(nodes.len(), 2);
        assert_eq!(edges.len(), 2);

        let span = cfg.follow_up_spacing;
        assert_eq!(nodes[0].position.y, 150.0 - span / 2.0);
        assert_eq!(nodes[1].position.y, 150.0 + span / 2.0);
        assert!(nodes.iter().all(|n| n.position.x > answer.position.x));
        assert!(nodes.iter().all(|n| n.is_answerable()));
        assert!(edges.iter().all(|e| e.source == "answer-1"));
        assert_ne!(nodes[0].id, nodes[1].id);
    }

    #[test]
    fn test_comment_offset() {
        let cfg = layout();
        let target = MindMapNode::main("text".to_string(), Position::new(50.0, 250.0), Utc::now());

        let (comment, edge) = append_comment(&target, "note to self", &cfg, Utc::now());

        assert_eq!(comment.position.x, 50.0 + cfg.horizontal_spacing);
        assert_eq!(comment.position.y, 250.0 + cfg.comment_y_offset);
        assert!(comment.comment_date.is_some());
        assert_eq!(edge.source, "main");
        assert_eq!(edge.target, comment.id);
    }

    #[test]
    fn test_same_tick_ids_are_distinct() {
        let now = Utc::now();
        let ids: Vec<String> = (0..50).map(|_| next_node_id("answer", now)).collect();
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_placeholder_index() {
        assert_eq!(placeholder_index("question-1"), Some(0));
        assert_eq!(placeholder_index("question-3"), Some(2));
        assert_eq!(placeholder_index("question-0"), None);
        // Timestamped follow-up ids never parse as placeholders
        assert_eq!(placeholder_index("question-1722945600000-7"), None);
        assert_eq!(placeholder_index("answer-3"), None);
    }

    #[test]
    fn test_resolve_pending_questions() {
        let mut state = initialize_graph("text", &layout(), 3, Utc::now());
        let questions = vec!["Q1".to_string(), "Q2".to_string()];

        // Only two questions arrived for three placeholders
        let resolved = state.resolve_pending_questions(&questions);
        assert_eq!(resolved, 2);
        assert!(state.has_pending_questions());

        assert_eq!(state.node("question-1").unwrap().content, "Q1");
        assert_eq!(state.node("question-2").unwrap().content, "Q2");
        assert_eq!(
            state.node("question-3").unwrap().question_state,
            Some(QuestionState::Pending)
        );

        // The third arrives on a later round
        let resolved = state.resolve_pending_questions(&["Q1b".to_string(), "Q2b".to_string(), "Q3".to_string()]);
        assert_eq!(resolved, 1);
        assert!(!state.has_pending_questions());
        // Already-resolved questions keep their original text
        assert_eq!(state.node("question-1").unwrap().content, "Q1");
        assert_eq!(state.node("question-3").unwrap().content, "Q3");
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let state = initialize_graph("text", &layout(), 2, Utc::now());
        let snapshot = state.snapshot();
        let restored = GraphState::from_snapshot(snapshot);

        assert_eq!(state.nodes, restored.nodes);
        assert_eq!(state.edges, restored.edges);
    }
}
