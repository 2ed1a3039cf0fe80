//! Mind-Map Session - the per-entry orchestrator
//!
//! A [`MindMapSession`] owns one open entry's graph and sequences everything
//! that can happen to it:
//!
//! ```text
//! Loading -> Restoring | Initializing -> AwaitingGeneration -> Ready
//!                                                   Ready -> (AwaitingFollowUp -> Ready)*
//! ```
//!
//! - **Loading**: the entry is fetched from the store (or taken from the
//!   caller's current-entry cache)
//! - **Restoring**: a persisted graph is loaded as-is; leftover pending
//!   questions (entry saved mid-generation) re-arm generation
//! - **Initializing**: a fresh two-tier graph is built; nothing is persisted
//!   until the first mutation
//! - **AwaitingGeneration**: [`resolve_questions`](MindMapSession::resolve_questions)
//!   fills the placeholders - at most one automatic attempt per load
//! - **Ready**: user actions are accepted; answers trigger one follow-up
//!   batch each, comments never trigger generation
//!
//! All methods take `&mut self`, so mutations of one session are serialized
//! by construction. The `generation_in_flight` flag and the per-answer
//! `followups_done` set additionally make duplicate triggers no-ops instead
//! of double-appending branches.
//!
//! Persistence failures are deliberately non-fatal: the in-memory graph is
//! kept, the failure is logged, and [`last_persist_ok`](MindMapSession::last_persist_ok)
//! reports durability to the caller.

use crate::config::SessionSettings;
use crate::db::EntryStore;
use crate::graph::{self, placeholder_index, GraphState};
use crate::models::{DiaryEntry, EntryUpdate, NodeKind, Position};
use crate::render::NodeInteraction;
use crate::services::error::ServiceError;
use chrono::Utc;
use reverie_question_engine::QuestionEngine;
use std::collections::HashSet;
use std::sync::Arc;

/// What the host UI should do in response to a node interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionOutcome {
    /// Open the answer input for a resolved question
    PromptForAnswer {
        question_id: String,
        question: String,
    },

    /// Open the comment input for any node
    PromptForComment {
        node_id: String,
        screen_position: Position,
    },

    /// Nothing to do (unknown node, pending question, etc.)
    Ignored,
}

/// Result of an accepted answer submission.
#[derive(Debug, Clone)]
pub struct AnswerOutcome {
    pub answer_id: String,
    pub follow_up_ids: Vec<String>,
    /// Whether the final snapshot reached the store
    pub persisted: bool,
}

/// Result of an accepted comment submission.
#[derive(Debug, Clone)]
pub struct CommentOutcome {
    pub comment_id: String,
    pub persisted: bool,
}

/// Orchestrator for one open entry's mind-map.
pub struct MindMapSession {
    entry: DiaryEntry,
    graph: GraphState,
    settings: SessionSettings,
    store: EntryStore,
    engine: Arc<QuestionEngine>,
    /// The one automatic generation attempt for this load has run
    questions_generated: bool,
    /// A generation call is currently awaiting its result
    generation_in_flight: bool,
    /// Answer node ids that already received their follow-up batch
    followups_done: HashSet<String>,
    /// Whether the most recent persistence attempt succeeded
    last_persist_ok: bool,
}

impl MindMapSession {
    /// Open a session for `entry_id`.
    ///
    /// `current` is the caller's transient current-entry cache; when it
    /// matches the id the store read is skipped. A missing entry is fatal
    /// for this view ([`ServiceError::EntryNotFound`]) - the caller should
    /// navigate back to a safe default.
    pub async fn open(
        entry_id: &str,
        current: Option<DiaryEntry>,
        store: EntryStore,
        engine: Arc<QuestionEngine>,
        settings: SessionSettings,
    ) -> Result<Self, ServiceError> {
        let entry = match current.filter(|e| e.id == entry_id) {
            Some(entry) => entry,
            None => store
                .get(entry_id)
                .await?
                .ok_or_else(|| ServiceError::entry_not_found(entry_id))?,
        };

        let (graph, questions_generated) = match &entry.mind_map_data {
            Some(data) => {
                let graph = GraphState::from_snapshot(data.clone());
                // An entry saved mid-generation still carries pending
                // placeholders; leave generation armed so they resolve.
                let done = !graph.has_pending_questions();
                if !done {
                    tracing::debug!(
                        "Restored graph for entry {} still has pending questions",
                        entry.id
                    );
                }
                (graph, done)
            }
            None => {
                let graph = graph::initialize_graph(
                    &entry.content,
                    &settings.layout,
                    settings.initial_question_count,
                    Utc::now(),
                );
                (graph, false)
            }
        };

        Ok(Self {
            entry,
            graph,
            settings,
            store,
            engine,
            questions_generated,
            generation_in_flight: false,
            followups_done: HashSet::new(),
            last_persist_ok: true,
        })
    }

    /// The open entry
    pub fn entry(&self) -> &DiaryEntry {
        &self.entry
    }

    /// The authoritative graph state
    pub fn graph(&self) -> &GraphState {
        &self.graph
    }

    /// Whether the most recent persistence attempt succeeded
    pub fn last_persist_ok(&self) -> bool {
        self.last_persist_ok
    }

    /// True while the automatic generation attempt is still owed
    pub fn needs_generation(&self) -> bool {
        !self.questions_generated
            && !self.generation_in_flight
            && self.graph.has_pending_questions()
    }

    /// Run the automatic generation round: fill pending question
    /// placeholders with generated text and persist the merged graph.
    ///
    /// No-op when generation already ran for this load, another call is in
    /// flight, or no placeholder is pending (duplicate triggers are
    /// ignored). The engine never fails, so after this completes every
    /// placeholder that has a matching generated question is resolved.
    ///
    /// Returns whether the graph changed.
    pub async fn resolve_questions(&mut self) -> bool {
        if !self.needs_generation() {
            return false;
        }

        // A restored graph may carry more placeholders than the current
        // settings ask for; request enough to cover the highest index.
        let needed = self
            .graph
            .nodes
            .iter()
            .filter(|n| n.is_pending_question())
            .filter_map(|n| placeholder_index(&n.id))
            .max()
            .map(|i| i + 1)
            .unwrap_or(self.settings.initial_question_count)
            .max(self.settings.initial_question_count);

        self.generation_in_flight = true;
        let questions = self
            .engine
            .generate_questions(&self.entry.content, needed)
            .await;
        self.generation_in_flight = false;
        self.questions_generated = true;

        let resolved = self.graph.resolve_pending_questions(&questions);
        if resolved == 0 {
            return false;
        }

        self.persist().await;
        true
    }

    /// Translate a canvas interaction into the action the host should take.
    ///
    /// Only resolved questions accept answers; pending questions ignore the
    /// primary click. The secondary action offers a comment on any node.
    pub fn handle_interaction(&self, interaction: &NodeInteraction) -> InteractionOutcome {
        match interaction {
            NodeInteraction::Clicked { node_id } => match self.graph.node(node_id) {
                Some(node) if node.is_answerable() => InteractionOutcome::PromptForAnswer {
                    question_id: node.id.clone(),
                    question: node.content.clone(),
                },
                _ => InteractionOutcome::Ignored,
            },
            NodeInteraction::SecondaryAction {
                node_id,
                screen_position,
            } => match self.graph.node(node_id) {
                Some(node) => InteractionOutcome::PromptForComment {
                    node_id: node.id.clone(),
                    screen_position: *screen_position,
                },
                None => InteractionOutcome::Ignored,
            },
        }
    }

    /// Submit an answer to a resolved question.
    ///
    /// The answer node and its edge are appended and persisted *before*
    /// follow-up generation starts, so a crash mid-generation never loses
    /// the answer. Follow-ups are then generated (never failing - the
    /// engine falls back locally) and persisted as a second snapshot.
    pub async fn submit_answer(
        &mut self,
        question_id: &str,
        answer_text: &str,
    ) -> Result<AnswerOutcome, ServiceError> {
        let answer_text = answer_text.trim();
        if answer_text.is_empty() {
            return Err(ServiceError::EmptyContent);
        }

        let question = self
            .graph
            .node(question_id)
            .cloned()
            .ok_or_else(|| ServiceError::node_not_found(question_id))?;

        if !question.is_answerable() {
            return Err(ServiceError::not_answerable(question_id));
        }

        let (answer_node, answer_edge) =
            graph::append_answer(&question, answer_text, &self.settings.layout, Utc::now());
        let answer_id = answer_node.id.clone();

        self.graph.add_node(answer_node);
        self.graph.add_edge(answer_edge);
        self.persist().await;

        let follow_up_ids = self.generate_follow_ups_for(&answer_id).await?;

        Ok(AnswerOutcome {
            answer_id,
            follow_up_ids,
            persisted: self.last_persist_ok,
        })
    }

    /// Generate and append the follow-up batch for an answer node.
    ///
    /// Exactly one batch is ever appended per answer: duplicate triggers
    /// (including a re-delivered generation completion) find the answer id
    /// in `followups_done` and return without touching the graph.
    pub async fn generate_follow_ups_for(
        &mut self,
        answer_id: &str,
    ) -> Result<Vec<String>, ServiceError> {
        let answer = self
            .graph
            .node(answer_id)
            .cloned()
            .ok_or_else(|| ServiceError::node_not_found(answer_id))?;

        if answer.kind != NodeKind::Answer {
            tracing::debug!("Ignoring follow-up request for non-answer node {}", answer_id);
            return Ok(Vec::new());
        }

        if self.generation_in_flight || !self.followups_done.insert(answer.id.clone()) {
            return Ok(Vec::new());
        }

        let question_text = answer
            .parent_id
            .as_deref()
            .and_then(|id| self.graph.node(id))
            .map(|n| n.content.clone())
            .unwrap_or_default();

        self.generation_in_flight = true;
        let questions = self
            .engine
            .generate_follow_ups(
                &question_text,
                &answer.content,
                Some(&self.entry.content),
                self.settings.followup_question_count,
            )
            .await;
        self.generation_in_flight = false;

        if questions.is_empty() {
            return Ok(Vec::new());
        }

        let (nodes, edges) =
            graph::append_follow_ups(&answer, &questions, &self.settings.layout, Utc::now());
        let ids: Vec<String> = nodes.iter().map(|n| n.id.clone()).collect();

        for node in nodes {
            self.graph.add_node(node);
        }
        for edge in edges {
            self.graph.add_edge(edge);
        }
        self.persist().await;

        Ok(ids)
    }

    /// Attach a comment to any existing node. No generation is triggered.
    pub async fn submit_comment(
        &mut self,
        node_id: &str,
        comment_text: &str,
    ) -> Result<CommentOutcome, ServiceError> {
        let comment_text = comment_text.trim();
        if comment_text.is_empty() {
            return Err(ServiceError::EmptyContent);
        }

        let target = self
            .graph
            .node(node_id)
            .cloned()
            .ok_or_else(|| ServiceError::node_not_found(node_id))?;

        let (comment_node, comment_edge) =
            graph::append_comment(&target, comment_text, &self.settings.layout, Utc::now());
        let comment_id = comment_node.id.clone();

        self.graph.add_node(comment_node);
        self.graph.add_edge(comment_edge);
        self.persist().await;

        Ok(CommentOutcome {
            comment_id,
            persisted: self.last_persist_ok,
        })
    }

    /// Write the full current snapshot to the store.
    ///
    /// Failures are logged and reflected in `last_persist_ok`; the
    /// in-memory graph is never rolled back, so the user keeps their work
    /// even when the store misbehaves.
    async fn persist(&mut self) -> bool {
        let snapshot = self.graph.snapshot();

        let result = self
            .store
            .update(
                &self.entry.id,
                EntryUpdate::new().with_mind_map_data(snapshot.clone()),
            )
            .await;

        self.last_persist_ok = match result {
            Ok(true) => {
                self.entry.mind_map_data = Some(snapshot);
                self.entry.updated_at = Utc::now();
                true
            }
            Ok(false) => {
                tracing::warn!("Entry {} vanished from the store, keeping graph in memory", self.entry.id);
                false
            }
            Err(e) => {
                tracing::warn!("Failed to persist graph for entry {}: {}", self.entry.id, e);
                false
            }
        };

        self.last_persist_ok
    }
}
