//! End-to-end mind-map session scenarios over the in-memory backend

use reverie_core::config::SessionSettings;
use reverie_core::db::{EntryStore, MemoryKv};
use reverie_core::graph::GraphState;
use reverie_core::models::{NodeKind, QuestionState, MAIN_NODE_ID};
use reverie_core::services::{DiaryService, MindMapSession};
use reverie_question_engine::QuestionEngine;
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn store() -> EntryStore {
    init_tracing();
    EntryStore::new(Arc::new(MemoryKv::new()))
}

fn engine() -> Arc<QuestionEngine> {
    Arc::new(QuestionEngine::fallback_only())
}

/// The canonical walkthrough: write an entry, open its map, let generation
/// resolve the two placeholders, answer one question, receive follow-ups.
#[tokio::test]
async fn full_session_walkthrough() {
    let store = store();
    let mut diary = DiaryService::new(store.clone());

    let entry = diary
        .create_entry("Met Sam for coffee, felt anxious about the project")
        .await
        .unwrap();

    let mut session = MindMapSession::open(
        &entry.id,
        diary.current().cloned(),
        store.clone(),
        engine(),
        SessionSettings::default(),
    )
    .await
    .unwrap();

    // Initial fan-out: main + question-1 + question-2, edges from main
    let ids: Vec<&str> = session.graph().nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["main", "question-1", "question-2"]);
    assert_eq!(session.graph().edges.len(), 2);
    assert!(session
        .graph()
        .edges
        .iter()
        .all(|e| e.source == MAIN_NODE_ID));

    let q1 = session.graph().node("question-1").unwrap();
    let q2 = session.graph().node("question-2").unwrap();
    assert!(q1.position.y < q2.position.y);

    // Generation round (fallback path - no credentials configured)
    assert!(session.resolve_questions().await);
    assert!(!session.graph().has_pending_questions());

    // Answer question-1 and receive the follow-up fan-out
    let outcome = session
        .submit_answer("question-1", "I felt relieved afterward")
        .await
        .unwrap();

    assert_eq!(outcome.follow_up_ids.len(), 2);
    assert_eq!(session.graph().nodes.len(), 6);
    assert_eq!(session.graph().edges.len(), 5);

    let answer = session.graph().node(&outcome.answer_id).unwrap();
    for id in &outcome.follow_up_ids {
        let follow_up = session.graph().node(id).unwrap();
        assert!(follow_up.position.x > answer.position.x);
        assert_eq!(follow_up.parent_id.as_deref(), Some(answer.id.as_str()));
    }
}

/// Persisted graphs survive a full store round-trip with identity intact.
#[tokio::test]
async fn graph_round_trip_preserves_identity() {
    let store = store();
    let mut diary = DiaryService::new(store.clone());
    let entry = diary.create_entry("round trip entry").await.unwrap();

    let mut session = MindMapSession::open(
        &entry.id,
        None,
        store.clone(),
        engine(),
        SessionSettings::default(),
    )
    .await
    .unwrap();
    session.resolve_questions().await;
    session
        .submit_answer("question-2", "an answer worth keeping")
        .await
        .unwrap();
    session.submit_comment("main", "note on the entry").await.unwrap();

    let before = session.graph().snapshot();
    drop(session);

    let reloaded = store.get(&entry.id).await.unwrap().unwrap();
    let after = GraphState::from_snapshot(reloaded.mind_map_data.unwrap()).snapshot();

    assert_eq!(before.nodes.len(), after.nodes.len());
    assert_eq!(before.edges, after.edges);
    for (a, b) in before.nodes.iter().zip(after.nodes.iter()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.kind, b.kind);
        assert_eq!(a.content, b.content);
        assert_eq!(a.position, b.position);
        assert_eq!(a.parent_id, b.parent_id);
    }
}

/// A generation attempt never leaves a placeholder unresolved, even when
/// only the local fallback is available.
#[tokio::test]
async fn generation_attempt_resolves_every_placeholder() {
    let store = store();
    let mut diary = DiaryService::new(store.clone());
    let entry = diary.create_entry("short note").await.unwrap();

    let settings = SessionSettings {
        initial_question_count: 3,
        ..Default::default()
    };

    let mut session = MindMapSession::open(&entry.id, None, store, engine(), settings)
        .await
        .unwrap();

    session.resolve_questions().await;

    let questions: Vec<_> = session
        .graph()
        .nodes
        .iter()
        .filter(|n| n.kind == NodeKind::Question)
        .collect();
    assert_eq!(questions.len(), 3);
    assert!(questions
        .iter()
        .all(|n| n.question_state == Some(QuestionState::Resolved)));

    let contents: Vec<&str> = questions.iter().map(|n| n.content.as_str()).collect();
    let mut deduped = contents.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), contents.len(), "questions must be distinct");
}

/// Two answers to two different questions each get exactly one batch.
#[tokio::test]
async fn each_answer_gets_its_own_single_batch() {
    let store = store();
    let mut diary = DiaryService::new(store.clone());
    let entry = diary.create_entry("two answers today").await.unwrap();

    let mut session = MindMapSession::open(
        &entry.id,
        None,
        store,
        engine(),
        SessionSettings::default(),
    )
    .await
    .unwrap();
    session.resolve_questions().await;

    let first = session.submit_answer("question-1", "first answer text").await.unwrap();
    let second = session.submit_answer("question-2", "second answer text").await.unwrap();

    assert_eq!(first.follow_up_ids.len(), 2);
    assert_eq!(second.follow_up_ids.len(), 2);

    // Duplicate triggers change nothing
    let node_count = session.graph().nodes.len();
    assert!(session
        .generate_follow_ups_for(&first.answer_id)
        .await
        .unwrap()
        .is_empty());
    assert!(session
        .generate_follow_ups_for(&second.answer_id)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(session.graph().nodes.len(), node_count);
}
