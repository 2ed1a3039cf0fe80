//! Question engine - remote-first generation with guaranteed fallback
//!
//! `QuestionEngine` is the only type callers should need: it owns an optional
//! remote [`QuestionSource`] plus the local [`FallbackGenerator`], and its
//! generation methods are infallible. Any remote problem (no credentials,
//! network error, unusable response) is logged and absorbed by falling back,
//! so a caller building a mind-map never has to handle a generation error.

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::fallback::FallbackGenerator;
use crate::gemini::GeminiClient;
use async_trait::async_trait;
use std::sync::Arc;

/// Contract for a remote question generator.
///
/// Implementations may fail - the engine is responsible for recovery. An
/// unconfigured source must report `GeneratorError::MissingApiKey` rather
/// than silently returning nothing, so the engine can distinguish "not set
/// up" from "broken".
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Generate up to `count` reflective questions for a diary entry.
    async fn generate_questions(&self, diary_content: &str, count: usize) -> Result<Vec<String>>;

    /// Generate up to `count` follow-up questions for an answered question.
    async fn generate_follow_ups(
        &self,
        original_question: &str,
        answer: &str,
        diary_content: Option<&str>,
        count: usize,
    ) -> Result<Vec<String>>;
}

/// Never-fail question generator combining a remote source with the local
/// fallback.
pub struct QuestionEngine {
    remote: Option<Arc<dyn QuestionSource>>,
    fallback: FallbackGenerator,
}

impl QuestionEngine {
    /// Build an engine from configuration. Without credentials (or with an
    /// invalid configuration) the engine runs purely on the fallback.
    pub fn from_config(config: GeneratorConfig) -> Self {
        let remote: Option<Arc<dyn QuestionSource>> = if config.has_credentials() {
            match GeminiClient::new(config) {
                Ok(client) => Some(Arc::new(client)),
                Err(e) => {
                    tracing::warn!("Remote generator unavailable, using fallback only: {}", e);
                    None
                }
            }
        } else {
            tracing::debug!("No generator credentials configured, using fallback only");
            None
        };

        Self {
            remote,
            fallback: FallbackGenerator::new(),
        }
    }

    /// Build an engine around an explicit source (used by tests and embedders
    /// that bring their own client).
    pub fn with_source(source: Arc<dyn QuestionSource>) -> Self {
        Self {
            remote: Some(source),
            fallback: FallbackGenerator::new(),
        }
    }

    /// Build a fallback-only engine.
    pub fn fallback_only() -> Self {
        Self {
            remote: None,
            fallback: FallbackGenerator::new(),
        }
    }

    /// True when a remote source is configured.
    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Generate exactly `count`-or-fewer questions for a diary entry.
    ///
    /// Never fails and never returns an empty list for `count > 0`: the
    /// fallback guarantees `count` questions whenever the remote source
    /// cannot deliver.
    pub async fn generate_questions(&self, diary_content: &str, count: usize) -> Vec<String> {
        if let Some(remote) = &self.remote {
            match remote.generate_questions(diary_content, count).await {
                Ok(questions) if !questions.is_empty() => return questions,
                Ok(_) => {
                    tracing::warn!("Remote generator returned no questions, using fallback");
                }
                Err(e) => {
                    tracing::warn!("Question generation failed, using fallback: {}", e);
                }
            }
        }

        self.fallback.questions(diary_content, count)
    }

    /// Generate follow-up questions for an answered question. Same recovery
    /// behavior as [`generate_questions`](Self::generate_questions).
    pub async fn generate_follow_ups(
        &self,
        original_question: &str,
        answer: &str,
        diary_content: Option<&str>,
        count: usize,
    ) -> Vec<String> {
        if let Some(remote) = &self.remote {
            match remote
                .generate_follow_ups(original_question, answer, diary_content, count)
                .await
            {
                Ok(questions) if !questions.is_empty() => return questions,
                Ok(_) => {
                    tracing::warn!("Remote generator returned no follow-ups, using fallback");
                }
                Err(e) => {
                    tracing::warn!("Follow-up generation failed, using fallback: {}", e);
                }
            }
        }

        self.fallback.follow_ups(original_question, answer, count)
    }
}
