/// Reverie Question Engine - Reflective Question Generation
///
/// This crate turns diary text (or a question/answer exchange) into a short
/// ordered list of reflective questions. Generation is remote-first with a
/// deterministic local fallback:
///
/// - **Remote source**: Gemini `generateContent` REST call, JSON-array output
/// - **Local fallback**: keyword-template heuristics, no network required
/// - **Never-fail contract**: the engine absorbs every remote failure
///   (missing credentials, network, malformed output) and falls back, so
///   callers always receive a non-empty question list
///
/// # Example
///
/// ```ignore
/// use reverie_question_engine::{GeneratorConfig, QuestionEngine};
///
/// #[tokio::main]
/// async fn main() {
///     let engine = QuestionEngine::from_config(GeneratorConfig::default());
///
///     // Without an API key this resolves through the local fallback.
///     let questions = engine
///         .generate_questions("Met Sam for coffee, felt anxious about the project", 2)
///         .await;
///
///     assert_eq!(questions.len(), 2);
/// }
/// ```
pub mod config;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod gemini;

// Re-export main types
pub use config::GeneratorConfig;
pub use engine::{QuestionEngine, QuestionSource};
pub use error::{GeneratorError, Result};
pub use fallback::FallbackGenerator;
pub use gemini::GeminiClient;
