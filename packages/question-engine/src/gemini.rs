//! Gemini remote question source
//!
//! Thin client for the Gemini `generateContent` REST endpoint. Prompts ask
//! for a JSON array of question strings; model output is often wrapped in
//! markdown fences or prose, so the response path extracts the first JSON
//! array before parsing.

use crate::config::GeneratorConfig;
use crate::engine::QuestionSource;
use crate::error::{GeneratorError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Request format for the `generateContent` endpoint
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

/// Response format from the `generateContent` endpoint
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// Remote question source backed by the Gemini API.
#[derive(Debug)]
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeneratorConfig,
}

impl GeminiClient {
    /// Create a client from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an invalid configuration and `MissingApiKey`
    /// when no credentials are present.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate().map_err(GeneratorError::ConfigError)?;
        if !config.has_credentials() {
            return Err(GeneratorError::MissingApiKey);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    fn build_question_prompt(&self, diary_content: &str, count: usize) -> String {
        format!(
            r#"You are an experienced counselor. Read the diary entry below carefully and generate {count} questions that invite the writer to explore their inner experience.

Each question must:
1. Quote or reference a concrete person, place, event, or feeling from the entry.
2. Probe beneath the surface - the wish, fear, or value behind what happened.
3. Recall a specific moment ("at that moment", "when you...") rather than generalities.
4. Stay open-ended - never answerable with yes or no.

Diary entry:
{diary_content}

Output format (JSON array only, each question 40-120 characters):
["question 1", "question 2"]"#,
            count = count,
            diary_content = diary_content,
        )
    }

    fn build_follow_up_prompt(
        &self,
        original_question: &str,
        answer: &str,
        diary_content: Option<&str>,
        count: usize,
    ) -> String {
        let diary_section = diary_content
            .map(|d| format!("Original diary entry:\n{}\n\n", d))
            .unwrap_or_default();

        format!(
            r#"You are a counselor skilled in depth psychology. Analyze the exchange below and generate {count} follow-up questions that explore what the writer has not yet put into words.

Each question must:
1. Quote a specific word or phrase from the answer.
2. Probe ambivalence - the "but", "however", or hesitation hiding in the reply.
3. Ask about bodily sensation, timing, or relationships where relevant.
4. Stay open-ended and compassionate.

{diary_section}Original question: {original_question}
Answer: {answer}

Output format (JSON array only, each question 40-120 characters):
["question 1", "question 2"]"#,
            count = count,
            diary_section = diary_section,
            original_question = original_question,
            answer = answer,
        )
    }

    /// Send a prompt and return the raw model text.
    async fn generate(&self, prompt: String) -> Result<String> {
        // has_credentials() was checked at construction; re-read here so a
        // blanked-out key still fails closed instead of sending garbage.
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(GeneratorError::MissingApiKey)?;

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model,
            api_key,
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(GeneratorError::ApiStatus {
                status: response.status().as_u16(),
            });
        }

        let body: GenerateContentResponse = response.json().await?;

        body.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| GeneratorError::MalformedResponse("empty candidate list".to_string()))
    }

    /// Parse model output into at most `count` trimmed question strings.
    fn parse_questions(&self, raw: &str, count: usize) -> Result<Vec<String>> {
        let json = extract_json_array(raw)
            .ok_or_else(|| GeneratorError::MalformedResponse(format!("no JSON array in: {}", raw)))?;

        let questions: Vec<String> = serde_json::from_str(&json)
            .map_err(|e| GeneratorError::MalformedResponse(format!("invalid JSON array: {}", e)))?;

        let questions: Vec<String> = questions
            .into_iter()
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .take(count)
            .collect();

        if questions.is_empty() {
            return Err(GeneratorError::MalformedResponse(
                "model returned no usable questions".to_string(),
            ));
        }

        Ok(questions)
    }
}

#[async_trait]
impl QuestionSource for GeminiClient {
    async fn generate_questions(&self, diary_content: &str, count: usize) -> Result<Vec<String>> {
        let prompt = self.build_question_prompt(diary_content, count);
        let raw = self.generate(prompt).await?;
        self.parse_questions(&raw, count)
    }

    async fn generate_follow_ups(
        &self,
        original_question: &str,
        answer: &str,
        diary_content: Option<&str>,
        count: usize,
    ) -> Result<Vec<String>> {
        let prompt = self.build_follow_up_prompt(original_question, answer, diary_content, count);
        let raw = self.generate(prompt).await?;
        self.parse_questions(&raw, count)
    }
}

/// Extract the first JSON array from potentially messy LLM output
fn extract_json_array(output: &str) -> Option<String> {
    // Remove markdown code blocks if present
    let cleaned = output
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    let start = cleaned.find('[')?;
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in cleaned[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '[' if !in_string => depth += 1,
            ']' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(cleaned[start..start + i + c.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }

    None
}
