//! Local fallback generator
//!
//! Produces reflective questions from diary text without any network call.
//! Selection is keyword-driven (emotion words, activity words, people) so the
//! questions at least acknowledge what the entry is about, and the output is
//! fully deterministic: the same text always yields the same list.

/// Words suggesting the entry describes a feeling.
const EMOTION_WORDS: &[&str] = &[
    "happy", "glad", "excited", "proud", "relieved", "sad", "upset", "anxious", "nervous",
    "worried", "angry", "frustrated", "lonely", "tired", "stressed", "afraid", "scared",
];

/// Words suggesting the entry describes something the writer did.
const ACTIVITY_WORDS: &[&str] = &[
    "went", "did", "made", "met", "tried", "worked", "played", "visited", "finished",
    "started", "talked", "walked", "cooked", "wrote",
];

/// Words suggesting another person appears in the entry.
const PERSON_WORDS: &[&str] = &[
    "friend", "family", "mom", "dad", "mother", "father", "sister", "brother", "partner",
    "coworker", "colleague", "boss", "neighbor",
];

/// How much of the source text gets quoted back inside a question.
const SNIPPET_CHARS: usize = 50;

/// Shorter quote used when reflecting an answer back in a follow-up.
const ANSWER_SNIPPET_CHARS: usize = 30;

/// General-purpose reflective questions used to pad a list up to the
/// requested count once the keyword-driven ones are exhausted.
const GENERIC_QUESTIONS: &[&str] = &[
    "How are you different today from who you were six months ago, and how does that change feel?",
    "If you could relive one moment of today, which would you choose, and why that one?",
    "What did you avoid thinking about today, and what might that avoidance be protecting?",
    "What small detail of today do you suspect you will still remember in a year?",
    "What would the calmest version of you say about today?",
    "Which expectation of yours did today quietly confirm or quietly break?",
    "What are you grateful for today that you almost did not notice?",
    "If today had a title, what would it be, and what does that title leave out?",
];

const GENERIC_FOLLOW_UPS: &[&str] = &[
    "What value or belief of yours sits underneath that answer?",
    "What is the biggest difference between how your past self and your present self would answer this?",
    "If there were something your inner voice truly wants here, what would it be?",
    "What would it take for you to feel settled about this topic?",
    "Who in your life would most understand this answer, and why them?",
    "If this feeling had a color or a shape, what would it look like?",
];

/// Deterministic keyword-template question generator.
///
/// Guarantees: for any input text and any `count`, the returned list holds
/// exactly `count` distinct, non-empty questions.
#[derive(Debug, Clone, Default)]
pub struct FallbackGenerator;

impl FallbackGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate `count` reflective questions for a diary entry.
    pub fn questions(&self, diary_content: &str, count: usize) -> Vec<String> {
        let lower = diary_content.to_lowercase();
        let has_feeling = contains_any(&lower, EMOTION_WORDS);
        let has_activity = contains_any(&lower, ACTIVITY_WORDS);
        let has_person = contains_any(&lower, PERSON_WORDS);
        let snippet = snippet_of(diary_content, SNIPPET_CHARS);

        let mut questions = Vec::new();

        if has_feeling {
            questions.push(
                "Of the feelings you wrote about today, which one lingers the most, and what might it be trying to tell you?"
                    .to_string(),
            );
        } else if !snippet.is_empty() {
            questions.push(format!(
                "You wrote \"{}...\" - what made this moment stand out enough to write down?",
                snippet
            ));
        }

        if has_person {
            questions.push(
                "In today's interactions with others, what were you really hoping to receive, or to give?"
                    .to_string(),
            );
        } else if has_activity {
            questions.push(
                "Looking at what you did today, was there anything you were quietly avoiding, or quietly choosing?"
                    .to_string(),
            );
        }

        pad_distinct(&mut questions, GENERIC_QUESTIONS, count);
        questions.truncate(count);
        questions
    }

    /// Generate `count` follow-up questions for an answered question.
    pub fn follow_ups(&self, _original_question: &str, answer: &str, count: usize) -> Vec<String> {
        let mut questions = Vec::new();
        let trimmed = answer.trim();

        if trimmed.chars().count() > 20 {
            let snippet = snippet_of(trimmed, ANSWER_SNIPPET_CHARS);
            questions.push(format!(
                "In your answer \"{}...\", is there something you wanted to say but could not quite put into words?",
                snippet
            ));

            let lower = trimmed.to_lowercase();
            if lower.contains("feel") || lower.contains("felt") || lower.contains("think") {
                questions.push(
                    "When you sat with that feeling, where did you sense it in your body, and what was it telling you?"
                        .to_string(),
                );
            } else {
                questions.push(
                    "Did this experience shift any of your priorities, or make one of them feel more certain?"
                        .to_string(),
                );
            }

            questions.push(
                "If the you of five years from now could comment on this answer, what would they say?"
                    .to_string(),
            );
        }

        pad_distinct(&mut questions, GENERIC_FOLLOW_UPS, count);
        questions.truncate(count);
        questions
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// First `max_chars` characters of `text`, trimmed. Character-based so a
/// multi-byte entry never gets sliced mid-codepoint.
fn snippet_of(text: &str, max_chars: usize) -> String {
    text.trim().chars().take(max_chars).collect()
}

/// Append entries from `pool` (in order) until `questions` reaches `count`,
/// skipping anything already present. If the pool runs dry, numbered variants
/// of the last pool entry keep the distinctness guarantee.
fn pad_distinct(questions: &mut Vec<String>, pool: &[&str], count: usize) {
    for candidate in pool {
        if questions.len() >= count {
            return;
        }
        if !questions.iter().any(|q| q == candidate) {
            questions.push((*candidate).to_string());
        }
    }

    let mut n = 2;
    while questions.len() < count {
        let candidate = format!("{} (part {})", pool[pool.len() - 1], n);
        if !questions.contains(&candidate) {
            questions.push(candidate);
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_distinct_non_empty(questions: &[String]) {
        for (i, q) in questions.iter().enumerate() {
            assert!(!q.trim().is_empty(), "question {} is empty", i);
            for other in &questions[i + 1..] {
                assert_ne!(q, other, "duplicate question: {}", q);
            }
        }
    }

    #[test]
    fn test_questions_exact_count() {
        let gen = FallbackGenerator::new();
        for count in 1..=5 {
            let questions = gen.questions("Met Sam for coffee, felt anxious about the project", count);
            assert_eq!(questions.len(), count);
            assert_distinct_non_empty(&questions);
        }
    }

    #[test]
    fn test_questions_deterministic() {
        let gen = FallbackGenerator::new();
        let text = "Went for a run with a friend, felt proud of myself afterwards";
        assert_eq!(gen.questions(text, 3), gen.questions(text, 3));
    }

    #[test]
    fn test_emotion_branch_reflects_feelings() {
        let gen = FallbackGenerator::new();
        let questions = gen.questions("I felt anxious all day", 2);
        assert!(questions[0].contains("feelings"));
    }

    #[test]
    fn test_plain_entry_quotes_snippet() {
        let gen = FallbackGenerator::new();
        let questions = gen.questions("The bakery on the corner finally reopened", 2);
        assert!(questions[0].contains("The bakery on the corner"));
    }

    #[test]
    fn test_follow_ups_quote_long_answers() {
        let gen = FallbackGenerator::new();
        let questions = gen.follow_ups(
            "What made today special?",
            "I felt relieved afterward because the pressure finally lifted",
            3,
        );
        assert_eq!(questions.len(), 3);
        assert!(questions[0].contains("I felt relieved afterward"));
        assert_distinct_non_empty(&questions);
    }

    #[test]
    fn test_follow_ups_short_answer_uses_generic_pool() {
        let gen = FallbackGenerator::new();
        let questions = gen.follow_ups("Why?", "Yes.", 3);
        assert_eq!(questions.len(), 3);
        assert_distinct_non_empty(&questions);
    }

    #[test]
    fn test_count_beyond_pool_stays_distinct() {
        let gen = FallbackGenerator::new();
        let questions = gen.questions("a quiet day", 15);
        assert_eq!(questions.len(), 15);
        assert_distinct_non_empty(&questions);
    }

    #[test]
    fn test_multibyte_snippet_does_not_panic() {
        let gen = FallbackGenerator::new();
        let questions = gen.questions("今日はとても静かな一日だった。散歩をして、本を読んだ。", 2);
        assert_eq!(questions.len(), 2);
    }
}
