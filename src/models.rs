use serde::{Deserialize, Serialize};

/// Request body for the chat endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryRequest {
    /// The user's question
    pub query: String,
}

impl QueryRequest {
    /// Create a new QueryRequest.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

/// Result of parsing a finished answer's trailer section.
///
/// Produced once per completed session by `answer::trailer::parse_answer`.
/// If the answer carries no recommended-question delimiter, `main_text` is
/// the whole trimmed answer and `recommended_questions` is empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParsedAnswer {
    /// The answer text before the delimiter, trimmed
    pub main_text: String,
    /// Suggested follow-up questions in the order they appeared
    pub recommended_questions: Vec<RecommendedQuestion>,
}

impl ParsedAnswer {
    /// An answer with no trailer section.
    pub fn plain(main_text: impl Into<String>) -> Self {
        Self {
            main_text: main_text.into(),
            recommended_questions: Vec::new(),
        }
    }
}

/// A single suggested follow-up question.
///
/// Owned by the [`ParsedAnswer`] that produced it; submitting its text again
/// starts a brand-new session with no link back to this one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendedQuestion {
    /// The question text, exactly the substring after the list-item dash,
    /// trimmed
    pub text: String,
}

impl RecommendedQuestion {
    /// Create a new RecommendedQuestion.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
