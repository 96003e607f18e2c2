//! Trailer parsing for finished answers.
//!
//! The model is prompted to end its answer with a fixed `추천 질문:` marker
//! followed by dash-prefixed follow-up questions. Parsing is pure and
//! deterministic: the same input always yields the same [`ParsedAnswer`].

use crate::models::{ParsedAnswer, RecommendedQuestion};

/// Fixed marker separating the main answer from the recommended questions.
pub const RECOMMENDED_DELIMITER: &str = "추천 질문:";

/// List-item prefix for one recommended question.
const QUESTION_PREFIX: char = '-';

/// Split a finished answer into main text and recommended questions.
///
/// Everything before the first delimiter occurrence is the trimmed main
/// text. After the delimiter, each trimmed non-empty line that starts with a
/// dash and is longer than the dash alone is one question; its text is the
/// line with exactly the first dash removed, then trimmed.
///
/// Only the first dash is stripped, not a dash-plus-space prefix, so
/// `"--double"` yields `"-double"`. Existing servers rely on this and it is
/// kept for backward compatibility.
pub fn parse_answer(full_text: &str) -> ParsedAnswer {
    let Some((main, trailer)) = full_text.split_once(RECOMMENDED_DELIMITER) else {
        return ParsedAnswer::plain(full_text.trim());
    };

    let recommended_questions = trailer
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with(QUESTION_PREFIX) && line.len() > QUESTION_PREFIX.len_utf8())
        .map(|line| RecommendedQuestion::new(line.replacen(QUESTION_PREFIX, "", 1).trim()))
        .collect();

    ParsedAnswer {
        main_text: main.trim().to_string(),
        recommended_questions,
    }
}

/// Escape the five XSS-relevant characters for embedding in markup.
///
/// Applied once per render pass; already-escaped input is escaped again if
/// re-applied, by design (no auto-detection).
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

impl ParsedAnswer {
    /// Render the chat-bubble markup for this answer.
    ///
    /// Mirrors the widget's final layout: the answer text, then a
    /// recommended-questions block with one clickable entry per question.
    /// Every interpolated string passes through [`escape_html`] exactly
    /// once. Answers without questions render as a single text block;
    /// plain-text display paths should use `main_text` directly instead.
    pub fn to_html(&self) -> String {
        let mut html = format!("<div>{}</div>", escape_html(&self.main_text));

        if self.recommended_questions.is_empty() {
            return html;
        }

        html.push_str("<div class=\"recommended-title\">\n 추천 질문:</div>");
        for question in &self.recommended_questions {
            let text = escape_html(&question.text);
            html.push_str(&format!(
                "<a class=\"recommended-question\" href=\"#\" data-question=\"{}\">{}</a>",
                text, text
            ));
        }
        html
    }
}
