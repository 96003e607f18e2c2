//! Terminal presenter for the chat loop.
//!
//! Streams the bot's answer to stdout as fragments arrive and prints the
//! parsed recommended questions as a block once the answer is final.

use std::io::{self, Write};

use crate::models::ParsedAnswer;
use crate::traits::Presenter;

const LOADING_TEXT: &str = "응답을 기다리는 중...";

/// Presenter that renders a session onto a terminal.
///
/// Incremental updates carry the full accumulated text; the presenter
/// remembers how much it already printed and emits only the new suffix, so
/// the answer appears to stream in place.
#[derive(Debug, Default)]
pub struct TerminalPresenter {
    /// Bytes of the current answer already written to the terminal
    printed: usize,
    loading: bool,
}

impl TerminalPresenter {
    /// Create a new terminal presenter.
    pub fn new() -> Self {
        Self::default()
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

impl Presenter for TerminalPresenter {
    fn show_loading(&mut self) {
        self.printed = 0;
        if !self.loading {
            self.loading = true;
            print!("{}", LOADING_TEXT);
            self.flush();
        }
    }

    fn hide_loading(&mut self) {
        if self.loading {
            self.loading = false;
            // Erase the indicator in place
            print!("\r{}\r", " ".repeat(LOADING_TEXT.len()));
            self.flush();
        }
    }

    fn incremental(&mut self, text: &str) {
        // Text is append-only, so everything before `printed` is already on
        // screen
        print!("{}", &text[self.printed..]);
        self.printed = text.len();
        self.flush();
    }

    fn completed(&mut self, answer: &ParsedAnswer) {
        if self.printed > 0 {
            println!();
        }
        if !answer.recommended_questions.is_empty() {
            println!();
            println!("[추천 질문]");
            for (index, question) in answer.recommended_questions.iter().enumerate() {
                println!("  {}. {}", index + 1, question.text);
            }
        }
        println!();
        self.printed = 0;
    }

    fn failed(&mut self, message: &str) {
        // Anything streamed before the failure is superseded by the message
        if self.printed > 0 {
            println!();
        }
        println!("{}", message);
        println!();
        self.printed = 0;
    }
}
