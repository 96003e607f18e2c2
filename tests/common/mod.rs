//! Shared test helpers.

// Not every test binary uses every helper
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use storebot::models::ParsedAnswer;
use storebot::traits::Presenter;

/// One presenter call, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seen {
    ShowLoading,
    HideLoading,
    Incremental(String),
    Completed(ParsedAnswer),
    Failed(String),
}

/// Presenter that records every call; clones share the log so a test can
/// keep a handle while the session owns the presenter.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    log: Arc<Mutex<Vec<Seen>>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> Vec<Seen> {
        self.log.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Seen> {
        self.log.lock().unwrap().last().cloned()
    }

    /// The final parsed answer, if the session completed.
    pub fn final_answer(&self) -> Option<ParsedAnswer> {
        match self.last() {
            Some(Seen::Completed(answer)) => Some(answer),
            _ => None,
        }
    }

    /// Texts of all incremental updates, in order.
    pub fn incrementals(&self) -> Vec<String> {
        self.log()
            .into_iter()
            .filter_map(|seen| match seen {
                Seen::Incremental(text) => Some(text),
                _ => None,
            })
            .collect()
    }
}

impl Presenter for RecordingPresenter {
    fn show_loading(&mut self) {
        self.log.lock().unwrap().push(Seen::ShowLoading);
    }

    fn hide_loading(&mut self) {
        self.log.lock().unwrap().push(Seen::HideLoading);
    }

    fn incremental(&mut self, text: &str) {
        self.log.lock().unwrap().push(Seen::Incremental(text.to_string()));
    }

    fn completed(&mut self, answer: &ParsedAnswer) {
        self.log.lock().unwrap().push(Seen::Completed(answer.clone()));
    }

    fn failed(&mut self, message: &str) {
        self.log.lock().unwrap().push(Seen::Failed(message.to_string()));
    }
}
