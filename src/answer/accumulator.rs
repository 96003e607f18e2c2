//! Per-query accumulation of streamed answer text.

use crate::codec::StatusEvent;
use tracing::warn;

/// Terminal state of one streamed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Events are still being applied
    InFlight,
    /// The stream finished normally
    Completed,
    /// The server reported an error
    Failed,
}

/// What one applied event did to the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// The accumulated text was extended; re-render the full text
    Updated,
    /// The outcome became Completed
    Completed,
    /// The outcome became Failed
    Failed,
    /// The event arrived after a terminal outcome and was dropped
    Ignored,
}

/// Folds the status events of one query into answer text and an outcome.
///
/// Text is append-only while in flight and frozen once the outcome turns
/// terminal; the outcome transitions `InFlight -> {Completed, Failed}`
/// exactly once. An `Error` event replaces the text accumulated so far with
/// the server's message, so a half-formed answer is never presented as if it
/// were complete.
#[derive(Debug)]
pub struct ResponseAccumulator {
    /// The submitted question, immutable for the session's lifetime
    query: String,
    /// Concatenation of all processing fragments in arrival order
    text: String,
    outcome: Outcome,
}

impl ResponseAccumulator {
    /// Create an accumulator for one submitted query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            text: String::new(),
            outcome: Outcome::InFlight,
        }
    }

    /// The query this accumulator belongs to.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The full accumulated text (or the error message once Failed).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Whether a terminal outcome has been reached.
    pub fn is_terminal(&self) -> bool {
        self.outcome != Outcome::InFlight
    }

    /// Apply one decoded event in arrival order.
    ///
    /// Events delivered after a terminal outcome are a protocol violation by
    /// the transport; they are logged and dropped, never applied.
    pub fn apply(&mut self, event: StatusEvent) -> Progress {
        if self.is_terminal() {
            warn!(
                status = event.status_name(),
                "status event after terminal outcome ignored"
            );
            return Progress::Ignored;
        }

        match event {
            StatusEvent::Processing { data } => {
                self.text.push_str(&data);
                Progress::Updated
            }
            StatusEvent::Complete { .. } => {
                self.outcome = Outcome::Completed;
                Progress::Completed
            }
            StatusEvent::Error { data } => {
                self.text = data;
                self.outcome = Outcome::Failed;
                Progress::Failed
            }
        }
    }

    /// Mark an in-flight accumulation complete at end of stream.
    ///
    /// The server may close the stream without a `complete` record; the
    /// answer gathered so far is still final. No-op once terminal.
    pub fn finish(&mut self) -> Outcome {
        if self.outcome == Outcome::InFlight {
            self.outcome = Outcome::Completed;
        }
        self.outcome
    }
}
