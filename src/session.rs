//! Streaming session orchestration.
//!
//! One [`ChatSession`] owns one widget's query lifecycle: it enforces the
//! single-flight guard, opens the transport, pulls decoded events in arrival
//! order, folds them through the accumulator, and emits state transitions to
//! the presenter. Finalization (trailer parse + final render) happens exactly
//! once per submission.

use futures::StreamExt;
use tracing::{debug, warn};

use crate::answer::{parse_answer, Outcome, Progress, ResponseAccumulator};
use crate::traits::{Presenter, Transport};

/// Fixed user-facing message for transport-level failures.
pub const FALLBACK_MESSAGE: &str = "죄송합니다. 현재 응답을 생성할 수 없습니다.";

/// How a call to [`ChatSession::submit`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The stream finished and the final answer was rendered
    Completed,
    /// The server reported an error or the transport failed
    Failed,
    /// The submission was silently dropped (empty query, or one already in
    /// flight)
    Dropped,
}

/// Orchestrates one in-flight query per chat widget.
///
/// At most one session is in flight at a time: submissions made while the
/// guard is set are dropped, not queued. The guard clears when the session
/// reaches a terminal state, permitting the next submission. A cancelled
/// (dropped) `submit` future leaves the guard set; [`reset`](Self::reset)
/// clears it.
pub struct ChatSession<T: Transport, P: Presenter> {
    transport: T,
    presenter: P,
    /// Single-flight guard, set at submission and cleared at finalization
    in_flight: bool,
}

impl<T: Transport, P: Presenter> ChatSession<T, P> {
    /// Create a session bound to a transport and presenter.
    pub fn new(transport: T, presenter: P) -> Self {
        Self {
            transport,
            presenter,
            in_flight: false,
        }
    }

    /// Whether a query is currently in flight.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Clear a stale guard left by a cancelled submission.
    pub fn reset(&mut self) {
        self.in_flight = false;
    }

    /// The presenter, for inspection after a session ends.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Submit a query and drive its stream to a terminal state.
    ///
    /// Empty queries and submissions while one is in flight are dropped
    /// without touching the transport. Every other path ends in exactly one
    /// final render: `completed` with the parsed answer, or `failed` with
    /// either the server's error text (verbatim) or [`FALLBACK_MESSAGE`]
    /// for transport failures.
    pub async fn submit(&mut self, query: &str) -> SubmitOutcome {
        let query = query.trim();
        if query.is_empty() {
            return SubmitOutcome::Dropped;
        }
        if self.in_flight {
            debug!(query, "submission dropped, session already in flight");
            return SubmitOutcome::Dropped;
        }

        self.in_flight = true;
        self.presenter.show_loading();
        let outcome = self.consume_stream(query).await;
        self.in_flight = false;
        outcome
    }

    /// Open the transport and fold its events into a final render.
    async fn consume_stream(&mut self, query: &str) -> SubmitOutcome {
        let mut events = match self.transport.open(query).await {
            Ok(events) => events,
            Err(e) => {
                warn!(error = %e, "failed to open response stream");
                return self.fail_with_fallback();
            }
        };

        let mut accumulator = ResponseAccumulator::new(query);
        let mut loading_cleared = false;

        while let Some(item) = events.next().await {
            match item {
                Ok(event) => {
                    if !loading_cleared {
                        loading_cleared = true;
                        self.presenter.hide_loading();
                    }
                    match accumulator.apply(event) {
                        Progress::Updated => self.presenter.incremental(accumulator.text()),
                        // Terminal records stop consumption; dropping the
                        // stream closes the connection
                        Progress::Completed | Progress::Failed => break,
                        Progress::Ignored => {}
                    }
                }
                Err(e) => {
                    warn!(error = %e, "response stream failed mid-flight");
                    return self.fail_with_fallback();
                }
            }
        }

        self.presenter.hide_loading();
        match accumulator.finish() {
            Outcome::Failed => {
                self.presenter.failed(accumulator.text());
                SubmitOutcome::Failed
            }
            // Completed, or end-of-stream without a terminal record
            _ => {
                let answer = parse_answer(accumulator.text());
                self.presenter.completed(&answer);
                SubmitOutcome::Completed
            }
        }
    }

    /// Render the fixed fallback message for a transport-level failure.
    fn fail_with_fallback(&mut self) -> SubmitOutcome {
        self.presenter.hide_loading();
        self.presenter.failed(FALLBACK_MESSAGE);
        SubmitOutcome::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MockStream, MockTransport};
    use crate::codec::StatusEvent;
    use crate::models::ParsedAnswer;
    use crate::traits::TransportError;
    use std::sync::{Arc, Mutex};

    /// What a presenter saw, in order.
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Seen {
        ShowLoading,
        HideLoading,
        Incremental(String),
        Completed(ParsedAnswer),
        Failed(String),
    }

    /// Presenter that records every call; clones share the log.
    #[derive(Debug, Clone, Default)]
    struct RecordingPresenter {
        log: Arc<Mutex<Vec<Seen>>>,
    }

    impl RecordingPresenter {
        fn new() -> Self {
            Self::default()
        }

        fn log(&self) -> Vec<Seen> {
            self.log.lock().unwrap().clone()
        }

        fn last(&self) -> Option<Seen> {
            self.log.lock().unwrap().last().cloned()
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

    fn processing(data: &str) -> Result<StatusEvent, TransportError> {
        Ok(StatusEvent::Processing {
            data: data.to_string(),
        })
    }

    fn session_with(
        script: Vec<MockStream>,
    ) -> (
        ChatSession<MockTransport, RecordingPresenter>,
        MockTransport,
        RecordingPresenter,
    ) {
        let transport = MockTransport::new();
        for item in script {
            transport.enqueue(item);
        }
        let presenter = RecordingPresenter::new();
        let session = ChatSession::new(transport.clone(), presenter.clone());
        (session, transport, presenter)
    }

    #[tokio::test]
    async fn test_streamed_answer_is_accumulated_and_finalized() {
        let (mut session, transport, presenter) = session_with(vec![MockStream::Events(vec![
            processing("Answer text.\n"),
            processing("추천 질문:\n- Q1?\n"),
            processing("- Q2?\n"),
            Ok(StatusEvent::Complete {
                data: Some("Stream finished".to_string()),
            }),
        ])]);

        let outcome = session.submit("어떤 질문").await;

        assert_eq!(outcome, SubmitOutcome::Completed);
        assert!(!session.is_in_flight());
        assert_eq!(transport.queries(), vec!["어떤 질문".to_string()]);

        let log = presenter.log();
        // Loading shown, cleared on first event, incremental full-text
        // updates in order, then one final render
        assert_eq!(log[0], Seen::ShowLoading);
        assert_eq!(log[1], Seen::HideLoading);
        assert_eq!(log[2], Seen::Incremental("Answer text.\n".to_string()));
        assert_eq!(
            log[3],
            Seen::Incremental("Answer text.\n추천 질문:\n- Q1?\n".to_string())
        );
        match log.last().unwrap() {
            Seen::Completed(answer) => {
                assert_eq!(answer.main_text, "Answer text.");
                let texts: Vec<&str> = answer
                    .recommended_questions
                    .iter()
                    .map(|q| q.text.as_str())
                    .collect();
                assert_eq!(texts, vec!["Q1?", "Q2?"]);
            }
            other => panic!("Expected Completed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_stream_end_without_complete_record_finalizes() {
        let (mut session, _transport, presenter) =
            session_with(vec![MockStream::Events(vec![processing("partial answer")])]);

        let outcome = session.submit("q").await;
        assert_eq!(outcome, SubmitOutcome::Completed);
        assert_eq!(
            presenter.last(),
            Some(Seen::Completed(ParsedAnswer::plain("partial answer")))
        );
    }

    #[tokio::test]
    async fn test_error_record_replaces_text_and_fails() {
        let (mut session, _transport, presenter) = session_with(vec![MockStream::Events(vec![
            processing("half an ans"),
            Ok(StatusEvent::Error {
                data: "질문과 관련된 FAQ가 없습니다.".to_string(),
            }),
            // Anything after the error must never be consumed
            processing("stray"),
        ])]);

        let outcome = session.submit("q").await;
        assert_eq!(outcome, SubmitOutcome::Failed);
        // The error text is rendered verbatim, not the half-formed answer
        assert_eq!(
            presenter.last(),
            Some(Seen::Failed("질문과 관련된 FAQ가 없습니다.".to_string()))
        );
        assert!(!presenter
            .log()
            .iter()
            .any(|s| matches!(s, Seen::Incremental(t) if t.contains("stray"))));
    }

    #[tokio::test]
    async fn test_open_failure_renders_fallback() {
        let (mut session, _transport, presenter) =
            session_with(vec![MockStream::OpenError(TransportError::ServerError {
                status: 500,
                message: "Internal Server Error".to_string(),
            })]);

        let outcome = session.submit("q").await;
        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(
            presenter.last(),
            Some(Seen::Failed(FALLBACK_MESSAGE.to_string()))
        );
    }

    #[tokio::test]
    async fn test_mid_stream_transport_error_renders_fallback() {
        let (mut session, _transport, presenter) = session_with(vec![MockStream::Events(vec![
            processing("some text"),
            Err(TransportError::Io("connection reset".to_string())),
        ])]);

        let outcome = session.submit("q").await;
        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(
            presenter.last(),
            Some(Seen::Failed(FALLBACK_MESSAGE.to_string()))
        );
    }

    #[tokio::test]
    async fn test_empty_query_is_dropped() {
        let (mut session, transport, presenter) = session_with(vec![]);

        assert_eq!(session.submit("   ").await, SubmitOutcome::Dropped);
        assert_eq!(transport.open_count(), 0);
        assert!(presenter.log().is_empty());
    }

    #[tokio::test]
    async fn test_single_flight_guard_drops_second_submission() {
        let (mut session, transport, _presenter) = session_with(vec![
            MockStream::Pending,
            MockStream::Events(vec![processing("x")]),
        ]);

        {
            // Start a submission against a stalled stream, then cancel it;
            // the guard stays set because no finalization ran
            let mut first = Box::pin(session.submit("first"));
            assert!(futures::poll!(first.as_mut()).is_pending());
        }
        assert!(session.is_in_flight());

        let outcome = session.submit("second").await;
        assert_eq!(outcome, SubmitOutcome::Dropped);
        // No duplicate request reached the transport
        assert_eq!(transport.queries(), vec!["first".to_string()]);

        // Releasing the guard permits the next submission
        session.reset();
        assert_eq!(session.submit("third").await, SubmitOutcome::Completed);
        assert_eq!(
            transport.queries(),
            vec!["first".to_string(), "third".to_string()]
        );
    }

    #[tokio::test]
    async fn test_malformed_line_resilience_equivalence() {
        // A discarded line never reaches the session, so a stream with one
        // removed yields the same final state; the accumulator level
        // equivalent is an Ignored no-op between valid events
        let (mut session_a, _ta, presenter_a) = session_with(vec![MockStream::Events(vec![
            processing("Hel"),
            processing("lo"),
            Ok(StatusEvent::Complete { data: None }),
        ])]);
        let (mut session_b, _tb, presenter_b) = session_with(vec![MockStream::Events(vec![
            processing("Hel"),
            processing(""),
            processing("lo"),
            Ok(StatusEvent::Complete { data: None }),
        ])]);

        session_a.submit("q").await;
        session_b.submit("q").await;
        assert_eq!(presenter_a.last(), presenter_b.last());
        assert_eq!(
            presenter_a.last(),
            Some(Seen::Completed(ParsedAnswer::plain("Hello")))
        );
    }
}
