//! Mock transport for testing.
//!
//! Plays back scripted event streams and records every submitted query so
//! tests can verify session behavior without network access.

use async_trait::async_trait;
use futures::stream;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::codec::StatusEvent;
use crate::traits::{StatusEventStream, Transport, TransportError};

/// One scripted response for a `open` call.
#[derive(Debug, Clone)]
pub enum MockStream {
    /// Yield these items in order, then end the stream
    Events(Vec<Result<StatusEvent, TransportError>>),
    /// Fail the open call itself
    OpenError(TransportError),
    /// A stream that never yields (stalled server)
    Pending,
}

/// Mock transport that replays scripted streams.
///
/// Clones share state, so a test can keep one handle for assertions while
/// the session owns another.
///
/// # Example
///
/// ```ignore
/// use storebot::adapters::{MockStream, MockTransport};
///
/// let transport = MockTransport::new();
/// transport.enqueue(MockStream::Events(vec![Ok(event)]));
///
/// let handle = transport.clone();
/// // ... run the session against `transport` ...
/// assert_eq!(handle.queries(), vec!["질문".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    /// Scripted responses, consumed in order
    script: Arc<Mutex<VecDeque<MockStream>>>,
    /// Every query passed to `open`, in call order
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockTransport {
    /// Create a mock transport with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next scripted response.
    pub fn enqueue(&self, stream: MockStream) {
        self.script.lock().unwrap().push_back(stream);
    }

    /// All queries submitted so far.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    /// Number of times `open` was called.
    pub fn open_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn open(&self, query: &str) -> Result<StatusEventStream, TransportError> {
        self.queries.lock().unwrap().push(query.to_string());

        let next = self.script.lock().unwrap().pop_front();
        match next {
            // An exhausted script behaves as an immediately-closed stream
            None => Ok(Box::pin(stream::empty())),
            Some(MockStream::Events(events)) => Ok(Box::pin(stream::iter(events))),
            Some(MockStream::OpenError(err)) => Err(err),
            Some(MockStream::Pending) => Ok(Box::pin(stream::pending())),
        }
    }
}
