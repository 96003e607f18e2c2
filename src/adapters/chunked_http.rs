//! Chunked HTTP transport binding.
//!
//! Sends the query as `POST /chat` with a JSON body and consumes the chunked
//! response body. Each flushed chunk carries part of one or more
//! newline-terminated status records; the line framer restores record
//! boundaries before decoding.

use async_trait::async_trait;
use futures_util::stream;
use futures_util::StreamExt;
use std::collections::VecDeque;

use crate::codec::{decode_or_discard, LineFramer};
use crate::models::QueryRequest;
use crate::traits::{StatusEventStream, Transport, TransportError};

/// Transport that streams the answer over a chunked POST response.
///
/// # Example
///
/// ```ignore
/// use storebot::adapters::ChunkedHttpTransport;
/// use storebot::traits::Transport;
///
/// let transport = ChunkedHttpTransport::new("http://127.0.0.1:8001");
/// let events = transport.open("배송 조회는 어떻게 하나요?").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ChunkedHttpTransport {
    /// Base URL of the chatbot API
    base_url: String,
    /// Reusable HTTP client
    client: reqwest::Client,
}

impl ChunkedHttpTransport {
    /// Create a transport for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a transport with a custom reqwest client.
    ///
    /// Lets callers configure connection pooling, TLS, or a request timeout;
    /// no timeout is set by default so long generations are not cut off.
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Convert a reqwest error from connection setup.
pub(crate) fn convert_error(err: reqwest::Error) -> TransportError {
    if err.is_connect() {
        TransportError::ConnectionFailed(err.to_string())
    } else {
        TransportError::Other(err.to_string())
    }
}

/// Unfold a response byte stream into decoded status events.
///
/// Malformed and blank lines are dropped at this boundary; a mid-stream
/// transport failure is surfaced once and ends the sequence. Shared by both
/// bindings via an optional SSE frame layer.
pub(crate) fn decode_byte_stream<S>(bytes_stream: S, sse_frames: bool) -> StatusEventStream
where
    S: futures_util::Stream<Item = Result<bytes::Bytes, reqwest::Error>> + Send + Unpin + 'static,
{
    use crate::codec::SseFrameDecoder;

    struct State<S> {
        bytes_stream: S,
        framer: LineFramer,
        frames: Option<SseFrameDecoder>,
        pending: VecDeque<crate::codec::StatusEvent>,
        done: bool,
    }

    impl<S> State<S> {
        /// Route one logical line through the optional frame layer into the
        /// pending queue.
        fn feed_line(&mut self, line: &str) {
            let payload = match &mut self.frames {
                Some(decoder) => match decoder.feed_line(line) {
                    Some(payload) => payload,
                    None => return,
                },
                None => line.to_string(),
            };
            if let Some(event) = decode_or_discard(&payload) {
                self.pending.push_back(event);
            }
        }

        /// Flush framer and frame-layer leftovers at end of input.
        fn finish(&mut self) {
            if let Some(line) = self.framer.finish() {
                self.feed_line(&line);
            }
            if let Some(payload) = self.frames.as_mut().and_then(|d| d.finish()) {
                if let Some(event) = decode_or_discard(&payload) {
                    self.pending.push_back(event);
                }
            }
        }
    }

    let state = State {
        bytes_stream,
        framer: LineFramer::new(),
        frames: sse_frames.then(SseFrameDecoder::new),
        pending: VecDeque::new(),
        done: false,
    };

    let events = stream::unfold(state, |mut state| async move {
        loop {
            // Drain decoded events before pulling more bytes
            if let Some(event) = state.pending.pop_front() {
                return Some((Ok(event), state));
            }
            if state.done {
                return None;
            }

            match state.bytes_stream.next().await {
                Some(Ok(chunk)) => {
                    for line in state.framer.push(&chunk) {
                        state.feed_line(&line);
                    }
                }
                Some(Err(e)) => {
                    state.done = true;
                    return Some((Err(TransportError::Io(e.to_string())), state));
                }
                None => {
                    state.finish();
                    state.done = true;
                }
            }
        }
    });

    Box::pin(events)
}

#[async_trait]
impl Transport for ChunkedHttpTransport {
    async fn open(&self, query: &str) -> Result<StatusEventStream, TransportError> {
        let url = format!("{}/chat", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "text/event-stream")
            .json(&QueryRequest::new(query))
            .send()
            .await
            .map_err(convert_error)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TransportError::ServerError { status, message });
        }

        Ok(decode_byte_stream(response.bytes_stream(), false))
    }
}
