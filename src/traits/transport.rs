//! Transport trait abstraction.
//!
//! Both server bindings (chunked POST body and SSE push events) decode to
//! the same sequence of status events; the session consumes that sequence in
//! a loop and never sees the underlying delivery mechanism. Malformed lines
//! are already discarded at the adapter boundary, so every item of the
//! stream is either a decoded event or a transport-level failure.

use crate::codec::StatusEvent;
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

/// The decoded event sequence for one query.
pub type StatusEventStream =
    Pin<Box<dyn Stream<Item = Result<StatusEvent, TransportError>> + Send>>;

/// Transport-level errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection could not be established
    ConnectionFailed(String),
    /// Server answered the request with a non-2xx status
    ServerError { status: u16, message: String },
    /// The stream broke mid-response
    Io(String),
    /// Other error
    Other(String),
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            TransportError::ServerError { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            TransportError::Io(msg) => write!(f, "IO error: {}", msg),
            TransportError::Other(msg) => write!(f, "Transport error: {}", msg),
        }
    }
}

impl std::error::Error for TransportError {}

/// Trait for opening one streamed chat response.
///
/// Implementations send the query to the server and return the decoded
/// event stream. A non-2xx response is an `Err` from `open` itself - the
/// caller falls back immediately without waiting for stream parsing.
///
/// # Example
///
/// ```ignore
/// use storebot::traits::Transport;
/// use futures::StreamExt;
///
/// async fn drain<T: Transport>(transport: &T) {
///     let mut events = transport.open("질문").await.unwrap();
///     while let Some(event) = events.next().await {
///         println!("{:?}", event);
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Submit a query and return its status event stream.
    async fn open(&self, query: &str) -> Result<StatusEventStream, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_display() {
        assert_eq!(
            TransportError::ConnectionFailed("refused".to_string()).to_string(),
            "Connection failed: refused"
        );
        assert_eq!(
            TransportError::ServerError {
                status: 500,
                message: "Internal Error".to_string()
            }
            .to_string(),
            "Server error (500): Internal Error"
        );
        assert_eq!(
            TransportError::Io("reset by peer".to_string()).to_string(),
            "IO error: reset by peer"
        );
        assert_eq!(
            TransportError::Other("unknown".to_string()).to_string(),
            "Transport error: unknown"
        );
    }

    #[test]
    fn test_transport_error_implements_error_trait() {
        let err = TransportError::Other("e".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
