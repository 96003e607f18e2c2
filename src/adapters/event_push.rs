//! Server-push (SSE) transport binding.
//!
//! Opens `GET /chat?query=<urlencoded>` and consumes the event channel. Each
//! push event's `data:` payload is one status record; frame reassembly and
//! the decode-or-discard contract are the same shared pipeline the chunked
//! binding uses, with the SSE frame layer switched on.

use async_trait::async_trait;

use crate::adapters::chunked_http::{convert_error, decode_byte_stream};
use crate::traits::{StatusEventStream, Transport, TransportError};

/// Transport that streams the answer over a push-event channel.
///
/// # Example
///
/// ```ignore
/// use storebot::adapters::PushEventTransport;
/// use storebot::traits::Transport;
///
/// let transport = PushEventTransport::new("http://127.0.0.1:8001");
/// let events = transport.open("반품 절차를 알려주세요").await?;
/// ```
#[derive(Debug, Clone)]
pub struct PushEventTransport {
    /// Base URL of the chatbot API
    base_url: String,
    /// Reusable HTTP client
    client: reqwest::Client,
}

impl PushEventTransport {
    /// Create a transport for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a transport with a custom reqwest client.
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

#[async_trait]
impl Transport for PushEventTransport {
    async fn open(&self, query: &str) -> Result<StatusEventStream, TransportError> {
        let url = format!(
            "{}/chat?query={}",
            self.base_url,
            urlencoding::encode(query)
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "text/event-stream")
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

        Ok(decode_byte_stream(response.bytes_stream(), true))
    }
}
