//! SSE frame reassembly for the push-event binding
//!
//! The push endpoint delivers each status record as a Server-Sent Event:
//! - `data: <payload>` - data payload line(s)
//! - Empty line - signals end of frame
//! - `event: <name>` / `: comment` - carried by the protocol, ignored here
//!
//! The decoder collects `data:` lines and emits the joined payload when the
//! frame closes; the payload is then handed to the status-line decoder,
//! which applies the same decode-or-discard contract as the chunked binding.

/// Represents a classified SSE line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseLine {
    /// Event name declaration (e.g., "event: message")
    Event(String),
    /// Data payload (e.g., "data: {\"status\": \"processing\", ...}")
    Data(String),
    /// Empty line - signals end of frame
    Empty,
    /// Comment line (starts with ':')
    Comment(String),
}

/// Classify a single line of an SSE stream.
pub fn parse_sse_line(line: &str) -> SseLine {
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(stripped) = line.strip_prefix(':') {
        return SseLine::Comment(stripped.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("event:") {
        return SseLine::Event(rest.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("data:") {
        return SseLine::Data(rest.trim().to_string());
    }

    // Unknown line format - treat as comment
    SseLine::Comment(line.to_string())
}

/// Stateful decoder that accumulates `data:` lines and emits frame payloads.
#[derive(Debug, Default)]
pub struct SseFrameDecoder {
    /// Accumulated data lines (SSE allows multiple data: lines per frame)
    data_buffer: Vec<String>,
}

impl SseFrameDecoder {
    /// Create a new frame decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a line, returning the frame's data payload when a frame closes.
    ///
    /// Event names and comments are consumed without effect; the chat
    /// protocol carries exactly one JSON record per frame in the data field.
    pub fn feed_line(&mut self, line: &str) -> Option<String> {
        match parse_sse_line(line) {
            SseLine::Data(data) => {
                self.data_buffer.push(data);
                None
            }
            SseLine::Empty => self.take_payload(),
            SseLine::Event(_) | SseLine::Comment(_) => None,
        }
    }

    /// Flush a frame left open at end of input.
    ///
    /// A well-behaved server closes every frame with a blank line; if the
    /// stream ends mid-frame the buffered payload is still surfaced so the
    /// record is not silently dropped.
    pub fn finish(&mut self) -> Option<String> {
        self.take_payload()
    }

    /// Reset the decoder state.
    pub fn reset(&mut self) {
        self.data_buffer.clear();
    }

    fn take_payload(&mut self) -> Option<String> {
        if self.data_buffer.is_empty() {
            return None;
        }
        let payload = self.data_buffer.join("\n");
        self.data_buffer.clear();
        Some(payload)
    }
}
