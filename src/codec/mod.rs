//! Stream decoding for the chatbot wire protocol
//!
//! The server streams newline-delimited JSON status records. This module
//! reconstructs logical lines from arbitrarily fragmented chunks and decodes
//! each line into a typed status event:
//! - `framer` - LineFramer for chunk-to-line reassembly
//! - `events` - StatusEvent enum and the line decoder
//! - `sse` - SSE frame reassembly for the push-event binding

mod events;
mod framer;
mod sse;

// Re-export public types
pub use events::{decode_or_discard, decode_status_line, StatusEvent, StatusParseError};
pub use framer::LineFramer;
pub use sse::{parse_sse_line, SseFrameDecoder, SseLine};
