//! Chunk-to-line reassembly for streamed response bodies.
//!
//! The transport delivers the body as arbitrary byte fragments; record
//! boundaries are newlines. The framer buffers the trailing partial line
//! between chunks so the emitted line sequence is the same no matter where
//! chunk boundaries fall.

/// Reassembles complete logical lines from a sequence of byte chunks.
///
/// A logical line is any maximal run of bytes not containing `\n`. The
/// pending partial line is kept as raw bytes and only decoded once the line
/// is complete, so a multi-byte character split across chunks is never
/// corrupted. A trailing `\r` is stripped from each line.
///
/// # Example
///
/// ```
/// use storebot::codec::LineFramer;
///
/// let mut framer = LineFramer::new();
/// assert!(framer.push(b"{\"status\":\"proc").is_empty());
/// assert_eq!(
///     framer.push(b"essing\"}\n"),
///     vec!["{\"status\":\"processing\"}".to_string()]
/// );
/// assert_eq!(framer.finish(), None);
/// ```
#[derive(Debug, Default)]
pub struct LineFramer {
    /// Bytes of the current, not yet terminated line
    pending: Vec<u8>,
}

impl LineFramer {
    /// Create a new framer with an empty pending buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk, returning every line completed by it.
    ///
    /// Lines are returned in stream order. Bytes after the last newline stay
    /// buffered until a later chunk (or [`finish`](Self::finish)) completes
    /// them.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();

        for &byte in chunk {
            if byte == b'\n' {
                lines.push(Self::decode_line(&self.pending));
                self.pending.clear();
            } else {
                self.pending.push(byte);
            }
        }

        lines
    }

    /// Flush the pending buffer at end of input.
    ///
    /// A stream may end without a final newline; the remainder is still one
    /// logical line and must not be dropped. Returns `None` if nothing is
    /// buffered.
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let line = Self::decode_line(&self.pending);
        self.pending.clear();
        Some(line)
    }

    /// Whether a partial line is currently buffered.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Decode one complete line, stripping a trailing CR.
    ///
    /// Invalid UTF-8 is replaced rather than dropped; the downstream JSON
    /// decoder rejects the mangled record and the stream continues.
    fn decode_line(bytes: &[u8]) -> String {
        let bytes = match bytes.last() {
            Some(&b'\r') => &bytes[..bytes.len() - 1],
            _ => bytes,
        };
        String::from_utf8_lossy(bytes).into_owned()
    }
}
