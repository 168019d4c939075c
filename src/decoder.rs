//! Incremental NDJSON frame decoder for the `/api/chat` response body.
//!
//! The transport hands over raw byte chunks with no framing of its own: a
//! chunk boundary can fall in the middle of a line, in the middle of a
//! multi-byte UTF-8 character, or between the two characters of a `\n` escape
//! inside a JSON string. The decoder buffers the unconsumed suffix of the
//! byte stream and splits it only on the raw newline byte, which is the one
//! byte that cannot occur inside a well-formed JSON line: UTF-8 continuation
//! bytes never equal `0x0A`, and an unescaped newline is illegal inside a
//! JSON string. Scanning for anything payload-derived (such as the literal
//! `"}\n"`) is unsound and deliberately avoided.

use bytes::{Bytes, BytesMut};

use crate::error::ChatError;
use crate::types::ChatFrame;

/// Default cap on a single undelimited line, in bytes.
pub const DEFAULT_MAX_LINE_BYTES: usize = 1024 * 1024;

/// Incremental decoder turning a chunked NDJSON byte stream into content
/// deltas.
///
/// Feed each transport chunk with [`feed`](Self::feed) and call
/// [`finish`](Self::finish) at end-of-stream. For every complete frame whose
/// `message.content` is a non-empty string, the sink callback is invoked
/// exactly once, synchronously, in arrival order. Malformed lines are logged
/// and skipped without disturbing neighboring lines.
///
/// A decoder is single-use: it belongs to one logical request, and `finish`
/// consumes it. Construct a fresh one per request.
///
/// # Example
///
/// ```
/// use ollama_chat::ChatStreamDecoder;
///
/// let mut out = String::new();
/// let mut decoder = ChatStreamDecoder::new(|delta| out.push_str(delta));
/// decoder.feed(br#"{"message":{"content":"Hel"#).unwrap();
/// decoder.feed(br#"lo"}}"#).unwrap();
/// decoder.feed(b"\n").unwrap();
/// decoder.finish().unwrap();
/// assert_eq!(out, "Hello");
/// ```
pub struct ChatStreamDecoder<F> {
    on_content: F,
    /// Unconsumed suffix of all bytes fed so far.
    buf: BytesMut,
    /// Bytes of `buf` already scanned for a newline.
    scanned: usize,
    max_line_bytes: usize,
}

impl<F: FnMut(&str)> ChatStreamDecoder<F> {
    /// Create a decoder delivering content deltas to `on_content`.
    pub fn new(on_content: F) -> Self {
        Self {
            on_content,
            buf: BytesMut::new(),
            scanned: 0,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }

    /// Override the cap on a single undelimited line.
    ///
    /// A broken or malicious upstream that never sends a newline would
    /// otherwise grow the buffer without bound; once the retained remainder
    /// exceeds this cap, [`feed`](Self::feed) fails with
    /// [`ChatError::OversizedLine`].
    #[must_use]
    pub fn with_max_line_bytes(mut self, limit: usize) -> Self {
        self.max_line_bytes = limit;
        self
    }

    /// Consume one transport chunk, emitting every frame it completes.
    ///
    /// An empty chunk is a no-op. After this call returns, the internal
    /// buffer holds exactly the bytes of the final, not-yet-terminated line.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<(), ChatError> {
        self.buf.extend_from_slice(chunk);

        while let Some(rel) = self.buf[self.scanned..].iter().position(|&b| b == b'\n') {
            let end = self.scanned + rel;
            let line = self.buf.split_to(end + 1).freeze();
            self.scanned = 0;
            self.process_line(&line[..line.len() - 1]);
        }
        self.scanned = self.buf.len();

        if self.buf.len() > self.max_line_bytes {
            return Err(ChatError::OversizedLine {
                limit: self.max_line_bytes,
            });
        }
        Ok(())
    }

    /// Signal end-of-stream, flushing a final line that lacks its newline.
    ///
    /// This is the only point at which an unterminated line is accepted.
    pub fn finish(mut self) -> Result<(), ChatError> {
        let rest: Bytes = self.buf.split().freeze();
        self.process_line(&rest);
        Ok(())
    }

    /// Parse one line (newline already stripped) and deliver its delta.
    fn process_line(&mut self, line: &[u8]) {
        let line = line.trim_ascii();
        if line.is_empty() {
            return;
        }
        match serde_json::from_slice::<ChatFrame>(line) {
            Ok(frame) => {
                if let Some(delta) = frame.content() {
                    (self.on_content)(delta);
                }
            }
            Err(err) => {
                // Recoverable: drop this line, keep decoding the rest.
                tracing::warn!(error = %err, len = line.len(), "skipping malformed stream line");
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
