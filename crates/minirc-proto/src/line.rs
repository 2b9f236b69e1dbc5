//! Line framing over a raw byte stream.
//!
//! TCP delivers a stream, not messages: one read may carry a fragment of a
//! line, exactly one line, or several lines and a fragment. [`RecvBuffer`]
//! accumulates the bytes received on a connection and yields complete
//! protocol lines as they become available.
//!
//! The buffer is bounded. A peer that keeps sending without ever
//! terminating a line hits the cap and must be disconnected by the caller.

use bytes::BytesMut;
use thiserror::Error;

/// Initial capacity of a fresh buffer.
pub const INITIAL_CAPACITY: usize = 1024;

/// Hard upper bound on buffered bytes for a single connection.
pub const MAX_CAPACITY: usize = 16 * 1024;

/// An `append` would have grown the buffer past [`MAX_CAPACITY`].
///
/// The connection is unrecoverable at this point; the caller must drop it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("receive buffer overflow: {attempted} bytes exceeds the {limit}-byte cap")]
pub struct Overflow {
    /// Total size the buffer would have reached.
    pub attempted: usize,
    /// The configured cap.
    pub limit: usize,
}

/// Bounded per-connection byte accumulator.
///
/// Payload bytes are treated as opaque; no interpretation happens here
/// beyond locating line terminators (`\n`, with an optional preceding
/// `\r` that is stripped).
#[derive(Debug)]
pub struct RecvBuffer {
    buf: BytesMut,
    capacity: usize,
}

impl RecvBuffer {
    /// Create an empty buffer with [`INITIAL_CAPACITY`] reserved.
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(INITIAL_CAPACITY),
            capacity: INITIAL_CAPACITY,
        }
    }

    /// Append raw bytes after the current tail.
    ///
    /// Capacity doubles as needed, capped at [`MAX_CAPACITY`]. Fails
    /// without buffering anything when the total would exceed the cap.
    pub fn append(&mut self, data: &[u8]) -> Result<(), Overflow> {
        let needed = self.buf.len() + data.len();
        if needed > MAX_CAPACITY {
            return Err(Overflow {
                attempted: needed,
                limit: MAX_CAPACITY,
            });
        }
        while needed > self.capacity {
            self.capacity = (self.capacity * 2).min(MAX_CAPACITY);
        }
        self.buf.reserve(self.capacity - self.buf.len());
        self.buf.extend_from_slice(data);
        Ok(())
    }

    /// Whether at least one complete line is buffered.
    pub fn has_complete_line(&self) -> bool {
        self.buf.iter().any(|b| *b == b'\n')
    }

    /// Remove and return the first complete line, without its terminator.
    ///
    /// A terminator is `\n` or `\r\n`; the `\r` of a `\r\n` pair is
    /// stripped from the returned payload. An empty line comes back as an
    /// empty string. Returns `None` when no complete line is buffered.
    ///
    /// Payloads are surfaced as UTF-8 with invalid sequences replaced;
    /// parsing downstream is ASCII-structural, so this is lossless for
    /// protocol-relevant bytes.
    pub fn take_line(&mut self) -> Option<String> {
        let nl = self.buf.iter().position(|b| *b == b'\n')?;
        let line = self.buf.split_to(nl + 1);
        let mut payload = &line[..nl];
        if payload.last() == Some(&b'\r') {
            payload = &payload[..payload.len() - 1];
        }
        Some(String::from_utf8_lossy(payload).into_owned())
    }

    /// Number of bytes currently buffered.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Default for RecvBuffer {
    fn default() -> Self {
        Self::new()
    }
}
