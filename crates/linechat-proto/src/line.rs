//! Line framing.

use bytes::BytesMut;

use crate::LineTooLong;

/// Terminator appended to every outgoing command.
pub const LINE_TERMINATOR: &str = "\r\n";

/// Split the next complete line off the front of `buf`.
///
/// A single network read may carry several messages, so callers loop until
/// this returns `None`. The terminator (`\n`, optionally preceded by `\r`) is
/// stripped. Bytes after the last terminator stay in `buf` and complete on a
/// later read. Invalid UTF-8 is replaced rather than rejected.
pub fn next_line(buf: &mut BytesMut) -> Option<String> {
    let end = buf.iter().position(|&b| b == b'\n')?;
    Some(split_line(buf, end))
}

/// Split `buf` at the terminator at index `end`, stripping it.
fn split_line(buf: &mut BytesMut, end: usize) -> String {
    let mut line = buf.split_to(end + 1);
    line.truncate(end);
    if line.last() == Some(&b'\r') {
        line.truncate(end - 1);
    }
    String::from_utf8_lossy(&line).into_owned()
}

/// Receive buffer that splits lines incrementally.
///
/// Bytes already searched for a terminator are not searched again, and a
/// line longer than `max_line` bytes is rejected instead of buffered.
#[derive(Debug)]
pub struct LineBuffer {
    buf: BytesMut,
    /// Prefix of `buf` known to hold no `\n`.
    scanned: usize,
    max_line: usize,
}

impl LineBuffer {
    /// Create a buffer with `capacity` bytes preallocated.
    pub fn new(capacity: usize, max_line: usize) -> Self {
        Self { buf: BytesMut::with_capacity(capacity), scanned: 0, max_line }
    }

    /// Storage to read into. Only append to it.
    pub fn buf_mut(&mut self) -> &mut BytesMut {
        &mut self.buf
    }

    /// Split off the next complete line.
    ///
    /// Returns `Ok(None)` when no terminator has arrived yet.
    ///
    /// # Errors
    ///
    /// [`LineTooLong`] once the pending line exceeds the limit. The buffer
    /// is unusable afterwards.
    pub fn next_line(&mut self) -> Result<Option<String>, LineTooLong> {
        let found =
            self.buf.get(self.scanned..).and_then(|new| new.iter().position(|&b| b == b'\n'));
        match found {
            Some(pos) => {
                let end = self.scanned + pos;
                self.scanned = 0;
                if end > self.max_line {
                    return Err(LineTooLong { limit: self.max_line });
                }
                Ok(Some(split_line(&mut self.buf, end)))
            },
            None => {
                self.scanned = self.buf.len();
                if self.buf.len() > self.max_line {
                    return Err(LineTooLong { limit: self.max_line });
                }
                Ok(None)
            },
        }
    }

    /// Take whatever unterminated bytes remain, if any.
    pub fn take_tail(&mut self) -> Option<String> {
        self.scanned = 0;
        if self.buf.is_empty() {
            return None;
        }
        let tail = self.buf.split();
        Some(String::from_utf8_lossy(&tail).into_owned())
    }
}
