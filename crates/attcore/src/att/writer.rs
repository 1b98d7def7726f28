//! Bounded response writer for building ATT response payloads
use super::error::{AttError, AttResult};
use std::io;

/// An append-only byte buffer with a hard capacity, sized from the
/// negotiated MTU minus any response header already accounted for.
///
/// Writes are all-or-nothing: a chunk that does not fit is refused in
/// full, leaving the buffer exactly as it was. Value handlers can rely on
/// this to emit self-contained records and truncate a response at a clean
/// boundary.
#[derive(Debug)]
pub struct ResponseWriter {
    buf: Vec<u8>,
    // Vec::with_capacity may round up, so the budget is tracked apart
    // from the buffer's own capacity.
    limit: usize,
}

impl ResponseWriter {
    /// Create a writer that accepts at most `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        ResponseWriter {
            buf: Vec::with_capacity(capacity),
            limit: capacity,
        }
    }

    /// Append `chunk` to the response.
    ///
    /// Returns the number of bytes written, which is always `chunk.len()`.
    /// If the chunk exceeds the remaining capacity, nothing is consumed
    /// and [`AttError::ShortWrite`] reports both sizes.
    pub fn write(&mut self, chunk: &[u8]) -> AttResult<usize> {
        if chunk.len() > self.remaining() {
            return Err(AttError::ShortWrite {
                requested: chunk.len(),
                remaining: self.remaining(),
            });
        }
        self.buf.extend_from_slice(chunk);
        Ok(chunk.len())
    }

    /// Discard all accumulated bytes, keeping the capacity.
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    /// Number of bytes accumulated so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written since creation or the last reset.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The fixed byte budget this writer was created with.
    pub fn capacity(&self) -> usize {
        self.limit
    }

    /// Bytes still available before the budget is exhausted.
    pub fn remaining(&self) -> usize {
        self.limit - self.buf.len()
    }

    /// The accumulated response payload.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the writer and take the payload.
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

impl io::Write for ResponseWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        ResponseWriter::write(self, buf)
            .map_err(|e| io::Error::new(io::ErrorKind::WriteZero, e))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl AsRef<[u8]> for ResponseWriter {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}
