//! Sinks that can be inspected after an encoder has taken ownership of them.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// A cloneable in-memory sink. All clones share one buffer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything written so far.
    pub fn contents(&self) -> Vec<u8> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A sink that accepts `limit` bytes and then fails every write.
///
/// Accepted bytes are recorded in a [`SharedBuffer`] available through
/// [`received`](Self::received).
#[derive(Debug)]
pub struct FailingWriter {
    received: SharedBuffer,
    remaining: usize,
    fail_flush: bool,
}

impl FailingWriter {
    pub fn new(limit: usize) -> Self {
        Self {
            received: SharedBuffer::new(),
            remaining: limit,
            fail_flush: false,
        }
    }

    /// Make [`flush`](Write::flush) fail as well.
    #[must_use]
    pub fn fail_on_flush(mut self) -> Self {
        self.fail_flush = true;
        self
    }

    /// Handle to the bytes this writer accepted.
    pub fn received(&self) -> SharedBuffer {
        self.received.clone()
    }
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
        }
        let n = buf.len().min(self.remaining);
        self.remaining -= n;
        self.received.write(&buf[..n])
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.fail_flush {
            return Err(io::Error::other("flush rejected"));
        }
        Ok(())
    }
}
