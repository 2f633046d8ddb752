//! `WriterTransport`: Raw frame bytes to any writer.

use super::Transport;
use crate::buffer::Frame;
use crate::error::Result;
use std::io::Write;

/// Writes each frame's byte run to `W` in a single `write_all`, then
/// flushes the writer.
///
/// Suits displays that take the whole character matrix as one transfer.
#[derive(Debug)]
pub struct WriterTransport<W: Write> {
    writer: W,
    bytes_written: u64,
}

impl<W: Write> WriterTransport<W> {
    /// Wrap a writer.
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            bytes_written: 0,
        }
    }

    /// Total bytes transmitted so far.
    #[inline]
    pub const fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Get a reference to the underlying writer.
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Unwrap the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Transport for WriterTransport<W> {
    fn transmit(&mut self, frame: Frame<'_>) -> Result<()> {
        self.writer.write_all(frame.bytes())?;
        self.writer.flush()?;
        self.bytes_written += frame.bytes().len() as u64;
        Ok(())
    }
}
