//! `TerminalTransport`: Draw frames on an ANSI terminal.
//!
//! Useful for running display code on a development host. Each frame is
//! rendered into one pre-allocated buffer with crossterm commands and
//! written with a single `write_all`, so the terminal never shows half a
//! frame.

use super::Transport;
use crate::buffer::{Cell, Frame};
use crate::error::Result;
use crossterm::cursor::{Hide, MoveTo};
use crossterm::queue;
use crossterm::style::Print;
use std::io::{self, Stdout, Write};

/// Map a cell to what the terminal should show. Anything outside printable
/// ASCII, including blank cells, becomes a space.
#[inline]
const fn printable(cell: Cell) -> char {
    if cell.is_ascii_graphic() || cell == b' ' {
        cell as char
    } else {
        ' '
    }
}

/// Draws each frame as a block of text at a fixed terminal position.
pub struct TerminalTransport<W: Write = Stdout> {
    writer: W,
    /// Pre-allocated output buffer.
    output: Vec<u8>,
    /// Column of the frame's top-left corner.
    origin_x: u16,
    /// Row of the frame's top-left corner.
    origin_y: u16,
}

impl TerminalTransport<Stdout> {
    /// Draw to standard output at the top-left corner.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalTransport<W> {
    /// Draw to `writer` at the top-left corner.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            output: Vec::with_capacity(4096),
            origin_x: 0,
            origin_y: 0,
        }
    }

    /// Draw the frame with its top-left corner at (x, y).
    #[must_use]
    pub fn with_origin(mut self, x: u16, y: u16) -> Self {
        self.origin_x = x;
        self.origin_y = y;
        self
    }

    /// Get a reference to the underlying writer.
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Unwrap the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn render(&mut self, frame: Frame<'_>) -> io::Result<()> {
        let (x, y) = (self.origin_x, self.origin_y);
        self.output.clear();
        queue!(self.output, Hide)?;

        for (row, cells) in (0..frame.height()).zip(frame.rows()) {
            let text: String = cells.iter().map(|&c| printable(c)).collect();
            queue!(self.output, MoveTo(x, y.saturating_add(row)), Print(text))?;
        }
        Ok(())
    }
}

impl<W: Write> Transport for TerminalTransport<W> {
    fn transmit(&mut self, frame: Frame<'_>) -> Result<()> {
        self.render(frame)?;
        self.writer.write_all(&self.output)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> std::fmt::Debug for TerminalTransport<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalTransport")
            .field("origin_x", &self.origin_x)
            .field("origin_y", &self.origin_y)
            .finish_non_exhaustive()
    }
}
