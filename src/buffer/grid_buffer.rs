//! `GridBuffer`: Two grids with exchangeable read and write roles.
//!
//! Writes always land in the write grid and reads always observe the read
//! grid, so a transport streaming the read grid never sees a half-written
//! frame. [`GridBuffer::swap`] publishes the write grid by flipping an
//! index; cell contents are never copied.

use super::frame::Frame;
use super::grid::{Cell, Grid, BLANK};
use crate::error::Result;
use crate::transport::Transport;
use log::{debug, trace};

/// A double-buffered character grid.
///
/// # Example
///
/// ```
/// use dispbuff::{GridBuffer, WriterTransport};
///
/// let mut buffer = GridBuffer::new(3, 2)?;
/// buffer.put(0, 0, b'A');
/// buffer.put(2, 1, b'B');
/// buffer.swap();
///
/// let mut wire = WriterTransport::new(Vec::new());
/// buffer.flush(&mut wire)?;
/// assert_eq!(wire.get_ref(), &[b'A', 0, 0, 0, 0, b'B']);
/// # Ok::<(), dispbuff::Error>(())
/// ```
pub struct GridBuffer {
    /// Both grids, always the same dimensions.
    grids: [Grid; 2],
    /// Index of the read grid; the write grid is `read ^ 1`.
    read: usize,
}

impl GridBuffer {
    /// Allocate two blank grids of `width` x `height` cells.
    ///
    /// # Errors
    ///
    /// Fails if either dimension is zero or the storage cannot be allocated.
    pub fn new(width: u16, height: u16) -> Result<Self> {
        let grids = [Grid::new(width, height)?, Grid::new(width, height)?];
        debug!("allocated {width}x{height} grid buffer");
        Ok(Self { grids, read: 0 })
    }

    /// Get the grid width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.grids[0].width()
    }

    /// Get the grid height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.grids[0].height()
    }

    /// Number of cells in each grid.
    #[inline]
    pub fn len(&self) -> usize {
        self.grids[0].len()
    }

    /// Always false; grids have at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.grids[0].is_empty()
    }

    /// Change the width, reallocating both grids.
    ///
    /// Returns the new width. Contents are discarded whenever the width
    /// actually changes.
    pub fn set_width(&mut self, width: u16) -> Result<u16> {
        self.resize(width, self.height())?;
        Ok(width)
    }

    /// Change the height, reallocating both grids.
    ///
    /// Returns the new height. Contents are discarded whenever the height
    /// actually changes.
    pub fn set_height(&mut self, height: u16) -> Result<u16> {
        self.resize(self.width(), height)?;
        Ok(height)
    }

    /// Reallocate both grids at new dimensions, blank.
    ///
    /// Does nothing if the dimensions are unchanged. On error the buffer
    /// keeps its old dimensions and contents.
    pub fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        if width == self.width() && height == self.height() {
            return Ok(());
        }

        let grids = [Grid::new(width, height)?, Grid::new(width, height)?];
        debug!(
            "resized grid buffer {}x{} -> {width}x{height}",
            self.width(),
            self.height()
        );
        self.grids = grids;
        self.read = 0;
        Ok(())
    }

    /// Whether `(x, y)` lies inside the grid.
    #[inline]
    pub const fn check(&self, x: u16, y: u16) -> bool {
        x < self.width() && y < self.height()
    }

    /// Write one cell into the write grid. Out-of-bounds writes are ignored.
    #[inline]
    pub fn put(&mut self, x: u16, y: u16, c: Cell) {
        self.write_grid_mut().set(x, y, c);
    }

    /// Read one cell from the read grid, or [`BLANK`] if out of bounds.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Cell {
        self.read_grid().get(x, y)
    }

    /// Write up to `len` cells of `s` into the write grid from (x, y).
    ///
    /// The run continues on the next row at row end. Cells past the end of
    /// the grid are dropped, and an out-of-bounds start writes nothing.
    pub fn puts(&mut self, x: u16, y: u16, len: usize, s: &[Cell]) {
        let n = len.min(s.len());
        self.write_grid_mut().write_run(x, y, &s[..n]);
    }

    /// Copy up to `len` cells of the read grid from (x, y) into `out`.
    ///
    /// Traverses exactly like [`puts`](Self::puts). Returns the filled
    /// prefix of `out`, which is shorter than `len` when the run reaches
    /// the end of the grid or `out` is too small.
    pub fn gets<'a>(&self, x: u16, y: u16, len: usize, out: &'a mut [Cell]) -> &'a [Cell] {
        let n = len.min(out.len());
        let copied = self.read_grid().read_run(x, y, &mut out[..n]);
        &out[..copied]
    }

    /// Blank the write grid and publish it.
    ///
    /// The grid that becomes writable keeps whatever it held before.
    pub fn clear(&mut self) {
        self.write_grid_mut().fill(BLANK);
        self.swap();
    }

    /// Exchange the read and write roles.
    #[inline]
    pub fn swap(&mut self) {
        self.read ^= 1;
        trace!("swapped grids, read grid is now {}", self.read);
    }

    /// Hand the read grid to `transport`. Neither grid is modified.
    pub fn flush<T: Transport + ?Sized>(&self, transport: &mut T) -> Result<()> {
        trace!("flushing {} cells", self.len());
        transport.transmit(self.frame())
    }

    /// A view of the read grid.
    #[inline]
    pub fn frame(&self) -> Frame<'_> {
        Frame::from_grid(self.read_grid())
    }

    #[inline]
    fn read_grid(&self) -> &Grid {
        &self.grids[self.read]
    }

    #[inline]
    fn write_grid_mut(&mut self) -> &mut Grid {
        &mut self.grids[self.read ^ 1]
    }
}

impl std::fmt::Debug for GridBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridBuffer")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("read", &self.read)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::transport::WriterTransport;
    use proptest::prelude::*;

    fn flushed(buffer: &GridBuffer) -> Vec<u8> {
        let mut wire = WriterTransport::new(Vec::new());
        buffer.flush(&mut wire).unwrap();
        wire.into_inner()
    }

    #[test]
    fn test_grid_buffer_new() {
        let buffer = GridBuffer::new(20, 4).unwrap();
        assert_eq!(buffer.width(), 20);
        assert_eq!(buffer.height(), 4);
        assert_eq!(buffer.len(), 80);
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_grid_buffer_zero_dimension() {
        assert!(matches!(
            GridBuffer::new(0, 2),
            Err(Error::ZeroDimension { .. })
        ));
    }

    #[test]
    fn test_put_is_invisible_until_swap() {
        let mut buffer = GridBuffer::new(3, 2).unwrap();
        buffer.put(1, 1, b'Z');
        assert_eq!(buffer.get(1, 1), BLANK);
        buffer.swap();
        assert_eq!(buffer.get(1, 1), b'Z');
    }

    #[test]
    fn test_check_boundaries() {
        let buffer = GridBuffer::new(3, 2).unwrap();
        assert!(buffer.check(0, 0));
        assert!(buffer.check(2, 1));
        assert!(!buffer.check(3, 0));
        assert!(!buffer.check(0, 2));
        // Each dimension is rejected on its own.
        assert!(!buffer.check(3, 1));
        assert!(!buffer.check(2, 2));
    }

    #[test]
    fn test_out_of_bounds_put_changes_nothing() {
        let mut buffer = GridBuffer::new(3, 2).unwrap();
        buffer.puts(0, 0, 6, b"abcdef");
        buffer.put(3, 0, b'X');
        buffer.put(0, 2, b'X');
        buffer.put(u16::MAX, u16::MAX, b'X');
        buffer.swap();
        assert_eq!(flushed(&buffer), b"abcdef");
        assert_eq!(buffer.get(3, 0), BLANK);
        assert_eq!(buffer.get(0, 2), BLANK);
    }

    #[test]
    fn test_swap_twice_restores_frame() {
        let mut buffer = GridBuffer::new(3, 2).unwrap();
        buffer.puts(0, 0, 6, b"AAAAAA");
        buffer.swap();
        buffer.puts(0, 0, 6, b"BBBBBB");
        buffer.swap();
        assert_eq!(flushed(&buffer), b"BBBBBB");
        buffer.swap();
        assert_eq!(flushed(&buffer), b"AAAAAA");
    }

    #[test]
    fn test_clear_publishes_blank_frame() {
        let mut buffer = GridBuffer::new(3, 2).unwrap();
        buffer.puts(0, 0, 6, b"abcdef");
        buffer.swap();
        buffer.puts(0, 0, 6, b"ghijkl");
        buffer.clear();
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(buffer.get(x, y), BLANK);
            }
        }
        // The grid handed back to the writer still holds the old frame.
        buffer.swap();
        assert_eq!(flushed(&buffer), b"abcdef");
    }

    #[test]
    fn test_flush_scenario() {
        let mut buffer = GridBuffer::new(3, 2).unwrap();
        buffer.put(0, 0, b'A');
        buffer.put(2, 1, b'B');
        buffer.swap();
        assert_eq!(flushed(&buffer), vec![b'A', 0, 0, 0, 0, b'B']);
    }

    #[test]
    fn test_flush_does_not_mutate() {
        let mut buffer = GridBuffer::new(3, 2).unwrap();
        buffer.put(1, 0, b'q');
        buffer.swap();
        let first = flushed(&buffer);
        let second = flushed(&buffer);
        assert_eq!(first, second);
        assert_eq!(buffer.get(1, 0), b'q');
    }

    #[test]
    fn test_puts_gets_wrap_round_trip() {
        let mut buffer = GridBuffer::new(3, 2).unwrap();
        buffer.puts(0, 0, 5, b"HELLO");
        buffer.swap();
        let mut out = [0u8; 5];
        assert_eq!(buffer.gets(0, 0, 5, &mut out), b"HELLO");
        assert_eq!(buffer.get(0, 1), b'L');
        assert_eq!(buffer.get(1, 1), b'O');
    }

    #[test]
    fn test_puts_respects_len() {
        let mut buffer = GridBuffer::new(4, 1).unwrap();
        buffer.puts(0, 0, 2, b"abcd");
        buffer.puts(3, 0, 10, b"z");
        buffer.swap();
        assert_eq!(flushed(&buffer), &[b'a', b'b', 0, b'z']);
    }

    #[test]
    fn test_gets_is_clamped() {
        let mut buffer = GridBuffer::new(3, 2).unwrap();
        buffer.puts(0, 0, 6, b"abcdef");
        buffer.swap();

        let mut out = [0u8; 8];
        assert_eq!(buffer.gets(1, 1, 8, &mut out), b"ef");
        assert_eq!(buffer.gets(0, 0, 8, &mut out[..3]), b"abc");
        assert!(buffer.gets(3, 0, 2, &mut out).is_empty());
        assert!(buffer.gets(0, 2, 2, &mut out).is_empty());
    }

    #[test]
    fn test_resize_reallocates_blank() {
        let mut buffer = GridBuffer::new(3, 2).unwrap();
        buffer.puts(0, 0, 6, b"abcdef");
        buffer.swap();
        buffer.puts(0, 0, 6, b"ghijkl");

        buffer.resize(4, 3).unwrap();
        assert_eq!(buffer.width(), 4);
        assert_eq!(buffer.height(), 3);
        assert_eq!(buffer.len(), 12);
        assert_eq!(buffer.frame().bytes().len(), 12);
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(buffer.get(x, y), BLANK);
            }
        }
        buffer.swap();
        assert_eq!(flushed(&buffer), vec![BLANK; 12]);
    }

    #[test]
    fn test_single_dimension_setters() {
        let mut buffer = GridBuffer::new(3, 2).unwrap();
        buffer.put(0, 0, b'x');
        buffer.swap();

        assert_eq!(buffer.set_width(4).unwrap(), 4);
        assert_eq!(buffer.len(), 8);
        assert_eq!(buffer.get(0, 0), BLANK);

        assert_eq!(buffer.set_height(3).unwrap(), 3);
        assert_eq!(buffer.len(), 12);
        assert!(buffer.check(3, 2));
        assert!(!buffer.check(4, 2));
    }

    #[test]
    fn test_resize_same_dimensions_keeps_contents() {
        let mut buffer = GridBuffer::new(3, 2).unwrap();
        buffer.put(0, 0, b'k');
        buffer.swap();
        buffer.resize(3, 2).unwrap();
        assert_eq!(buffer.get(0, 0), b'k');
    }

    #[test]
    fn test_failed_resize_keeps_buffer() {
        let mut buffer = GridBuffer::new(3, 2).unwrap();
        buffer.put(0, 0, b'k');
        buffer.swap();
        assert!(matches!(
            buffer.set_width(0),
            Err(Error::ZeroDimension { .. })
        ));
        assert_eq!(buffer.width(), 3);
        assert_eq!(buffer.get(0, 0), b'k');
    }

    proptest! {
        #[test]
        fn prop_put_swap_get(
            width in 1u16..24,
            height in 1u16..24,
            x in 0u16..24,
            y in 0u16..24,
            c in 1u8..=255,
        ) {
            let mut buffer = GridBuffer::new(width, height).unwrap();
            buffer.put(x, y, c);
            buffer.swap();
            if buffer.check(x, y) {
                prop_assert_eq!(buffer.get(x, y), c);
            } else {
                prop_assert_eq!(buffer.get(x, y), BLANK);
                prop_assert!(buffer.frame().bytes().iter().all(|&b| b == BLANK));
            }
        }

        #[test]
        fn prop_check_matches_bounds(
            width in 1u16..64,
            height in 1u16..64,
            x in 0u16..128,
            y in 0u16..128,
        ) {
            let buffer = GridBuffer::new(width, height).unwrap();
            prop_assert_eq!(buffer.check(x, y), x < width && y < height);
        }

        #[test]
        fn prop_puts_gets_round_trip(
            width in 1u16..16,
            height in 1u16..16,
            x in 0u16..16,
            y in 0u16..16,
            text in proptest::collection::vec(any::<u8>(), 0..64),
        ) {
            let mut buffer = GridBuffer::new(width, height).unwrap();
            buffer.puts(x, y, text.len(), &text);
            buffer.swap();

            let mut out = vec![0u8; text.len()];
            let read = buffer.gets(x, y, text.len(), &mut out);
            prop_assert!(read.len() <= text.len());
            prop_assert_eq!(read, &text[..read.len()]);
            prop_assert_eq!(buffer.frame().bytes().len(), buffer.len());
        }
    }
}
