//! Frame: What a transport receives on flush.

use super::grid::{Cell, Grid};

/// A borrowed view of a published grid.
///
/// The byte run is always exactly `width * height` cells long, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    width: u16,
    height: u16,
    bytes: &'a [Cell],
}

impl<'a> Frame<'a> {
    pub(crate) fn from_grid(grid: &'a Grid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            bytes: grid.cells(),
        }
    }

    /// Frame width in columns.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Frame height in rows.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The full byte run.
    #[inline]
    pub const fn bytes(&self) -> &'a [Cell] {
        self.bytes
    }

    /// Iterate over the frame's rows.
    pub fn rows(&self) -> impl Iterator<Item = &'a [Cell]> {
        self.bytes.chunks(usize::from(self.width))
    }

    /// Copy the frame into owned storage.
    pub fn to_owned_frame(&self) -> OwnedFrame {
        OwnedFrame {
            width: self.width,
            height: self.height,
            bytes: self.bytes.to_vec(),
        }
    }
}

/// An owned copy of a frame, for handing across threads.
///
/// Only built from a grid, so the byte run always matches the dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedFrame {
    width: u16,
    height: u16,
    bytes: Vec<Cell>,
}

impl OwnedFrame {
    /// Frame width in columns.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Frame height in rows.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Row-major byte run of `width * height` cells.
    #[inline]
    pub fn bytes(&self) -> &[Cell] {
        &self.bytes
    }

    /// Take the byte run.
    pub fn into_bytes(self) -> Vec<Cell> {
        self.bytes
    }

    /// Borrow this frame as a [`Frame`].
    pub fn as_frame(&self) -> Frame<'_> {
        Frame {
            width: self.width,
            height: self.height,
            bytes: &self.bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owned_frame_matches_grid() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.write_run(0, 0, b"abcdef");

        let owned = Frame::from_grid(&grid).to_owned_frame();
        assert_eq!((owned.width(), owned.height()), (3, 2));
        assert_eq!(owned.bytes(), b"abcdef");

        let rows: Vec<&[u8]> = owned.as_frame().rows().collect();
        assert_eq!(rows, vec![&b"abc"[..], &b"def"[..]]);
        assert_eq!(owned.into_bytes(), b"abcdef");
    }
}
