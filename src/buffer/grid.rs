//! Grid: A single rectangular array of character cells.
//!
//! The grid uses contiguous memory allocation for cache efficiency.
//! Cells are stored in row-major order.

use crate::error::{Error, Result};
use std::ops::Range;

/// A single character cell. Displays driven by this crate take one byte per
/// character position.
pub type Cell = u8;

/// The blank cell: written by clears, returned by out-of-bounds reads.
pub const BLANK: Cell = 0;

/// A grid of cells representing one display frame.
///
/// The grid stores cells in a contiguous `Vec` for cache efficiency.
/// Access is in row-major order: `index = y * width + x`.
///
/// A grid's length is fixed for its lifetime. Changing dimensions means
/// allocating a new grid.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    /// Contiguous cell storage (row-major order).
    cells: Vec<Cell>,
    /// Width in columns.
    width: u16,
    /// Height in rows.
    height: u16,
}

impl Grid {
    /// Allocate a blank grid with the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroDimension`] if either dimension is zero, and
    /// [`Error::Allocation`] if the storage cannot be reserved.
    pub fn new(width: u16, height: u16) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::ZeroDimension { width, height });
        }

        let size = usize::from(width) * usize::from(height);
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(size)
            .map_err(|_| Error::Allocation { width, height })?;
        cells.resize(size, BLANK);

        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Get the grid width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the grid height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get the total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the grid is empty (never true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get a reference to the underlying cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Whether `(x, y)` addresses a cell of this grid.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if self.contains(x, y) {
            Some(usize::from(y) * usize::from(self.width) + usize::from(x))
        } else {
            None
        }
    }

    /// Get the cell at (x, y), or [`BLANK`] if out of bounds.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Cell {
        self.index_of(x, y).map_or(BLANK, |i| self.cells[i])
    }

    /// Set the cell at (x, y).
    ///
    /// Returns `false` if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if let Some(idx) = self.index_of(x, y) {
            self.cells[idx] = cell;
            true
        } else {
            false
        }
    }

    /// The linear range a run of `len` cells starting at (x, y) covers.
    ///
    /// Runs continue onto the next row at row end and are clamped at the
    /// end of the grid. Returns `None` if the start is out of bounds.
    pub fn run_range(&self, x: u16, y: u16, len: usize) -> Option<Range<usize>> {
        let start = self.index_of(x, y)?;
        let end = start.saturating_add(len).min(self.cells.len());
        Some(start..end)
    }

    /// Write a run of cells starting at (x, y).
    ///
    /// Returns the number of cells written.
    pub fn write_run(&mut self, x: u16, y: u16, run: &[Cell]) -> usize {
        let Some(range) = self.run_range(x, y, run.len()) else {
            return 0;
        };
        let n = range.len();
        self.cells[range].copy_from_slice(&run[..n]);
        n
    }

    /// Copy a run of cells starting at (x, y) into `out`.
    ///
    /// Returns the number of cells copied.
    pub fn read_run(&self, x: u16, y: u16, out: &mut [Cell]) -> usize {
        let Some(range) = self.run_range(x, y, out.len()) else {
            return 0;
        };
        let n = range.len();
        out[..n].copy_from_slice(&self.cells[range]);
        n
    }

    /// Fill every cell with `cell`.
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Get memory usage in bytes (approximate).
    pub fn memory_usage(&self) -> usize {
        self.cells.capacity() + std::mem::size_of::<Self>()
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("memory_bytes", &self.memory_usage())
            .finish()
    }
}
