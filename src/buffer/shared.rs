//! `SharedGridBuffer`: A [`GridBuffer`](super::GridBuffer) for writer and
//! flusher threads.
//!
//! Each grid sits behind its own mutex and the role state behind a third.
//! Every operation takes the role lock first and then the grid locks in
//! index order, so:
//! - a writer never holds the read grid and a flusher never holds the
//!   write grid;
//! - `swap` waits for an in-flight write and an in-flight flush before it
//!   exchanges roles, so a transport always streams a whole frame;
//! - the lock order is fixed and operations cannot deadlock.

use super::frame::{Frame, OwnedFrame};
use super::grid::{Cell, Grid, BLANK};
use crate::error::Result;
use crate::transport::Transport;
use log::{debug, trace};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Role state guarded by the role lock.
#[derive(Debug, Clone, Copy)]
struct Roles {
    /// Index of the read grid; the write grid is `read ^ 1`.
    read: usize,
    width: u16,
    height: u16,
}

/// Thread-safe double-buffered character grid.
///
/// Wrap it in an `Arc` to share between a producer thread and a
/// [`FlushActor`](crate::actor::FlushActor) or any other consumer.
pub struct SharedGridBuffer {
    roles: Mutex<Roles>,
    grids: [Mutex<Grid>; 2],
}

/// Lock a mutex, recovering from poisoning. Grid cells are plain bytes, so
/// a panic mid-write can at worst leave a partially written frame.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SharedGridBuffer {
    /// Allocate two blank grids of `width` x `height` cells.
    pub fn new(width: u16, height: u16) -> Result<Self> {
        let grids = [
            Mutex::new(Grid::new(width, height)?),
            Mutex::new(Grid::new(width, height)?),
        ];
        debug!("allocated {width}x{height} shared grid buffer");
        Ok(Self {
            roles: Mutex::new(Roles {
                read: 0,
                width,
                height,
            }),
            grids,
        })
    }

    /// Get the grid width.
    pub fn width(&self) -> u16 {
        lock(&self.roles).width
    }

    /// Get the grid height.
    pub fn height(&self) -> u16 {
        lock(&self.roles).height
    }

    /// Reallocate both grids at new dimensions, blank.
    ///
    /// Waits for in-flight writes and flushes. Does nothing if the
    /// dimensions are unchanged; on error nothing changes.
    pub fn resize(&self, width: u16, height: u16) -> Result<()> {
        let mut roles = lock(&self.roles);
        if width == roles.width && height == roles.height {
            return Ok(());
        }

        let fresh = [Grid::new(width, height)?, Grid::new(width, height)?];
        let mut first = lock(&self.grids[0]);
        let mut second = lock(&self.grids[1]);
        let [a, b] = fresh;
        *first = a;
        *second = b;

        debug!(
            "resized shared grid buffer {}x{} -> {width}x{height}",
            roles.width, roles.height
        );
        *roles = Roles {
            read: 0,
            width,
            height,
        };
        Ok(())
    }

    /// Whether `(x, y)` lies inside the grid.
    pub fn check(&self, x: u16, y: u16) -> bool {
        let roles = lock(&self.roles);
        x < roles.width && y < roles.height
    }

    /// Write one cell into the write grid. Out-of-bounds writes are ignored.
    pub fn put(&self, x: u16, y: u16, c: Cell) {
        self.write_grid().set(x, y, c);
    }

    /// Read one cell from the read grid, or [`BLANK`] if out of bounds.
    pub fn get(&self, x: u16, y: u16) -> Cell {
        self.read_grid().get(x, y)
    }

    /// Write up to `len` cells of `s` into the write grid from (x, y),
    /// wrapping at row end and stopping at the end of the grid.
    pub fn puts(&self, x: u16, y: u16, len: usize, s: &[Cell]) {
        let n = len.min(s.len());
        self.write_grid().write_run(x, y, &s[..n]);
    }

    /// Copy up to `len` cells of the read grid from (x, y).
    ///
    /// The result is shorter than `len` when the run reaches the end of the
    /// grid, and empty when the start is out of bounds.
    pub fn gets(&self, x: u16, y: u16, len: usize) -> Vec<Cell> {
        let grid = self.read_grid();
        grid.run_range(x, y, len)
            .map_or_else(Vec::new, |range| grid.cells()[range].to_vec())
    }

    /// Blank the write grid and publish it.
    pub fn clear(&self) {
        let mut roles = lock(&self.roles);
        let mut grids = [lock(&self.grids[0]), lock(&self.grids[1])];
        grids[roles.read ^ 1].fill(BLANK);
        roles.read ^= 1;
        trace!("cleared and swapped, read grid is now {}", roles.read);
    }

    /// Exchange the read and write roles.
    ///
    /// Blocks until no write or flush holds either grid.
    pub fn swap(&self) {
        let mut roles = lock(&self.roles);
        let _first = lock(&self.grids[0]);
        let _second = lock(&self.grids[1]);
        roles.read ^= 1;
        trace!("swapped grids, read grid is now {}", roles.read);
    }

    /// Hand the read grid to `transport`.
    ///
    /// The read grid stays locked for the duration of the transmit, so a
    /// concurrent `swap` waits rather than handing this grid to the writer.
    /// For a transport that may block, transmit a [`snapshot`](Self::snapshot)
    /// instead.
    pub fn flush<T: Transport + ?Sized>(&self, transport: &mut T) -> Result<()> {
        let grid = self.read_grid();
        trace!("flushing {} cells", grid.len());
        transport.transmit(Frame::from_grid(&grid))
    }

    /// An owned copy of the read grid.
    pub fn snapshot(&self) -> OwnedFrame {
        Frame::from_grid(&self.read_grid()).to_owned_frame()
    }

    fn read_grid(&self) -> MutexGuard<'_, Grid> {
        let roles = lock(&self.roles);
        lock(&self.grids[roles.read])
    }

    fn write_grid(&self) -> MutexGuard<'_, Grid> {
        let roles = lock(&self.roles);
        lock(&self.grids[roles.read ^ 1])
    }
}

impl std::fmt::Debug for SharedGridBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let roles = *lock(&self.roles);
        f.debug_struct("SharedGridBuffer")
            .field("width", &roles.width)
            .field("height", &roles.height)
            .field("read", &roles.read)
            .finish()
    }
}
