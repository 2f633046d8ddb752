//! Buffer module: Core data structures for the double-buffer display.
//!
//! This module contains:
//! - [`Grid`]: A single row-major array of byte cells
//! - [`GridBuffer`]: Two grids with exchangeable read and write roles
//! - [`SharedGridBuffer`]: The same discipline for writer and flusher threads
//! - [`Frame`]: The read grid as handed to a transport

mod frame;
mod grid;
mod grid_buffer;
mod shared;

pub use frame::{Frame, OwnedFrame};
pub use grid::{Cell, Grid, BLANK};
pub use grid_buffer::GridBuffer;
pub use shared::SharedGridBuffer;
