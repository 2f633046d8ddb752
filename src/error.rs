//! Error types for dispbuff.
//!
//! Out-of-bounds coordinates are never errors: writes become no-ops and reads
//! return [`BLANK`](crate::buffer::BLANK). Only storage and transport
//! failures are reported.

use thiserror::Error;

/// Errors that can occur while managing or flushing a grid buffer.
#[derive(Debug, Error)]
pub enum Error {
    /// Grid storage could not be allocated.
    #[error("cannot allocate two {width}x{height} grids")]
    Allocation {
        /// Requested width.
        width: u16,
        /// Requested height.
        height: u16,
    },

    /// A width or height of zero was requested.
    #[error("grid dimensions must be non-zero (got {width}x{height})")]
    ZeroDimension {
        /// Requested width.
        width: u16,
        /// Requested height.
        height: u16,
    },

    /// IO error from a transport.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The consumer on the other end of a transport has gone away.
    #[error("transport disconnected")]
    Disconnected,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
