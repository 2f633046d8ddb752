//! Display configuration.

use crate::buffer::{GridBuffer, SharedGridBuffer};
use crate::error::Result;
use std::time::Duration;

/// Configuration for a character display.
///
/// Defaults describe a common 20x4 character LCD refreshed at 20 Hz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Columns of the display.
    pub width: u16,
    /// Rows of the display.
    pub height: u16,
    /// Time between periodic flushes in a [`FlushActor`](crate::actor::FlushActor).
    pub flush_interval: Duration,
    /// Depth of the flush actor's command queue.
    pub command_capacity: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 4,
            flush_interval: Duration::from_millis(50),
            command_capacity: 4,
        }
    }
}

impl DisplayConfig {
    /// Configuration for a display of the given size, other fields default.
    pub fn with_size(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Allocate a single-threaded buffer of the configured size.
    pub fn buffer(&self) -> Result<GridBuffer> {
        GridBuffer::new(self.width, self.height)
    }

    /// Allocate a thread-safe buffer of the configured size.
    pub fn shared_buffer(&self) -> Result<SharedGridBuffer> {
        SharedGridBuffer::new(self.width, self.height)
    }
}
