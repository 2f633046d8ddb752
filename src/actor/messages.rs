//! Message types for the flush actor.

/// Commands sent to the flush thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushCommand {
    /// Flush the read grid now instead of waiting for the next tick.
    FlushNow,

    /// Stop the flush thread.
    Shutdown,
}

/// Flush statistics for debugging/profiling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushStats {
    /// Frames handed to the transport successfully.
    pub frames: u64,
    /// Total bytes handed to the transport.
    pub bytes_written: u64,
    /// Flushes that failed in the transport.
    pub errors: u64,
    /// Average flush time in microseconds (smoothed).
    pub avg_flush_us: u64,
    /// Last flush time in microseconds.
    pub last_flush_us: u64,
}

impl FlushStats {
    /// Fold one successful flush into the statistics.
    pub(crate) fn record(&mut self, bytes: u64, micros: u64) {
        self.frames += 1;
        self.bytes_written += bytes;
        self.last_flush_us = micros;

        // Smoothed average
        if self.avg_flush_us == 0 {
            self.avg_flush_us = micros;
        } else {
            self.avg_flush_us = (self.avg_flush_us * 15 + micros) / 16;
        }
    }
}
