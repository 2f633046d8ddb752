//! `ChannelTransport`: Hand frames to another thread.

use super::Transport;
use crate::buffer::{Frame, OwnedFrame};
use crate::error::{Error, Result};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::debug;

/// Sends an owned copy of every frame over a crossbeam channel.
///
/// Use it when the code that talks to the display lives on its own thread
/// or in an interrupt-driven loop that polls a receiver.
///
/// `transmit` never blocks. When the consumer has fallen behind and the
/// queue is full, the new frame is dropped and counted; the consumer still
/// gets every frame already queued and the next one that fits.
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    sender: Sender<OwnedFrame>,
    /// Frames dropped because the queue was full.
    dropped: u64,
}

impl ChannelTransport {
    /// Wrap an existing sender.
    pub const fn new(sender: Sender<OwnedFrame>) -> Self {
        Self { sender, dropped: 0 }
    }

    /// Create a transport and the receiver that consumes its frames.
    ///
    /// `capacity` bounds how many frames may queue (at least one).
    pub fn bounded(capacity: usize) -> (Self, Receiver<OwnedFrame>) {
        let (sender, receiver) = bounded(capacity.max(1));
        (Self::new(sender), receiver)
    }

    /// Frames dropped so far because the consumer was behind.
    #[inline]
    pub const fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl Transport for ChannelTransport {
    fn transmit(&mut self, frame: Frame<'_>) -> Result<()> {
        match self.sender.try_send(frame.to_owned_frame()) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                self.dropped += 1;
                debug!("frame queue full, dropped frame ({} so far)", self.dropped);
                Ok(())
            }
            Err(TrySendError::Disconnected(_)) => Err(Error::Disconnected),
        }
    }
}
