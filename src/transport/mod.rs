//! Transports: Where flushed frames go.
//!
//! A [`Transport`] receives one complete [`Frame`] per flush. How it gets
//! to the display (wire format, chunking, retry) is the transport's
//! business.
//!
//! - [`WriterTransport`]: raw byte run to any `io::Write` (serial port,
//!   SPI device file, socket)
//! - [`TerminalTransport`]: draws the frame on an ANSI terminal
//! - [`ChannelTransport`]: hands owned copies to another thread

mod channel;
mod terminal;
mod writer;

pub use channel::ChannelTransport;
pub use terminal::TerminalTransport;
pub use writer::WriterTransport;

use crate::buffer::Frame;
use crate::error::Result;

/// A consumer of published frames.
pub trait Transport {
    /// Transmit one complete frame.
    fn transmit(&mut self, frame: Frame<'_>) -> Result<()>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn transmit(&mut self, frame: Frame<'_>) -> Result<()> {
        (**self).transmit(frame)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn transmit(&mut self, frame: Frame<'_>) -> Result<()> {
        (**self).transmit(frame)
    }
}
