//! # Dispbuff
//!
//! A tear-free double-buffered character grid for text displays.
//!
//! Dispbuff sits between application code that decides what characters go
//! where and a transport that streams bytes to an LCD, VFD, serial terminal
//! or similar. The producer writes into one grid while the transport reads
//! the other, so the display never shows a half-written frame.
//!
//! ## Core Concepts
//!
//! - **Double buffering**: a read grid and a write grid, exchanged by `swap`
//! - **Defensive addressing**: out-of-range writes are ignored and reads
//!   return [`BLANK`], never an error
//! - **Frame lifecycle**: write, swap, flush
//! - **Actor model**: an optional flush thread streams frames on a tick
//!
//! ## Example
//!
//! ```rust,ignore
//! use dispbuff::{GridBuffer, TerminalTransport};
//!
//! // Create a buffer for a 20x4 character display
//! let mut buffer = GridBuffer::new(20, 4)?;
//!
//! // Write a line and publish it
//! buffer.puts(0, 0, 5, b"HELLO");
//! buffer.swap();
//! buffer.flush(&mut TerminalTransport::stdout())?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod buffer;
pub mod config;
pub mod error;
pub mod transport;

// Re-exports for convenience
pub use actor::{FlushActor, FlushCommand, FlushStats};
pub use buffer::{Cell, Frame, Grid, GridBuffer, OwnedFrame, SharedGridBuffer, BLANK};
pub use config::DisplayConfig;
pub use error::{Error, Result};
pub use transport::{ChannelTransport, TerminalTransport, Transport, WriterTransport};
