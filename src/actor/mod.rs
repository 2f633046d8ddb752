//! Actor Model: A dedicated flush thread for the display.
//!
//! The producer writes into a shared buffer and swaps; the flush actor
//! owns the transport and streams the read grid on a fixed tick.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  put/puts/swap  ┌──────────────────┐
//! │   Producer   │ ──────────────▶ │ SharedGridBuffer │
//! └──────────────┘                 └──────────────────┘
//!        │                                  │ flush (read grid)
//!        │ FlushCommand                     ▼
//!        │                         ┌──────────────────┐
//!        └───────────────────────▶ │  Flush Thread    │ ──▶ Transport
//!                                  └──────────────────┘
//! ```

mod flusher;
mod messages;

pub use flusher::FlushActor;
pub use messages::{FlushCommand, FlushStats};
