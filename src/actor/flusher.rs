//! Flush Actor: Dedicated thread that streams the read grid to a transport.
//!
//! The actor flushes on a fixed tick and whenever it is asked to. Each
//! flush copies the read grid with [`SharedGridBuffer::snapshot`], so a tick
//! that lands while the producer is mid-frame still sends the last complete
//! frame, and the grid lock is released before the transport runs. A slow
//! or stalled transport delays only this thread, never the producer.

use super::messages::{FlushCommand, FlushStats};
use crate::buffer::SharedGridBuffer;
use crate::config::DisplayConfig;
use crate::error::{Error, Result};
use crate::transport::Transport;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Flush actor that owns a transport on its own thread.
pub struct FlushActor {
    /// Handle to the flush thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
    /// Command channel to the flush thread.
    commands: Sender<FlushCommand>,
    /// Statistics updated by the flush thread.
    stats: Arc<Mutex<FlushStats>>,
}

impl FlushActor {
    /// Spawn the flush thread using the interval and queue depth from
    /// `config`.
    pub fn with_config<T>(
        buffer: Arc<SharedGridBuffer>,
        transport: T,
        config: &DisplayConfig,
    ) -> Self
    where
        T: Transport + Send + 'static,
    {
        Self::spawn_with_capacity(
            buffer,
            transport,
            config.flush_interval,
            config.command_capacity,
        )
    }

    /// Spawn the flush thread.
    ///
    /// # Arguments
    ///
    /// * `buffer` - The buffer whose read grid is flushed.
    /// * `transport` - Where frames go. Owned by the thread.
    /// * `interval` - Time between periodic flushes (e.g., 50ms for 20 FPS).
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the flush thread.
    pub fn spawn<T>(buffer: Arc<SharedGridBuffer>, transport: T, interval: Duration) -> Self
    where
        T: Transport + Send + 'static,
    {
        let capacity = DisplayConfig::default().command_capacity;
        Self::spawn_with_capacity(buffer, transport, interval, capacity)
    }

    fn spawn_with_capacity<T>(
        buffer: Arc<SharedGridBuffer>,
        mut transport: T,
        interval: Duration,
        capacity: usize,
    ) -> Self
    where
        T: Transport + Send + 'static,
    {
        let shutdown = Arc::new(AtomicBool::new(false));
        let stats = Arc::new(Mutex::new(FlushStats::default()));
        let (commands, receiver) = bounded(capacity.max(1));

        let shutdown_clone = shutdown.clone();
        let stats_clone = stats.clone();

        let handle = thread::Builder::new()
            .name("dispbuff-flush".to_string())
            .spawn(move || {
                info!("flush thread started, interval {interval:?}");
                Self::run_loop(
                    &receiver,
                    &shutdown_clone,
                    &buffer,
                    &mut transport,
                    &stats_clone,
                    interval,
                );
                info!("flush thread stopped");
            })
            .expect("Failed to spawn flush thread");

        Self {
            handle: Some(handle),
            shutdown,
            commands,
            stats,
        }
    }

    /// Ask the thread to flush immediately.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Disconnected`] if the thread has stopped.
    pub fn flush_now(&self) -> Result<()> {
        self.commands
            .send(FlushCommand::FlushNow)
            .map_err(|_| Error::Disconnected)
    }

    /// A copy of the current statistics.
    pub fn stats(&self) -> FlushStats {
        *self.stats.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Signal the flush thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
        let _ = self.commands.try_send(FlushCommand::Shutdown);
    }

    /// Stop the flush thread and wait for it to finish.
    ///
    /// The thread stops between flushes. A transmit already in progress is
    /// allowed to finish, so a transport that never returns from
    /// [`Transport::transmit`] keeps this from returning; the transports in
    /// this crate do not block on the consumer.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main flush loop.
    fn run_loop<T: Transport>(
        receiver: &Receiver<FlushCommand>,
        shutdown: &Arc<AtomicBool>,
        buffer: &SharedGridBuffer,
        transport: &mut T,
        stats: &Mutex<FlushStats>,
        interval: Duration,
    ) {
        let mut next_tick = Instant::now() + interval;

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            let timeout = next_tick.saturating_duration_since(Instant::now());
            match receiver.recv_timeout(timeout) {
                Ok(FlushCommand::FlushNow) => Self::flush_once(buffer, transport, stats),
                Ok(FlushCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {
                    Self::flush_once(buffer, transport, stats);

                    let now = Instant::now();
                    next_tick += interval;
                    // Behind schedule: skip missed ticks instead of bursting
                    if next_tick < now {
                        next_tick = now + interval;
                    }
                }
            }
        }
    }

    fn flush_once<T: Transport>(
        buffer: &SharedGridBuffer,
        transport: &mut T,
        stats: &Mutex<FlushStats>,
    ) {
        let start = Instant::now();
        let frame = buffer.snapshot();
        let result = transport.transmit(frame.as_frame());
        let elapsed = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);

        let mut stats = stats.lock().unwrap_or_else(PoisonError::into_inner);
        match result {
            Ok(()) => stats.record(frame.bytes().len() as u64, elapsed),
            Err(e) => {
                stats.errors += 1;
                warn!("flush failed: {e}");
            }
        }
    }
}

/// Signals the flush thread to stop without waiting for it.
impl Drop for FlushActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for FlushActor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlushActor")
            .field("running", &self.handle.is_some())
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}
