//! Tick driver on a dedicated OS thread.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, select, tick, Sender};

use crate::core::FakePing;
use crate::util::clock::Clock;

/// Calls [`FakePing::tick`] on a fixed period from its own thread.
///
/// Dropping the ticker signals the thread to exit without joining it; call
/// [`ThreadTicker::stop`] to wait for it.
#[derive(Debug)]
pub struct ThreadTicker {
    shutdown: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ThreadTicker {
    /// Spawn the tick thread.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the thread cannot be spawned.
    pub fn spawn<C>(ctx: Arc<FakePing<C>>, period: Duration) -> std::io::Result<Self>
    where
        C: Clock + 'static,
    {
        let (shutdown_tx, shutdown_rx) = bounded::<()>(0);
        let handle = thread::Builder::new()
            .name("fakeping-tick".into())
            .spawn(move || {
                let ticks = tick(period);
                loop {
                    let stop = select! {
                        recv(ticks) -> _ => {
                            ctx.tick();
                            false
                        },
                        recv(shutdown_rx) -> _ => true,
                    };
                    if stop {
                        break;
                    }
                }
                tracing::debug!("tick thread exiting");
            })?;

        tracing::info!(period_ms = period.as_secs_f64() * 1000.0, "tick thread started");
        Ok(Self {
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Signal the thread and wait for it to exit.
    pub fn stop(mut self) {
        self.shutdown.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("tick thread panicked");
            }
        }
    }
}

impl Drop for ThreadTicker {
    fn drop(&mut self) {
        // Disconnecting the channel wakes the select.
        self.shutdown.take();
    }
}
