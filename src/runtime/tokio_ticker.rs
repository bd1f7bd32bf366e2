//! Tick driver on a tokio runtime.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::core::FakePing;
use crate::util::clock::Clock;

/// Calls [`FakePing::tick`] from a tokio task on a fixed period. Missed
/// ticks are skipped rather than bursted.
#[derive(Debug)]
pub struct TokioTicker {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl TokioTicker {
    /// Spawn the tick task on `handle`.
    pub fn spawn<C>(
        handle: &tokio::runtime::Handle,
        ctx: Arc<FakePing<C>>,
        period: Duration,
    ) -> Self
    where
        C: Clock + 'static,
    {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let task = handle.spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        ctx.tick();
                    }
                    _ = &mut shutdown_rx => break,
                }
            }
            tracing::debug!("tick task exiting");
        });

        Self {
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }
    }

    /// Signal the task and wait for it to finish.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "tick task failed");
            }
        }
    }
}

impl Drop for TokioTicker {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
