//! Delayed-delivery scheduler.
//!
//! Items the policy delays are appended to a FIFO release queue stamped with
//! an absolute due time. [`DelayScheduler::advance`] releases from the head
//! only, so a later item whose jitter made it due earlier still waits behind
//! the item in front of it. Send order always equals enqueue order.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::core::{AppResult, Category, DelayDecision, DelayPolicy, SchedulerError, SettingsSource};
use crate::infra::queue::InMemoryReleaseQueue;
use crate::util::clock::{Clock, MonotonicClock};

/// Deferred operation performing the real, undelayed send.
pub type ReleaseAction = Box<dyn FnOnce() -> AppResult<()> + Send + 'static>;

/// An intercepted outbound unit of work.
pub struct WorkItem {
    /// Classification used by the policy at enqueue time.
    pub category: Category,
    /// Raw send, run exactly once unless the queue is cleared first.
    pub action: ReleaseAction,
}

impl WorkItem {
    /// Wrap a send closure.
    pub fn new<F>(category: Category, action: F) -> Self
    where
        F: FnOnce() -> AppResult<()> + Send + 'static,
    {
        Self {
            category,
            action: Box::new(action),
        }
    }
}

impl fmt::Debug for WorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkItem")
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

/// A pending release. Immutable once queued.
pub struct ScheduledRelease {
    id: u64,
    category: Category,
    due: Instant,
    action: ReleaseAction,
}

impl ScheduledRelease {
    /// Build a release entry.
    #[must_use]
    pub fn new(id: u64, category: Category, due: Instant, action: ReleaseAction) -> Self {
        Self {
            id,
            category,
            due,
            action,
        }
    }

    /// Scheduler-assigned sequence number.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Category the item was classified as.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Absolute time at or after which the entry may be released.
    #[must_use]
    pub const fn due(&self) -> Instant {
        self.due
    }

    /// Whether the entry may be released at `now`.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.due <= now
    }

    fn into_action(self) -> ReleaseAction {
        self.action
    }
}

impl fmt::Debug for ScheduledRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduledRelease")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("due", &self.due)
            .finish_non_exhaustive()
    }
}

/// Abstraction for pending-release storage.
///
/// Entries come out in insertion order. `push` and `pop_due` may be called
/// concurrently from different threads.
pub trait ReleaseQueue: Send + Sync {
    /// Append at the tail.
    fn push(&self, release: ScheduledRelease);
    /// Remove and return the head if it is due at `now`. A non-due head
    /// blocks everything behind it.
    fn pop_due(&self, now: Instant) -> Option<ScheduledRelease>;
    /// Number of pending entries.
    fn len(&self) -> usize;
    /// Whether nothing is pending.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Drop every pending entry without running it; returns how many.
    fn clear(&self) -> usize;
}

/// How [`DelayScheduler::enqueue`] disposed of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The action already ran inline.
    Immediate,
    /// The action was queued.
    Scheduled {
        /// Sequence number of the queued release.
        id: u64,
        /// Absolute due time.
        due: Instant,
        /// Delay the policy chose.
        delay: Duration,
    },
}

/// Result of one [`DelayScheduler::advance`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    /// Entries removed from the queue and run (including failures).
    pub released: usize,
    /// Of those, how many failed or panicked.
    pub failed: usize,
}

/// Coarse scheduler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SchedulerState {
    /// Nothing pending.
    Idle,
    /// At least one entry pending.
    Pending,
}

/// Scheduler counters at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SchedulerStats {
    /// Items handed to `enqueue`.
    pub enqueued: u64,
    /// Items released inline.
    pub immediate: u64,
    /// Items queued for later release.
    pub scheduled: u64,
    /// Queued items released by `advance`.
    pub released: u64,
    /// Release actions that failed or panicked (inline or queued).
    pub failed: u64,
    /// Queued items discarded by `clear`.
    pub dropped: u64,
    /// Entries pending right now.
    pub pending: usize,
}

#[derive(Debug, Default)]
struct SchedulerCounters {
    enqueued: AtomicU64,
    immediate: AtomicU64,
    scheduled: AtomicU64,
    released: AtomicU64,
    failed: AtomicU64,
    dropped: AtomicU64,
}

impl SchedulerCounters {
    fn snapshot(&self, pending: usize) -> SchedulerStats {
        SchedulerStats {
            enqueued: self.enqueued.load(Ordering::Relaxed),
            immediate: self.immediate.load(Ordering::Relaxed),
            scheduled: self.scheduled.load(Ordering::Relaxed),
            released: self.released.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            pending,
        }
    }
}

/// Time-ordered delayed delivery of work items.
///
/// `enqueue` is called from the producer (send path), `advance` from the
/// host tick. Both take `&self` and never wait on each other beyond the
/// queue's short critical section. Release actions run with no lock held.
pub struct DelayScheduler<S, Q = InMemoryReleaseQueue, C = MonotonicClock> {
    settings: S,
    policy: DelayPolicy,
    queue: Q,
    clock: C,
    next_id: AtomicU64,
    counters: SchedulerCounters,
}

impl<S: SettingsSource> DelayScheduler<S> {
    /// Scheduler with the in-memory queue and the monotonic clock.
    pub fn new(settings: S) -> Self {
        Self::with_parts(settings, InMemoryReleaseQueue::new(), MonotonicClock)
    }
}

impl<S, Q, C> DelayScheduler<S, Q, C>
where
    S: SettingsSource,
    Q: ReleaseQueue,
    C: Clock,
{
    /// Scheduler from explicit components.
    pub fn with_parts(settings: S, queue: Q, clock: C) -> Self {
        Self {
            settings,
            policy: DelayPolicy,
            queue,
            clock,
            next_id: AtomicU64::new(1),
            counters: SchedulerCounters::default(),
        }
    }

    /// Settings source consulted at enqueue time.
    pub const fn settings(&self) -> &S {
        &self.settings
    }

    /// Clock used to stamp due times.
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Classify and dispatch an item.
    ///
    /// Immediate items run before this returns. Delayed items are queued and
    /// this returns without waiting.
    ///
    /// # Errors
    ///
    /// Only on the immediate path: [`SchedulerError::ReleaseFailed`] or
    /// [`SchedulerError::ReleasePanicked`] when the inline action fails.
    pub fn enqueue(&self, item: WorkItem) -> Result<Dispatch, SchedulerError> {
        self.counters.enqueued.fetch_add(1, Ordering::Relaxed);
        let WorkItem { category, action } = item;

        match self.policy.decide(&self.settings, category) {
            DelayDecision::Immediate => {
                self.counters.immediate.fetch_add(1, Ordering::Relaxed);
                run_release(0, action).inspect_err(|_| {
                    self.counters.failed.fetch_add(1, Ordering::Relaxed);
                })?;
                Ok(Dispatch::Immediate)
            }
            DelayDecision::Delay(delay) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                let now = self.clock.now();
                let due = now.checked_add(delay).unwrap_or(now);
                self.queue.push(ScheduledRelease::new(id, category, due, action));
                self.counters.scheduled.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(id, %category, ?delay, "queued packet");
                Ok(Dispatch::Scheduled { id, due, delay })
            }
        }
    }

    /// Release every due entry from the head, in order, stopping at the first
    /// entry not yet due. Failing actions are logged and skipped.
    ///
    /// Nothing is sent while the feature is disabled: entries still pending
    /// then (a producer that decided before the switch flipped) are dropped.
    pub fn advance(&self, now: Instant) -> AdvanceReport {
        let mut report = AdvanceReport::default();
        if !self.settings.is_enabled() {
            self.clear();
            return report;
        }
        while let Some(release) = self.queue.pop_due(now) {
            let id = release.id();
            let category = release.category();
            report.released += 1;
            self.counters.released.fetch_add(1, Ordering::Relaxed);

            match run_release(id, release.into_action()) {
                Ok(()) => tracing::debug!(id, %category, "sent delayed packet"),
                Err(e) => {
                    report.failed += 1;
                    self.counters.failed.fetch_add(1, Ordering::Relaxed);
                    tracing::error!(id, %category, error = %e, "error sending delayed packet");
                }
            }
        }
        report
    }

    /// [`advance`](Self::advance) at the scheduler clock's current time.
    pub fn tick(&self) -> AdvanceReport {
        self.advance(self.clock.now())
    }

    /// Pending entry count.
    pub fn size(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is pending.
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Idle/Pending state.
    pub fn state(&self) -> SchedulerState {
        if self.is_idle() {
            SchedulerState::Idle
        } else {
            SchedulerState::Pending
        }
    }

    /// Drop all pending entries without running them. Returns how many.
    pub fn clear(&self) -> usize {
        let dropped = self.queue.clear();
        if dropped > 0 {
            self.counters
                .dropped
                .fetch_add(dropped as u64, Ordering::Relaxed);
            tracing::warn!(dropped, "cleared pending packets");
        }
        dropped
    }

    /// Counter snapshot.
    pub fn stats(&self) -> SchedulerStats {
        self.counters.snapshot(self.queue.len())
    }
}

impl<S, Q, C> fmt::Debug for DelayScheduler<S, Q, C>
where
    Q: ReleaseQueue,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelayScheduler")
            .field("pending", &self.queue.len())
            .field("next_id", &self.next_id.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// Run a release action, turning errors and panics into [`SchedulerError`].
pub(crate) fn run_release(id: u64, action: ReleaseAction) -> Result<(), SchedulerError> {
    match panic::catch_unwind(AssertUnwindSafe(action)) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(SchedulerError::ReleaseFailed {
            id,
            reason: format!("{e:#}"),
        }),
        Err(_) => Err(SchedulerError::ReleasePanicked { id }),
    }
}
