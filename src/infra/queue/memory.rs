//! In-memory FIFO release queue.

use std::collections::VecDeque;
use std::time::Instant;

use parking_lot::Mutex;

use crate::core::{ReleaseQueue, ScheduledRelease};

/// Insertion-ordered queue guarded by a `parking_lot::Mutex`.
///
/// The lock covers a single push or pop; release actions never run under it.
#[derive(Debug, Default)]
pub struct InMemoryReleaseQueue {
    entries: Mutex<VecDeque<ScheduledRelease>>,
}

impl InMemoryReleaseQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Due time of the head entry, if any.
    #[must_use]
    pub fn head_due(&self) -> Option<Instant> {
        self.entries.lock().front().map(ScheduledRelease::due)
    }
}

impl ReleaseQueue for InMemoryReleaseQueue {
    fn push(&self, release: ScheduledRelease) {
        self.entries.lock().push_back(release);
    }

    fn pop_due(&self, now: Instant) -> Option<ScheduledRelease> {
        let mut entries = self.entries.lock();
        if entries.front().is_some_and(|head| head.is_due(now)) {
            entries.pop_front()
        } else {
            None
        }
    }

    fn len(&self) -> usize {
        self.entries.lock().len()
    }

    fn clear(&self) -> usize {
        // Actions are dropped after the guard is released; their captures may
        // call back into the queue.
        let drained = std::mem::take(&mut *self.entries.lock());
        drained.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Category;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn release(id: u64, due: Instant) -> ScheduledRelease {
        ScheduledRelease::new(id, Category::Attack, due, Box::new(|| Ok(())))
    }

    #[test]
    fn test_pops_in_insertion_order() {
        let t0 = Instant::now();
        let q = InMemoryReleaseQueue::new();
        q.push(release(1, t0 + Duration::from_millis(30)));
        q.push(release(2, t0 + Duration::from_millis(10)));
        q.push(release(3, t0 + Duration::from_millis(20)));

        let later = t0 + Duration::from_millis(100);
        assert_eq!(q.pop_due(later).unwrap().id(), 1);
        assert_eq!(q.pop_due(later).unwrap().id(), 2);
        assert_eq!(q.pop_due(later).unwrap().id(), 3);
        assert!(q.pop_due(later).is_none());
    }

    #[test]
    fn test_head_blocks_due_entries_behind_it() {
        let t0 = Instant::now();
        let q = InMemoryReleaseQueue::new();
        q.push(release(1, t0 + Duration::from_millis(100)));
        q.push(release(2, t0 + Duration::from_millis(10)));

        assert!(q.pop_due(t0 + Duration::from_millis(50)).is_none());
        assert_eq!(q.len(), 2);
        assert_eq!(q.head_due(), Some(t0 + Duration::from_millis(100)));
    }

    #[test]
    fn test_due_boundary_is_inclusive() {
        let t0 = Instant::now();
        let q = InMemoryReleaseQueue::new();
        q.push(release(1, t0));
        assert_eq!(q.pop_due(t0).unwrap().id(), 1);
    }

    #[test]
    fn test_clear_reports_count() {
        let t0 = Instant::now();
        let q = InMemoryReleaseQueue::new();
        q.push(release(1, t0));
        q.push(release(2, t0));
        assert_eq!(q.clear(), 2);
        assert!(q.is_empty());
        assert_eq!(q.clear(), 0);
    }

    struct LenOnDrop {
        queue: Arc<InMemoryReleaseQueue>,
        seen: Arc<AtomicUsize>,
    }

    impl Drop for LenOnDrop {
        fn drop(&mut self) {
            self.seen.store(self.queue.len() + 1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_clear_drops_actions_outside_the_lock() {
        let q = Arc::new(InMemoryReleaseQueue::new());
        let seen = Arc::new(AtomicUsize::new(0));
        let capture = LenOnDrop {
            queue: Arc::clone(&q),
            seen: Arc::clone(&seen),
        };
        q.push(ScheduledRelease::new(
            1,
            Category::Attack,
            Instant::now(),
            Box::new(move || {
                let _held = &capture;
                Ok(())
            }),
        ));

        assert_eq!(q.clear(), 1);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_empty_queue() {
        let q = InMemoryReleaseQueue::new();
        assert!(q.pop_due(Instant::now()).is_none());
        assert_eq!(q.len(), 0);
        assert!(q.head_due().is_none());
    }
}
