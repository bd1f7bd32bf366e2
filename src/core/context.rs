//! Process-scoped context tying settings, session state and the scheduler
//! together. Constructed once by the host and passed to every collaborator.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::config::{Settings, SharedSettings};
use crate::core::scheduler::run_release;
use crate::core::{
    AdvanceReport, AppResult, Category, DelayScheduler, Dispatch, SchedulerError, WorkItem,
};
use crate::infra::queue::InMemoryReleaseQueue;
use crate::infra::settings::SettingsStore;
use crate::util::clock::{Clock, MonotonicClock};

/// Scheduler type owned by the context.
pub type ContextScheduler<C> = DelayScheduler<SharedSettings, InMemoryReleaseQueue, C>;

/// Connection/world state as far as shaping is concerned.
#[derive(Debug, Default)]
pub struct SessionState {
    local: AtomicBool,
}

impl SessionState {
    /// Whether a locally hosted session is active.
    pub fn is_local(&self) -> bool {
        self.local.load(Ordering::Acquire)
    }

    fn set_local(&self, local: bool) -> bool {
        self.local.swap(local, Ordering::AcqRel)
    }
}

/// Delay context: one per process.
pub struct FakePing<C = MonotonicClock> {
    settings: SharedSettings,
    scheduler: ContextScheduler<C>,
    session: SessionState,
    store: Box<dyn SettingsStore>,
}

impl<C: Clock> FakePing<C> {
    /// Assemble a context. Prefer [`crate::builders::FakePingBuilder`].
    pub fn new(settings: SharedSettings, store: Box<dyn SettingsStore>, clock: C) -> Self {
        let scheduler =
            DelayScheduler::with_parts(settings.clone(), InMemoryReleaseQueue::new(), clock);
        Self {
            settings,
            scheduler,
            session: SessionState::default(),
            store,
        }
    }

    /// Shared settings handle.
    pub const fn settings(&self) -> &SharedSettings {
        &self.settings
    }

    /// The scheduler.
    pub const fn scheduler(&self) -> &ContextScheduler<C> {
        &self.scheduler
    }

    /// Session state.
    pub const fn session(&self) -> &SessionState {
        &self.session
    }

    /// Packet interception point.
    ///
    /// `send` must be the raw send primitive; it is run inline when no local
    /// session is active, otherwise handed to the scheduler.
    ///
    /// # Errors
    ///
    /// Propagates a failure of `send` when it runs inline.
    pub fn intercept<F>(&self, category: Category, send: F) -> Result<Dispatch, SchedulerError>
    where
        F: FnOnce() -> AppResult<()> + Send + 'static,
    {
        if !self.session.is_local() {
            run_release(0, Box::new(send))?;
            return Ok(Dispatch::Immediate);
        }
        self.scheduler.enqueue(WorkItem::new(category, send))
    }

    /// A locally hosted session started; shaping may apply.
    pub fn begin_local_session(&self) {
        if !self.session.set_local(true) {
            tracing::info!("local session started, shaping active");
        }
    }

    /// The session ended. Pending sends are dropped. Returns how many.
    pub fn end_session(&self) -> usize {
        if self.session.set_local(false) {
            tracing::info!("session ended, shaping inactive");
        }
        self.scheduler.clear()
    }

    /// Host tick: release due items while a session is active.
    pub fn tick(&self) -> AdvanceReport {
        if !self.session.is_local() {
            return AdvanceReport::default();
        }
        self.scheduler.tick()
    }

    /// Release due items as of `now`, regardless of session state.
    pub fn advance(&self, now: Instant) -> AdvanceReport {
        self.scheduler.advance(now)
    }

    /// Pending item count.
    pub fn queued(&self) -> usize {
        self.scheduler.size()
    }

    /// Mutate settings, persist them, and drop pending items if this change
    /// disabled the feature. Returns the clamped result.
    pub fn update_settings<F>(&self, f: F) -> Settings
    where
        F: FnOnce(&mut Settings),
    {
        let mut was_enabled = false;
        let updated = self.settings.update(|s| {
            was_enabled = s.enabled;
            f(s);
        });
        self.on_settings_changed(was_enabled, &updated);

        if let Err(e) = self.store.save(&updated) {
            tracing::warn!(error = %e, "failed to save settings");
        }
        updated
    }

    /// Re-read settings from the store, replacing the in-memory copy. A
    /// reload that disables the feature drops pending items.
    ///
    /// # Errors
    ///
    /// Store load errors; the in-memory copy is left untouched.
    pub fn reload_settings(&self) -> Result<Settings, SchedulerError> {
        let loaded = self.store.load()?.sanitized();
        let previous = self.settings.replace(loaded.clone());
        self.on_settings_changed(previous.enabled, &loaded);
        Ok(loaded)
    }

    fn on_settings_changed(&self, was_enabled: bool, current: &Settings) {
        if was_enabled && !current.enabled {
            tracing::info!("fake ping disabled");
            self.scheduler.clear();
        } else if !was_enabled && current.enabled {
            tracing::info!(base_delay_ms = current.base_delay_ms, "fake ping enabled");
        }
    }
}

impl<C> std::fmt::Debug for FakePing<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakePing")
            .field("settings", &self.settings)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
