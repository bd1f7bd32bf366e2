//! Builder for the process-scoped [`FakePing`] context.

use crate::config::{Settings, SharedSettings};
use crate::core::{FakePing, SchedulerError};
use crate::infra::settings::{FileSettingsStore, InMemorySettingsStore, SettingsStore};
use crate::util::clock::{Clock, MonotonicClock};

/// Assembles a [`FakePing`] from a settings store, optional explicit
/// settings and a clock.
pub struct FakePingBuilder<C = MonotonicClock> {
    settings: Option<Settings>,
    store: Option<Box<dyn SettingsStore>>,
    clock: C,
}

impl FakePingBuilder<MonotonicClock> {
    /// Builder with no store, default settings and the monotonic clock.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            settings: None,
            store: None,
            clock: MonotonicClock,
        }
    }

    /// Builder persisting to the file named by `FAKEPING_CONFIG`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new().with_store(FileSettingsStore::from_env())
    }
}

impl Default for FakePingBuilder<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> FakePingBuilder<C> {
    /// Start from these settings instead of loading them from the store.
    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Persist settings through `store`.
    #[must_use]
    pub fn with_store<St>(mut self, store: St) -> Self
    where
        St: SettingsStore + 'static,
    {
        self.store = Some(Box::new(store));
        self
    }

    /// Stamp due times with `clock`.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> FakePingBuilder<C2> {
        FakePingBuilder {
            settings: self.settings,
            store: self.store,
            clock,
        }
    }

    /// Build the context. Settings come from `with_settings` if given,
    /// otherwise from the store. An unreadable store falls back to defaults.
    ///
    /// # Errors
    ///
    /// Settings that were read but do not parse.
    pub fn build(self) -> Result<FakePing<C>, SchedulerError> {
        let store = self
            .store
            .unwrap_or_else(|| Box::new(InMemorySettingsStore::new()));
        let settings = match self.settings {
            Some(settings) => settings,
            None => match store.load() {
                Ok(settings) => settings,
                Err(SchedulerError::Io(e)) => {
                    tracing::warn!(error = %e, "failed to load settings, using defaults");
                    Settings::default()
                }
                Err(e) => return Err(e),
            },
        };
        tracing::info!(
            enabled = settings.enabled,
            base_delay_ms = settings.base_delay_ms,
            jitter_ms = settings.jitter_ms,
            "fake ping context initialized"
        );
        Ok(FakePing::new(SharedSettings::new(settings), store, self.clock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::clock::ManualClock;
    use std::sync::Arc;

    #[test]
    fn test_build_with_defaults() {
        let ctx = FakePingBuilder::new().build().unwrap();
        assert_eq!(ctx.settings().snapshot(), Settings::default());
        assert_eq!(ctx.queued(), 0);
    }

    #[test]
    fn test_build_loads_from_store() {
        let stored = Settings {
            enabled: true,
            base_delay_ms: 90,
            ..Settings::default()
        };
        let ctx = FakePingBuilder::new()
            .with_store(InMemorySettingsStore::with_settings(stored.clone()))
            .with_clock(Arc::new(ManualClock::new()))
            .build()
            .unwrap();
        assert_eq!(ctx.settings().snapshot(), stored);
    }

    #[test]
    fn test_explicit_settings_win_over_store() {
        let explicit = Settings {
            base_delay_ms: 300,
            ..Settings::default()
        };
        let ctx = FakePingBuilder::new()
            .with_store(InMemorySettingsStore::with_settings(Settings::default()))
            .with_settings(explicit)
            .build()
            .unwrap();
        assert_eq!(ctx.settings().snapshot().base_delay_ms, 300);
    }
}
