//! In-memory settings store.

use parking_lot::Mutex;

use super::SettingsStore;
use crate::config::Settings;
use crate::core::SchedulerError;

/// Keeps settings in memory and counts saves. Used by tests and hosts that
/// persist settings themselves.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    stored: Mutex<Option<Settings>>,
    saves: Mutex<usize>,
}

impl InMemorySettingsStore {
    /// Empty store; `load` yields defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `settings`.
    #[must_use]
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            stored: Mutex::new(Some(settings)),
            saves: Mutex::new(0),
        }
    }

    /// Last saved settings.
    #[must_use]
    pub fn stored(&self) -> Option<Settings> {
        self.stored.lock().clone()
    }

    /// Number of `save` calls so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        *self.saves.lock()
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn load(&self) -> Result<Settings, SchedulerError> {
        Ok(self.stored.lock().clone().unwrap_or_default().sanitized())
    }

    fn save(&self, settings: &Settings) -> Result<(), SchedulerError> {
        *self.stored.lock() = Some(settings.clone());
        *self.saves.lock() += 1;
        Ok(())
    }
}
