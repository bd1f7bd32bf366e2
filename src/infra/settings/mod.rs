//! Settings persistence backends.

pub mod file;
pub mod memory;

pub use file::FileSettingsStore;
pub use memory::InMemorySettingsStore;

use crate::config::Settings;
use crate::core::SchedulerError;

/// Abstraction for settings persistence.
pub trait SettingsStore: Send + Sync {
    /// Load stored settings, creating defaults where the backend supports it.
    ///
    /// # Errors
    ///
    /// Backend-specific I/O or format errors.
    fn load(&self) -> Result<Settings, SchedulerError>;

    /// Persist settings.
    ///
    /// # Errors
    ///
    /// Backend-specific I/O or format errors.
    fn save(&self, settings: &Settings) -> Result<(), SchedulerError>;
}

impl<T: SettingsStore + ?Sized> SettingsStore for std::sync::Arc<T> {
    fn load(&self) -> Result<Settings, SchedulerError> {
        (**self).load()
    }

    fn save(&self, settings: &Settings) -> Result<(), SchedulerError> {
        (**self).save(settings)
    }
}
