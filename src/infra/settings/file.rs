//! JSON file settings store.

use std::fs;
use std::path::{Path, PathBuf};

use super::SettingsStore;
use crate::config::{Settings, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
use crate::core::SchedulerError;

/// Settings persisted as pretty-printed JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    /// Store at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `$FAKEPING_CONFIG` (a `.env` file is honored), falling back
    /// to `config/fakeping.json`.
    #[must_use]
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        Self::new(path)
    }

    /// File location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Result<Settings, SchedulerError> {
        if !self.path.exists() {
            let defaults = Settings::default();
            self.save(&defaults)?;
            tracing::info!(path = %self.path.display(), "created default settings file");
            return Ok(defaults);
        }
        let json = fs::read_to_string(&self.path)?;
        let settings = Settings::from_json_str(&json)?;
        tracing::debug!(path = %self.path.display(), "loaded settings");
        Ok(settings)
    }

    fn save(&self, settings: &Settings) -> Result<(), SchedulerError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, settings.to_json_pretty()?)?;
        Ok(())
    }
}
