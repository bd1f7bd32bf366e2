//! User-facing delay settings.
//!
//! The JSON layout (camelCase keys) is the one written to `fakeping.json`, so
//! files produced by earlier releases keep loading.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::core::{Category, SchedulerError, SettingsSource};

/// Upper bound for the base delay, in milliseconds.
pub const MAX_BASE_DELAY_MS: i64 = 1000;
/// Upper bound for the jitter, in milliseconds.
pub const MAX_JITTER_MS: i64 = 100;
/// Environment variable overriding the settings file location.
pub const CONFIG_PATH_ENV: &str = "FAKEPING_CONFIG";
/// Settings file location used when `FAKEPING_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config/fakeping.json";

/// Delay settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Master switch.
    pub enabled: bool,
    /// Base delay in milliseconds, `0..=1000`.
    pub base_delay_ms: i64,
    /// Symmetric jitter in milliseconds, `0..=100`.
    pub jitter_ms: i64,
    /// Delay attack packets.
    pub delay_attacks: bool,
    /// Delay movement packets.
    pub delay_movement: bool,
    /// Delay hand swing and block interaction packets.
    pub delay_interactions: bool,
    /// Delay block breaking packets.
    pub delay_block_breaking: bool,
    /// Delay item use packets.
    pub delay_item_use: bool,
    /// Show the on-screen indicator.
    pub show_hud: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: false,
            base_delay_ms: 150,
            jitter_ms: 20,
            delay_attacks: true,
            delay_movement: true,
            delay_interactions: true,
            delay_block_breaking: true,
            delay_item_use: true,
            show_hud: true,
        }
    }
}

impl Settings {
    /// Clamp delay and jitter into their bounds. Negative values become zero.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.sanitize();
        self
    }

    /// In-place variant of [`Settings::sanitized`].
    pub fn sanitize(&mut self) {
        self.base_delay_ms = self.base_delay_ms.clamp(0, MAX_BASE_DELAY_MS);
        self.jitter_ms = self.jitter_ms.clamp(0, MAX_JITTER_MS);
    }

    /// Whether packets of `category` are subject to delay. `Other` never is.
    #[must_use]
    pub const fn category_enabled(&self, category: Category) -> bool {
        match category {
            Category::Attack => self.delay_attacks,
            Category::Movement => self.delay_movement,
            Category::Interaction => self.delay_interactions,
            Category::BlockBreak => self.delay_block_breaking,
            Category::ItemUse => self.delay_item_use,
            Category::Other => false,
        }
    }

    /// Set the delay flag for `category`. Setting `Other` has no effect.
    pub fn set_category_enabled(&mut self, category: Category, enabled: bool) {
        match category {
            Category::Attack => self.delay_attacks = enabled,
            Category::Movement => self.delay_movement = enabled,
            Category::Interaction => self.delay_interactions = enabled,
            Category::BlockBreak => self.delay_block_breaking = enabled,
            Category::ItemUse => self.delay_item_use = enabled,
            Category::Other => {}
        }
    }

    /// Parse settings from JSON and clamp them into bounds.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::Serde`] when the input is not a settings object.
    pub fn from_json_str(input: &str) -> Result<Self, SchedulerError> {
        let settings: Self = serde_json::from_str(input)?;
        Ok(settings.sanitized())
    }

    /// Render settings as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::Serde`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, SchedulerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn millis(value: i64) -> Duration {
    Duration::from_millis(u64::try_from(value).unwrap_or(0))
}

impl SettingsSource for Settings {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn base_delay(&self) -> Duration {
        millis(self.base_delay_ms)
    }

    fn jitter(&self) -> Duration {
        millis(self.jitter_ms)
    }

    fn is_category_enabled(&self, category: Category) -> bool {
        self.category_enabled(category)
    }
}

/// Settings shared between the command surface (writer) and the producer
/// path (reader). Reads take a brief read lock.
#[derive(Debug, Clone, Default)]
pub struct SharedSettings {
    inner: Arc<RwLock<Settings>>,
}

impl SharedSettings {
    /// Wrap `settings`, clamping them first.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings.sanitized())),
        }
    }

    /// Copy of the current settings.
    #[must_use]
    pub fn snapshot(&self) -> Settings {
        self.inner.read().clone()
    }

    /// Mutate the settings and return the clamped result.
    pub fn update<F>(&self, f: F) -> Settings
    where
        F: FnOnce(&mut Settings),
    {
        let mut guard = self.inner.write();
        f(&mut *guard);
        guard.sanitize();
        guard.clone()
    }

    /// Replace the settings wholesale, returning the previous value.
    pub fn replace(&self, settings: Settings) -> Settings {
        std::mem::replace(&mut *self.inner.write(), settings.sanitized())
    }
}

impl SettingsSource for SharedSettings {
    fn is_enabled(&self) -> bool {
        self.inner.read().enabled
    }

    fn base_delay(&self) -> Duration {
        millis(self.inner.read().base_delay_ms)
    }

    fn jitter(&self) -> Duration {
        millis(self.inner.read().jitter_ms)
    }

    fn is_category_enabled(&self, category: Category) -> bool {
        self.inner.read().category_enabled(category)
    }

    fn delay_params(&self, category: Category) -> Option<(Duration, Duration)> {
        self.inner.read().delay_params(category)
    }
}
