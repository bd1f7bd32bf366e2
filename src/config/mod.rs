//! Configuration models for delay settings and their persistence.

pub mod settings;

pub use settings::{
    SharedSettings, Settings, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH, MAX_BASE_DELAY_MS,
    MAX_JITTER_MS,
};
