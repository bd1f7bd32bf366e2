//! Infrastructure adapters for release queues and settings storage.

pub mod queue;
pub mod settings;

pub use queue::InMemoryReleaseQueue;
pub use settings::{FileSettingsStore, InMemorySettingsStore, SettingsStore};
