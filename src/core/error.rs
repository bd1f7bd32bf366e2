//! Error types for scheduler operations.

use thiserror::Error;

/// Errors produced by the delay core and its collaborators.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// A release action returned an error.
    #[error("release {id} failed: {reason}")]
    ReleaseFailed {
        /// Sequence id of the release (0 for inline releases).
        id: u64,
        /// Rendered error chain of the failed action.
        reason: String,
    },
    /// A release action panicked; the panic was contained.
    #[error("release {id} panicked")]
    ReleasePanicked {
        /// Sequence id of the release (0 for inline releases).
        id: u64,
    },
    /// Command text could not be parsed or had an out-of-range argument.
    #[error("invalid command: {0}")]
    InvalidCommand(String),
    /// Configuration could not be resolved.
    #[error("config error: {0}")]
    Config(String),
    /// Settings file could not be read or written.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Settings file was not valid JSON.
    #[error("settings format error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Application-facing result using anyhow for higher-level contexts.
///
/// Release actions return this so hosts can surface any send error.
pub type AppResult<T> = Result<T, anyhow::Error>;
