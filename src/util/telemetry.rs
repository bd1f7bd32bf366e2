//! Log output for hosts that do not bring their own subscriber.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset: session, enable/disable and dropped
/// packet events, without the per-packet debug lines.
pub const DEFAULT_LOG_FILTER: &str = "fakeping=info";

/// Install a `fmt` subscriber filtered by `RUST_LOG`, or by
/// [`DEFAULT_LOG_FILTER`] when that is unset. Does nothing if the host has
/// already installed a subscriber.
///
/// Use `RUST_LOG=fakeping=debug` to see every queued and released packet.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
