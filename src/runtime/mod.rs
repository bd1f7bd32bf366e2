//! Host-facing surfaces: commands, status, and tick drivers.

use std::time::Duration;

pub mod command;
pub mod status;
#[cfg(not(target_arch = "wasm32"))]
pub mod thread_ticker;
#[cfg(feature = "tokio-runtime")]
pub mod tokio_ticker;

pub use command::{handle_command, PingCommand};
pub use status::{CategoryStatus, StatusReport};
#[cfg(not(target_arch = "wasm32"))]
pub use thread_ticker::ThreadTicker;
#[cfg(feature = "tokio-runtime")]
pub use tokio_ticker::TokioTicker;

/// Tick period matching a 20 Hz client loop.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Convenience: HUD line for `ctx`, or `None` when hidden.
pub fn hud_text<C: crate::util::clock::Clock>(ctx: &crate::core::FakePing<C>) -> Option<String> {
    StatusReport::capture(ctx).hud_text()
}
