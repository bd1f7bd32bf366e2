//! # FakePing
//!
//! Artificial outbound latency for locally hosted game sessions, so a player
//! can rehearse combat timing under conditions resembling a remote server
//! while actually playing offline.
//!
//! ## How it works
//!
//! The host's send path hands every outbound packet to
//! [`FakePing::intercept`](core::FakePing::intercept) together with the raw
//! send closure. The [`DelayPolicy`](core::DelayPolicy) decides from the
//! current [`Settings`](config::Settings) whether the packet's
//! [`Category`](core::Category) is delayed and by how much
//! (`base ± uniform jitter`, never below zero). Immediate packets are sent
//! inline. Delayed packets are appended to a FIFO release queue and sent by
//! [`DelayScheduler::advance`](core::DelayScheduler::advance), which the host
//! calls once per tick.
//!
//! The queue is released strictly from the head: a packet whose jitter made
//! it due earlier still waits for the packet in front of it. Packets leave in
//! the order they were queued, at the cost of occasionally exceeding their
//! own delay.
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use fakeping::builders::FakePingBuilder;
//! use fakeping::config::Settings;
//! use fakeping::core::{Category, Dispatch};
//! use fakeping::util::ManualClock;
//!
//! let clock = Arc::new(ManualClock::new());
//! let ctx = FakePingBuilder::new()
//!     .with_settings(Settings {
//!         enabled: true,
//!         base_delay_ms: 150,
//!         jitter_ms: 0,
//!         ..Settings::default()
//!     })
//!     .with_clock(Arc::clone(&clock))
//!     .build()?;
//! ctx.begin_local_session();
//!
//! let dispatch = ctx.intercept(Category::Attack, || Ok(()))?;
//! assert!(matches!(dispatch, Dispatch::Scheduled { .. }));
//!
//! clock.advance(Duration::from_millis(149));
//! assert_eq!(ctx.tick().released, 0);
//! clock.advance(Duration::from_millis(1));
//! assert_eq!(ctx.tick().released, 1);
//! # Ok::<(), fakeping::core::SchedulerError>(())
//! ```
//!
//! ## Host wiring
//!
//! - send path → [`FakePing::intercept`](core::FakePing::intercept)
//! - tick loop → [`FakePing::tick`](core::FakePing::tick), or let
//!   [`ThreadTicker`](runtime::ThreadTicker) / `TokioTicker` drive it
//! - session join/leave → `begin_local_session` / `end_session`
//! - chat commands → [`handle_command`](runtime::handle_command)
//! - overlay → [`hud_text`](runtime::hud_text)

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Delay policy, scheduler, and the process-scoped context.
pub mod core;
/// Settings model, bounds, and JSON format.
pub mod config;
/// Builders to construct the context from configuration.
pub mod builders;
/// Infrastructure adapters for release queues and settings storage.
pub mod infra;
/// Command surface, status reporting, and tick drivers.
pub mod runtime;
/// Shared utilities.
pub mod util;

pub use crate::core::{Category, DelayScheduler, FakePing, SchedulerError, WorkItem};
pub use crate::config::Settings;
