//! Delay policy, scheduler, and the process-scoped context.

pub mod context;
pub mod error;
pub mod policy;
pub mod scheduler;

pub use context::{ContextScheduler, FakePing, SessionState};
pub use error::{AppResult, SchedulerError};
pub use policy::{Category, DelayDecision, DelayPolicy, SettingsSource};
pub use scheduler::{
    AdvanceReport, DelayScheduler, Dispatch, ReleaseAction, ReleaseQueue, ScheduledRelease,
    SchedulerState, SchedulerStats, WorkItem,
};
