//! The `/ping` command surface.
//!
//! ```text
//! /ping                      status
//! /ping set <0..=1000>       set base delay (ms) and enable
//! /ping on | off | status
//! /ping jitter <0..=100>     set jitter (ms)
//! /ping toggle <attacks|movement|interactions|blocks|items>
//! ```

use std::str::FromStr;

use crate::config::{MAX_BASE_DELAY_MS, MAX_JITTER_MS};
use crate::core::{Category, FakePing, SchedulerError};
use crate::runtime::status::StatusReport;
use crate::util::clock::Clock;

/// A parsed `/ping` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PingCommand {
    /// Set the base delay in milliseconds and enable.
    Set(i64),
    /// Enable with the current delay.
    On,
    /// Disable and drop pending packets.
    Off,
    /// Report current settings.
    Status,
    /// Set the jitter in milliseconds.
    Jitter(i64),
    /// Flip the delay flag of one packet category.
    Toggle(Category),
}

fn invalid(msg: impl Into<String>) -> SchedulerError {
    SchedulerError::InvalidCommand(msg.into())
}

fn millis_arg(token: Option<&str>, max: i64) -> Result<i64, SchedulerError> {
    let token = token.ok_or_else(|| invalid("expected <milliseconds>"))?;
    let value: i64 = token
        .parse()
        .map_err(|_| invalid(format!("`{token}` is not a whole number")))?;
    if !(0..=max).contains(&value) {
        return Err(invalid(format!("{value} is out of range 0..={max}")));
    }
    Ok(value)
}

impl FromStr for PingCommand {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        match tokens.next() {
            Some("ping" | "/ping") => {}
            Some(other) => return Err(invalid(format!("unknown command `{other}`"))),
            None => return Err(invalid("empty command")),
        }

        let command = match tokens.next() {
            None | Some("status") => Self::Status,
            Some("on") => Self::On,
            Some("off") => Self::Off,
            Some("set") => Self::Set(millis_arg(tokens.next(), MAX_BASE_DELAY_MS)?),
            Some("jitter") => Self::Jitter(millis_arg(tokens.next(), MAX_JITTER_MS)?),
            Some("toggle") => {
                let token = tokens
                    .next()
                    .ok_or_else(|| invalid("expected a packet type"))?;
                Self::Toggle(token.parse().map_err(invalid)?)
            }
            Some(other) => return Err(invalid(format!("unknown subcommand `{other}`"))),
        };

        if let Some(extra) = tokens.next() {
            return Err(invalid(format!("unexpected argument `{extra}`")));
        }
        Ok(command)
    }
}

impl PingCommand {
    /// Apply the command and return feedback lines for the user.
    pub fn execute<C: Clock>(self, ctx: &FakePing<C>) -> Vec<String> {
        match self {
            Self::Set(ms) => {
                ctx.update_settings(|s| {
                    s.base_delay_ms = ms;
                    s.enabled = true;
                });
                vec![format!("Fake ping set to {ms}ms")]
            }
            Self::On => {
                let s = ctx.update_settings(|s| s.enabled = true);
                vec![format!("Fake ping enabled ({}ms)", s.base_delay_ms)]
            }
            Self::Off => {
                ctx.update_settings(|s| s.enabled = false);
                ctx.scheduler().clear();
                vec!["Fake ping disabled".to_owned()]
            }
            Self::Jitter(ms) => {
                ctx.update_settings(|s| s.jitter_ms = ms);
                vec![format!("Ping jitter set to \u{b1}{ms}ms")]
            }
            Self::Toggle(category) => {
                let s = ctx.update_settings(|s| {
                    let flipped = !s.category_enabled(category);
                    s.set_category_enabled(category, flipped);
                });
                let state = if s.category_enabled(category) {
                    "enabled"
                } else {
                    "disabled"
                };
                vec![format!("Delay for {category} {state}")]
            }
            Self::Status => StatusReport::capture(ctx).lines(),
        }
    }
}

/// Parse and execute one line of command input.
///
/// # Errors
///
/// [`SchedulerError::InvalidCommand`] if the line does not parse.
pub fn handle_command<C: Clock>(
    ctx: &FakePing<C>,
    input: &str,
) -> Result<Vec<String>, SchedulerError> {
    let command: PingCommand = input.parse()?;
    tracing::debug!(?command, "executing ping command");
    Ok(command.execute(ctx))
}
