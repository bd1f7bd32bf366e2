//! Delay decisions: whether a work item is held back, and for how long.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Intent of an outbound work item, as classified by the interception point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Entity attack / interaction.
    Attack,
    /// Player movement and look updates.
    Movement,
    /// Hand swings and block interactions.
    Interaction,
    /// Block breaking actions.
    BlockBreak,
    /// Item use.
    ItemUse,
    /// Anything the interception point could not classify. Never delayed.
    Other,
}

impl Category {
    /// Categories that settings can enable for delay, in display order.
    pub const DELAYABLE: [Self; 5] = [
        Self::Attack,
        Self::Movement,
        Self::Interaction,
        Self::BlockBreak,
        Self::ItemUse,
    ];

    /// Token used by the `toggle` command.
    #[must_use]
    pub const fn command_name(self) -> &'static str {
        match self {
            Self::Attack => "attacks",
            Self::Movement => "movement",
            Self::Interaction => "interactions",
            Self::BlockBreak => "blocks",
            Self::ItemUse => "items",
            Self::Other => "other",
        }
    }

    /// Human readable label for status output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Attack => "Attacks",
            Self::Movement => "Movement",
            Self::Interaction => "Interactions",
            Self::BlockBreak => "Block Breaking",
            Self::ItemUse => "Item Use",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command_name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::DELAYABLE
            .into_iter()
            .find(|c| c.command_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown packet type `{s}`"))
    }
}

/// Read side of the settings collaborator. Reads must be cheap and must not
/// block for long; they are made on the producer path.
pub trait SettingsSource: Send + Sync {
    /// Master switch.
    fn is_enabled(&self) -> bool;
    /// Base delay applied to every delayed item.
    fn base_delay(&self) -> Duration;
    /// Half-width of the uniform jitter window.
    fn jitter(&self) -> Duration;
    /// Per-category switch. Unknown categories must report `false`.
    fn is_category_enabled(&self, category: Category) -> bool;

    /// Base delay and jitter for `category`, or `None` when it is not
    /// delayed. Sources behind a lock override this to read all four values
    /// from one version of the settings.
    fn delay_params(&self, category: Category) -> Option<(Duration, Duration)> {
        (self.is_enabled() && self.is_category_enabled(category))
            .then(|| (self.base_delay(), self.jitter()))
    }
}

/// Outcome of a policy decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayDecision {
    /// Release right away, bypassing the queue.
    Immediate,
    /// Hold for the given duration.
    Delay(Duration),
}

/// Stateless delay policy. Each decision draws fresh jitter.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelayPolicy;

impl DelayPolicy {
    /// Decide using the calling thread's RNG.
    pub fn decide<S>(&self, settings: &S, category: Category) -> DelayDecision
    where
        S: SettingsSource + ?Sized,
    {
        self.decide_with(&mut rand::rng(), settings, category)
    }

    /// Decide using a caller-supplied RNG.
    pub fn decide_with<R, S>(&self, rng: &mut R, settings: &S, category: Category) -> DelayDecision
    where
        R: Rng + ?Sized,
        S: SettingsSource + ?Sized,
    {
        match settings.delay_params(category) {
            Some((base, jitter)) => DelayDecision::Delay(jittered(rng, base, jitter)),
            None => DelayDecision::Immediate,
        }
    }
}

/// `max(0, base + U[-jitter, +jitter])`, inclusive on both ends.
fn jittered<R: Rng + ?Sized>(rng: &mut R, base: Duration, jitter: Duration) -> Duration {
    if jitter.is_zero() {
        return base;
    }
    let offset = rng.random_range(Duration::ZERO..=jitter.saturating_mul(2));
    base.saturating_add(offset).saturating_sub(jitter)
}
