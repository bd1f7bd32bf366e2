//! Status reporting for the `status` command and the on-screen indicator.

use serde::Serialize;

use crate::core::{Category, FakePing};
use crate::util::clock::Clock;

/// Delay flag of one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryStatus {
    /// Category.
    pub category: Category,
    /// Whether it is delayed.
    pub enabled: bool,
}

/// Snapshot of settings and queue depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    /// Master switch.
    pub enabled: bool,
    /// Base delay (ms).
    pub base_delay_ms: i64,
    /// Jitter (ms).
    pub jitter_ms: i64,
    /// Per-category flags, in display order.
    pub categories: Vec<CategoryStatus>,
    /// Pending packets.
    pub queued: usize,
    /// Whether a local session is active.
    pub session_active: bool,
    /// Whether the indicator is shown.
    pub show_hud: bool,
}

impl StatusReport {
    /// Capture the current state of `ctx`.
    pub fn capture<C: Clock>(ctx: &FakePing<C>) -> Self {
        let s = ctx.settings().snapshot();
        Self {
            enabled: s.enabled,
            base_delay_ms: s.base_delay_ms,
            jitter_ms: s.jitter_ms,
            categories: Category::DELAYABLE
                .into_iter()
                .map(|category| CategoryStatus {
                    category,
                    enabled: s.category_enabled(category),
                })
                .collect(),
            queued: ctx.queued(),
            session_active: ctx.session().is_local(),
            show_hud: s.show_hud,
        }
    }

    /// Status block as printed by `/ping status`.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut out = vec!["=== FakePing Status ===".to_owned()];
        if !self.enabled {
            out.push("Enabled: No".to_owned());
            out.push("Use /ping set <ms> to enable".to_owned());
            return out;
        }

        out.push("Enabled: Yes".to_owned());
        out.push(format!("Base Delay: {}ms", self.base_delay_ms));
        out.push(format!("Jitter: \u{b1}{}ms", self.jitter_ms));
        out.push("Delayed Packet Types:".to_owned());
        for c in &self.categories {
            let state = if c.enabled { "ON" } else { "OFF" };
            out.push(format!("  {}: {state}", c.category.label()));
        }
        out.push(format!("Queued Packets: {}", self.queued));
        out
    }

    /// One-line indicator, or `None` when it should not be drawn.
    #[must_use]
    pub fn hud_text(&self) -> Option<String> {
        if !self.show_hud || !self.session_active || !self.enabled {
            return None;
        }
        let mut text = format!("Fake Ping: {}ms", self.base_delay_ms);
        if self.jitter_ms > 0 {
            text.push_str(&format!(" (\u{b1}{})", self.jitter_ms));
        }
        if self.queued > 0 {
            text.push_str(&format!(" [{}]", self.queued));
        }
        Some(text)
    }
}
