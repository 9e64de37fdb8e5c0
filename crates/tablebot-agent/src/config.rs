//! Agent configuration and loop state machine.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Table joined when none is configured.
pub const DEFAULT_TABLE: &str = "main";

// ---------------------------------------------------------------------------
// AgentConfig
// ---------------------------------------------------------------------------

/// Configuration for one agent loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Which table to join.
    pub table_id: String,

    /// Pause between the end of one poll cycle and the next observation.
    pub poll_interval: Duration,

    /// Rejoin automatically when the server says we are not seated.
    pub auto_rejoin: bool,

    /// Join `table_id` when the loop starts.
    pub auto_join: bool,

    /// Pause after the server throttles us. Longer than `poll_interval`.
    pub rate_limit_backoff: Duration,

    /// Random delay, up to this bound, before the first observation.
    pub initial_jitter: Duration,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            table_id: DEFAULT_TABLE.to_string(),
            poll_interval: Duration::from_secs(2),
            auto_rejoin: true,
            auto_join: true,
            rate_limit_backoff: Duration::from_secs(5),
            initial_jitter: Duration::ZERO,
        }
    }
}

impl AgentConfig {
    /// Shortest poll interval accepted.
    pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

    /// Default settings for a specific table.
    pub fn for_table(table_id: impl Into<String>) -> Self {
        Self {
            table_id: table_id.into(),
            ..Default::default()
        }
    }

    /// Fix any unsafe values, logging what changed.
    ///
    /// - `poll_interval` raised to [`Self::MIN_POLL_INTERVAL`].
    /// - `rate_limit_backoff` not longer than `poll_interval` becomes
    ///   twice `poll_interval`.
    /// - An empty `table_id` becomes [`DEFAULT_TABLE`].
    pub fn validated(mut self) -> Self {
        if self.poll_interval < Self::MIN_POLL_INTERVAL {
            warn!(
                poll_interval = ?self.poll_interval,
                "poll interval below minimum, raising"
            );
            self.poll_interval = Self::MIN_POLL_INTERVAL;
        }
        if self.rate_limit_backoff <= self.poll_interval {
            let backoff = self.poll_interval * 2;
            warn!(
                rate_limit_backoff = ?self.rate_limit_backoff,
                new_backoff = ?backoff,
                "rate-limit back-off must exceed poll interval"
            );
            self.rate_limit_backoff = backoff;
        }
        if self.table_id.trim().is_empty() {
            warn!("empty table id, using {DEFAULT_TABLE}");
            self.table_id = DEFAULT_TABLE.to_string();
        }
        self
    }
}

// ---------------------------------------------------------------------------
// LoopState
// ---------------------------------------------------------------------------

/// The lifecycle state of an agent loop.
///
/// ```text
/// Idle → Joining → Polling → Stopped
///   └──────────────↗   (auto-join disabled)
/// ```
///
/// Any state may go straight to `Stopped`. Nothing leaves `Stopped`.
/// Rejoins after a lost seat happen inside `Polling`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopState {
    Idle,
    Joining,
    Polling,
    Stopped,
}

impl LoopState {
    /// The usual successor of this state.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::Joining),
            Self::Joining => Some(Self::Polling),
            Self::Polling => Some(Self::Stopped),
            Self::Stopped => None,
        }
    }

    /// Returns `true` if moving to `target` is allowed.
    pub fn can_transition_to(self, target: Self) -> bool {
        match (self, target) {
            (Self::Stopped, _) => false,
            (_, Self::Stopped) => true,
            (Self::Idle, Self::Polling) => true,
            _ => self.next() == Some(target),
        }
    }

    /// Returns `true` once the loop has started and not yet stopped.
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Joining | Self::Polling)
    }
}

impl std::fmt::Display for LoopState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Joining => write!(f, "Joining"),
            Self::Polling => write!(f, "Polling"),
            Self::Stopped => write!(f, "Stopped"),
        }
    }
}
