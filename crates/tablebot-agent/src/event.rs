//! Events an agent loop reports to its observers.

use std::fmt;

use tablebot_detect::Transition;
use tablebot_protocol::{Decision, Phase, Snapshot};

use crate::AgentError;

/// Something the agent loop noticed or did.
///
/// Events borrow from the loop's own state and only live for the
/// duration of one dispatch. Clone what you need to keep.
#[derive(Debug, Clone, Copy)]
pub enum AgentEvent<'a> {
    /// We are seated at `table_id`. Fires after the startup join and
    /// after every rejoin.
    Connected { table_id: &'a str },

    /// A hand we had not seen before is in progress.
    HandStarted {
        hand_id: &'a str,
        snapshot: &'a Snapshot,
    },

    /// The hand we last saw is over.
    HandEnded {
        hand_id: &'a str,
        snapshot: &'a Snapshot,
    },

    /// The phase moved on.
    PhaseChanged {
        from: Phase,
        to: Phase,
        snapshot: &'a Snapshot,
    },

    /// Out of chips between hands. Repeats every poll until it stops
    /// being true.
    WentBust { stack: i64, snapshot: &'a Snapshot },

    /// It is our turn. Fires every poll on which we will act, just
    /// before the strategy is asked.
    YourTurn { snapshot: &'a Snapshot },

    /// A strategy decision was accepted by the server.
    Action {
        decision: &'a Decision,
        snapshot: &'a Snapshot,
    },

    /// Something failed and was recovered from.
    Error(&'a AgentError),

    /// The loop has stopped. Fires exactly once.
    Disconnected,
}

impl<'a> AgentEvent<'a> {
    /// Builds the event for a detected transition.
    pub fn from_transition(
        transition: &'a Transition,
        snapshot: &'a Snapshot,
    ) -> Self {
        match transition {
            Transition::HandEnded { hand_id } => Self::HandEnded { hand_id, snapshot },
            Transition::HandStarted { hand_id } => {
                Self::HandStarted { hand_id, snapshot }
            }
            Transition::PhaseChanged { from, to } => Self::PhaseChanged {
                from: *from,
                to: *to,
                snapshot,
            },
            Transition::WentBust { stack } => Self::WentBust {
                stack: *stack,
                snapshot,
            },
        }
    }

    /// Which kind of event this is.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Connected { .. } => EventKind::Connected,
            Self::HandStarted { .. } => EventKind::HandStarted,
            Self::HandEnded { .. } => EventKind::HandEnded,
            Self::PhaseChanged { .. } => EventKind::PhaseChanged,
            Self::WentBust { .. } => EventKind::WentBust,
            Self::YourTurn { .. } => EventKind::YourTurn,
            Self::Action { .. } => EventKind::Action,
            Self::Error(_) => EventKind::Error,
            Self::Disconnected => EventKind::Disconnected,
        }
    }

    /// The snapshot this event was derived from, if any.
    pub fn snapshot(&self) -> Option<&'a Snapshot> {
        match *self {
            Self::HandStarted { snapshot, .. }
            | Self::HandEnded { snapshot, .. }
            | Self::PhaseChanged { snapshot, .. }
            | Self::WentBust { snapshot, .. }
            | Self::YourTurn { snapshot }
            | Self::Action { snapshot, .. } => Some(snapshot),
            Self::Connected { .. } | Self::Error(_) | Self::Disconnected => None,
        }
    }
}

/// Names each [`AgentEvent`] variant, for subscribing to one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Connected,
    HandStarted,
    HandEnded,
    PhaseChanged,
    WentBust,
    YourTurn,
    Action,
    Error,
    Disconnected,
}

impl EventKind {
    /// The kinds that come from diffing snapshots, plus the turn signal.
    pub const TRANSITIONS: [EventKind; 5] = [
        Self::HandStarted,
        Self::HandEnded,
        Self::PhaseChanged,
        Self::WentBust,
        Self::YourTurn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::HandStarted => "hand_started",
            Self::HandEnded => "hand_ended",
            Self::PhaseChanged => "phase_changed",
            Self::WentBust => "went_bust",
            Self::YourTurn => "your_turn",
            Self::Action => "action",
            Self::Error => "error",
            Self::Disconnected => "disconnected",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
