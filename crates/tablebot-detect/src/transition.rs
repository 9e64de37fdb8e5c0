//! Snapshot diffing.

use std::fmt;

use tablebot_protocol::{Phase, Snapshot};

use crate::SeatMemory;

/// A semantic change inferred from two consecutive snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The hand we last saw is over. Always immediately followed by
    /// [`Transition::HandStarted`] for the hand that replaced it.
    HandEnded { hand_id: String },

    /// A hand we have not seen before is in progress.
    HandStarted { hand_id: String },

    /// The phase moved on.
    PhaseChanged { from: Phase, to: Phase },

    /// Out of chips between hands. Reported on every poll while it holds.
    WentBust { stack: i64 },
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HandEnded { hand_id } => write!(f, "hand {hand_id} ended"),
            Self::HandStarted { hand_id } => write!(f, "hand {hand_id} started"),
            Self::PhaseChanged { from, to } => write!(f, "phase {from} -> {to}"),
            Self::WentBust { stack } => write!(f, "bust (stack {stack})"),
        }
    }
}

/// Computes the transitions `current` implies relative to `memory`.
///
/// Pure: `memory` is not updated. The caller records `current` once the
/// transitions have been dispatched.
///
/// Order is fixed: `HandEnded`, `HandStarted`, `PhaseChanged`, `WentBust`.
///
/// - A non-empty hand id different from the remembered one starts a hand.
///   It also ends the remembered hand, if there was one.
/// - Any phase different from the remembered phase is a phase change. The
///   first snapshot has nothing to compare against and reports none.
/// - A stack at or below zero while waiting is a bust, every time.
pub fn detect(memory: &SeatMemory, current: &Snapshot) -> Vec<Transition> {
    let mut transitions = Vec::new();

    if !current.hand_id.is_empty()
        && memory.last_hand_id() != Some(current.hand_id.as_str())
    {
        if let Some(previous) = memory.last_hand_id() {
            transitions.push(Transition::HandEnded {
                hand_id: previous.to_string(),
            });
        }
        transitions.push(Transition::HandStarted {
            hand_id: current.hand_id.clone(),
        });
    }

    match memory.last_phase() {
        Some(from) if from != current.phase => {
            transitions.push(Transition::PhaseChanged {
                from,
                to: current.phase,
            });
        }
        _ => {}
    }

    if current.own_stack <= 0 && current.phase == Phase::Waiting {
        transitions.push(Transition::WentBust {
            stack: current.own_stack,
        });
    }

    if !transitions.is_empty() {
        tracing::trace!(count = transitions.len(), "transitions detected");
    }
    transitions
}

/// Whether the agent must act on this snapshot.
///
/// Level-triggered: true on every snapshot where it is our turn and the
/// server offers at least one action.
pub fn should_act(current: &Snapshot) -> bool {
    current.is_your_turn && !current.available_actions.is_empty()
}
