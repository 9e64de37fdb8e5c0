//! What the loop remembers between polls.

use tablebot_protocol::{Phase, Snapshot};

/// The last hand id and phase the loop has seen.
///
/// Owned by exactly one agent loop and passed by reference to
/// [`detect`](crate::detect). Starts empty: nothing has been observed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatMemory {
    last_hand_id: Option<String>,
    last_phase: Option<Phase>,
}

impl SeatMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a snapshot into memory.
    ///
    /// An empty hand id means "no hand in progress" and does not erase
    /// the remembered one, so the next real hand still counts as new
    /// and ends the previous one.
    pub fn record(&mut self, snapshot: &Snapshot) {
        if !snapshot.hand_id.is_empty() {
            self.last_hand_id = Some(snapshot.hand_id.clone());
        }
        self.last_phase = Some(snapshot.phase);
    }

    /// The last non-empty hand id seen, if any.
    pub fn last_hand_id(&self) -> Option<&str> {
        self.last_hand_id.as_deref()
    }

    /// The phase of the last snapshot seen, if any.
    pub fn last_phase(&self) -> Option<Phase> {
        self.last_phase
    }

    /// `true` until the first snapshot is recorded.
    pub fn is_fresh(&self) -> bool {
        self.last_phase.is_none()
    }

    /// Forgets everything. Used when the agent stops.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
