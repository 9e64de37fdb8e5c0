//! Transition detection for tablebot.
//!
//! The game service only ever answers "what does the table look like
//! now?". This crate turns a stream of those answers into events:
//!
//! 1. **Memory**: what the loop saw last ([`SeatMemory`])
//! 2. **Detection**: which transitions a new snapshot implies
//!    ([`detect`], [`Transition`])
//! 3. **Turn check**: whether the agent must act right now
//!    ([`should_act`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Agent loop (above)  ← owns a SeatMemory, dispatches Transitions
//!     ↕
//! Detect layer (this crate)  ← pure functions over snapshots
//!     ↕
//! Protocol layer (below)  ← provides Snapshot, Phase
//! ```
//!
//! Nothing here is global. Each agent loop owns its own [`SeatMemory`], so
//! any number of agents can run in one process.

mod memory;
mod transition;

pub use memory::SeatMemory;
pub use transition::{Transition, detect, should_act};
