//! Wire protocol for tablebot.
//!
//! This crate defines what the agent and the game service say to each
//! other:
//!
//! - **Types** ([`Snapshot`], [`Decision`], [`ActionKind`], [`Phase`], …) —
//!   one observation of the table, and one turn's answer to it.
//! - **Records** ([`Profile`], [`Registration`], [`LeaderboardEntry`],
//!   [`HandRecord`], request bodies) — everything off the polling path.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how bodies become bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong doing that.
//!
//! # Architecture
//!
//! The protocol layer knows nothing about HTTP or the runtime loop. It
//! only knows shapes:
//!
//! ```text
//! Transport (HTTP bodies) → Protocol (Snapshot / Decision) → Agent runtime
//! ```

mod codec;
mod error;
mod records;
mod types;

pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use records::{
    Acknowledgement, ActRequest, ActionRecord, ApiErrorBody, ChatRequest,
    HandRecord, HistoryPage, JoinRequest, LeaderboardEntry, LeaderboardPage,
    Profile, RegisterRequest, Registration,
};
pub use types::{
    ActionKind, Card, ChatEntry, Decision, MAX_CHAT_LEN, Opponent, Phase,
    PlayerStatus, Snapshot, clamp_chat,
};
