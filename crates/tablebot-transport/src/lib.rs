//! Client layer for tablebot.
//!
//! Provides the [`GameApi`] trait, one async method per capability of the
//! remote game service, and an HTTP implementation of it.
//!
//! Nothing here retries. A failed call comes back as a classified
//! [`TransportError`]; the runtime loop decides whether that means
//! "rejoin", "back off", or "try again next cycle".
//!
//! # Feature Flags
//!
//! - `http` (default) — [`HttpClient`] via `reqwest`

mod error;
#[cfg(feature = "http")]
mod http;

pub use error::{ErrorClass, TransportError};
#[cfg(feature = "http")]
pub use http::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, HttpClient};

use std::future::Future;

use tablebot_protocol::{
    Acknowledgement, ActionKind, HandRecord, LeaderboardEntry, Profile,
    Snapshot,
};

/// Default page size for [`GameApi::leaderboard`].
pub const DEFAULT_LEADERBOARD_LIMIT: u32 = 20;

/// Default page size for [`GameApi::history`].
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// The remote game service, as seen by one authenticated agent.
///
/// Calls are issued serially by a single runtime loop, so implementations
/// only need `&self`. Every call must be bounded in time: a hung request
/// has to surface as an error, never block the loop forever.
pub trait GameApi: Send + Sync + 'static {
    /// Identity, stack, and rebuy counters for this agent.
    fn profile(
        &self,
    ) -> impl Future<Output = Result<Profile, TransportError>> + Send;

    /// Takes a seat at `table_id`.
    ///
    /// The server reports an "already seated" rejection when we are
    /// already there; see [`TransportError::is_already_seated`].
    fn join(
        &self,
        table_id: &str,
    ) -> impl Future<Output = Result<Acknowledgement, TransportError>> + Send;

    /// Leaves the current table. Only allowed between hands.
    fn leave(
        &self,
    ) -> impl Future<Output = Result<Acknowledgement, TransportError>> + Send;

    /// The current table state from our seat.
    fn observe(
        &self,
    ) -> impl Future<Output = Result<Snapshot, TransportError>> + Send;

    /// Submits an action. `amount` is sent only when present.
    fn act(
        &self,
        action: ActionKind,
        amount: Option<i64>,
    ) -> impl Future<Output = Result<Acknowledgement, TransportError>> + Send;

    /// Sends a chat line to the table.
    fn chat(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Acknowledgement, TransportError>> + Send;

    /// Resets our stack when it has fallen below the server's floor.
    fn rebuy(
        &self,
    ) -> impl Future<Output = Result<Acknowledgement, TransportError>> + Send;

    /// The global leaderboard, best first.
    fn leaderboard(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<LeaderboardEntry>, TransportError>> + Send;

    /// Recently completed hands at our table.
    fn history(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<HandRecord>, TransportError>> + Send;

    /// Sits out: the server folds for us every hand until we sit back in.
    fn sit_out(
        &self,
    ) -> impl Future<Output = Result<Acknowledgement, TransportError>> + Send;

    /// Sits back in after [`sit_out`](Self::sit_out).
    fn sit_in(
        &self,
    ) -> impl Future<Output = Result<Acknowledgement, TransportError>> + Send;
}
