//! # tablebot
//!
//! Polling agent runtime for a server-authoritative poker API.
//!
//! The game service never pushes anything. tablebot joins a table, asks
//! for the table state at a fixed cadence, works out what changed since
//! the last answer, and when it is our turn asks a [`Strategy`] what to
//! do. Whatever goes wrong (a dead network, a lost seat, throttling, a
//! broken strategy) is recovered from and the loop keeps going until it
//! is told to stop.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tablebot::prelude::*;
//!
//! # async fn demo() -> Result<(), AgentError> {
//! let mut agent = Agent::builder()
//!     .api_key("pk_live_...")
//!     .config(AgentConfig::for_table("main"))
//!     .on(EventKind::HandStarted, |event| {
//!         if let AgentEvent::HandStarted { hand_id, .. } = event {
//!             tracing::info!(%hand_id, "new hand");
//!         }
//!     })
//!     .strategy(strategy_fn(|snapshot: &Snapshot| {
//!         if snapshot.can(ActionKind::Check) {
//!             Decision::check()
//!         } else {
//!             Decision::fold()
//!         }
//!     }))
//!     .connect()
//!     .await?;
//!
//! let stop = agent.stop_handle();
//! tokio::spawn(async move {
//!     let _ = tokio::signal::ctrl_c().await;
//!     stop.stop();
//! });
//! agent.run().await
//! # }
//! ```

mod agent;
mod builder;
mod pipeline;
mod recovery;

pub use agent::{Agent, StopHandle};
pub use builder::AgentBuilder;

pub use tablebot_agent::{
    AgentConfig, AgentError, AgentEvent, DEFAULT_TABLE, EventKind, FnStrategy,
    LoopState, Observer, ObserverError, Observers, Strategy, StrategyError,
    strategy_fn, try_strategy_fn,
};
pub use tablebot_detect::{SeatMemory, Transition, detect, should_act};
pub use tablebot_poll::PollMetrics;
pub use tablebot_protocol as protocol;
pub use tablebot_transport as transport;

/// Convenience re-exports for embedding programs.
///
/// ```rust
/// use tablebot::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Agent, AgentBuilder, AgentConfig, AgentError, AgentEvent, EventKind,
        LoopState, Observer, ObserverError, StopHandle, Strategy,
        StrategyError, strategy_fn, try_strategy_fn,
    };
    pub use tablebot_protocol::{
        ActionKind, Decision, Phase, RegisterRequest, Snapshot,
    };
    pub use tablebot_transport::{ClientConfig, GameApi, HttpClient};
}
