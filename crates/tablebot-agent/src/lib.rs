//! Agent building blocks for tablebot.
//!
//! Everything an embedding program touches besides the loop itself:
//!
//! - [`Strategy`] — the decision port: snapshot in, decision out
//! - [`AgentEvent`] / [`EventKind`] — what the loop reports
//! - [`Observer`] / [`Observers`] — who hears about it
//! - [`AgentConfig`] — table, cadence, and recovery knobs
//! - [`LoopState`] — lifecycle state machine of one agent loop
//! - [`AgentError`] — everything that can go wrong

mod config;
mod error;
mod event;
mod observer;
mod strategy;

pub use config::{AgentConfig, DEFAULT_TABLE, LoopState};
pub use error::AgentError;
pub use event::{AgentEvent, EventKind};
pub use observer::{Observer, ObserverError, Observers};
pub use strategy::{
    FnStrategy, Strategy, StrategyError, strategy_fn, try_strategy_fn,
};
