//! The decision port.

use std::future::{Future, ready};

use tablebot_protocol::{Decision, Snapshot};

/// Error a strategy may return instead of a decision.
pub type StrategyError = Box<dyn std::error::Error + Send + Sync>;

/// Decides what to do on our turn.
///
/// The agent calls [`decide`](Strategy::decide) once per poll on which it
/// must act, with the snapshot that said so. The runtime never looks
/// inside a strategy; it only checks the decision it returns.
///
/// A strategy that fails, panics, or picks an action the table does not
/// offer is not fatal. The agent falls back to a safe action and keeps
/// polling.
///
/// `decide` is async so a strategy can wait on a model or any other remote
/// call:
///
/// ```ignore
/// impl Strategy for ModelStrategy {
///     async fn decide(&mut self, snapshot: &Snapshot) -> Result<Decision, StrategyError> {
///         let reply = self.client.complete(prompt(snapshot)).await?;
///         Ok(serde_json::from_str(&reply)?)
///     }
/// }
/// ```
pub trait Strategy: Send + 'static {
    fn decide(
        &mut self,
        snapshot: &Snapshot,
    ) -> impl Future<Output = Result<Decision, StrategyError>> + Send;
}

/// A [`Strategy`] built from a synchronous closure.
///
/// Created by [`strategy_fn`] or [`try_strategy_fn`].
pub struct FnStrategy<F>(F);

impl<F> Strategy for FnStrategy<F>
where
    F: FnMut(&Snapshot) -> Result<Decision, StrategyError> + Send + 'static,
{
    fn decide(
        &mut self,
        snapshot: &Snapshot,
    ) -> impl Future<Output = Result<Decision, StrategyError>> + Send {
        ready((self.0)(snapshot))
    }
}

/// Wraps an infallible closure as a [`Strategy`].
pub fn strategy_fn<F>(
    mut f: F,
) -> FnStrategy<impl FnMut(&Snapshot) -> Result<Decision, StrategyError> + Send + 'static>
where
    F: FnMut(&Snapshot) -> Decision + Send + 'static,
{
    FnStrategy(move |snapshot: &Snapshot| Ok::<_, StrategyError>(f(snapshot)))
}

/// Wraps a fallible closure as a [`Strategy`].
pub fn try_strategy_fn<F>(f: F) -> FnStrategy<F>
where
    F: FnMut(&Snapshot) -> Result<Decision, StrategyError> + Send + 'static,
{
    FnStrategy(f)
}
