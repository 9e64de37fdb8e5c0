//! Turning a turn into a submitted action.
//!
//! Runs once per poll on which we must act. Whatever the strategy does,
//! this ends with at most one primary submission plus at most one
//! fallback fold, and never lets a failure escape to the loop.

use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use tablebot_agent::{AgentError, AgentEvent, Observers, Strategy};
use tablebot_protocol::{ActionKind, Decision, Snapshot, clamp_chat};
use tablebot_transport::GameApi;

/// How a turn was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// The strategy's decision was accepted.
    Submitted(ActionKind),
    /// The strategy failed or chose badly; a safe action was sent instead.
    FellBack(ActionKind),
    /// The submission was refused and the fallback fold (if any) was
    /// attempted.
    Refused,
    /// The decision was unusable and fold was not offered; nothing was
    /// sent.
    Skipped,
}

pub(crate) async fn act_on<A, S>(
    api: &A,
    strategy: &mut S,
    observers: &mut Observers,
    snapshot: &Snapshot,
) -> Outcome
where
    A: GameApi,
    S: Strategy,
{
    // The async block defers the call so a panic inside `decide` itself
    // is caught too, not just one inside the future it returns.
    let decided =
        AssertUnwindSafe(async { strategy.decide(snapshot).await })
            .catch_unwind()
            .await;

    let decision = match decided {
        Ok(Ok(decision)) => decision,
        Ok(Err(err)) => {
            let err = AgentError::Strategy(err.to_string());
            return fall_back(api, observers, snapshot, err).await;
        }
        Err(payload) => {
            let err = AgentError::strategy_panicked(payload);
            return fall_back(api, observers, snapshot, err).await;
        }
    };

    if let Some(reasoning) = &decision.reasoning {
        tracing::debug!(%reasoning, "strategy reasoning");
    }

    if !snapshot.can(decision.action) {
        tracing::warn!(
            requested = %decision.action,
            available = ?snapshot.available_actions,
            "strategy chose an unavailable action, folding"
        );
        return fold_instead(api, snapshot).await;
    }
    if let Err(err) = decision.validate() {
        tracing::warn!(error = %err, "strategy decision malformed, folding");
        return fold_instead(api, snapshot).await;
    }

    match api.act(decision.action, decision.wire_amount()).await {
        Ok(_) => {
            tracing::info!(
                action = %decision.action,
                amount = ?decision.wire_amount(),
                pot = snapshot.pot,
                cards = %snapshot.hole_cards.join(" "),
                "action submitted"
            );
            observers.dispatch(&AgentEvent::Action {
                decision: &decision,
                snapshot,
            });
            send_chat(api, &decision).await;
            Outcome::Submitted(decision.action)
        }
        Err(err) => {
            let err = AgentError::from(err);
            tracing::error!(action = %decision.action, error = %err, "action failed");
            observers.dispatch(&AgentEvent::Error(&err));

            if snapshot.can(ActionKind::Fold) {
                match api.act(ActionKind::Fold, None).await {
                    Ok(_) => tracing::info!("fell back to fold"),
                    Err(err) => {
                        tracing::debug!(error = %err, "fallback fold failed")
                    }
                }
            }
            Outcome::Refused
        }
    }
}

/// Reports a strategy failure, then checks if possible and folds
/// otherwise. No `Action` event: there is no decision to report.
async fn fall_back<A: GameApi>(
    api: &A,
    observers: &mut Observers,
    snapshot: &Snapshot,
    err: AgentError,
) -> Outcome {
    tracing::error!(error = %err, "strategy failed");
    observers.dispatch(&AgentEvent::Error(&err));

    let action = if snapshot.can(ActionKind::Check) {
        ActionKind::Check
    } else {
        ActionKind::Fold
    };
    submit_quietly(api, action).await;
    Outcome::FellBack(action)
}

async fn fold_instead<A: GameApi>(api: &A, snapshot: &Snapshot) -> Outcome {
    if !snapshot.can(ActionKind::Fold) {
        tracing::warn!(
            available = ?snapshot.available_actions,
            "fold not available, skipping this turn"
        );
        return Outcome::Skipped;
    }
    submit_quietly(api, ActionKind::Fold).await;
    Outcome::FellBack(ActionKind::Fold)
}

/// Submits a safe action. A failure is logged and dropped; the next poll
/// re-evaluates the table.
async fn submit_quietly<A: GameApi>(api: &A, action: ActionKind) {
    match api.act(action, None).await {
        Ok(_) => tracing::info!(%action, "fallback action submitted"),
        Err(err) => {
            tracing::warn!(%action, error = %err, "fallback action failed")
        }
    }
}

/// Sends the decision's chat line, if any. Failures are dropped.
async fn send_chat<A: GameApi>(api: &A, decision: &Decision) {
    let Some(text) = decision.chat.as_deref() else {
        return;
    };
    let text = clamp_chat(text);
    if text.trim().is_empty() {
        return;
    }
    match api.chat(text).await {
        Ok(_) => tracing::debug!(%text, "chat sent"),
        Err(err) => tracing::debug!(error = %err, "chat failed"),
    }
}
