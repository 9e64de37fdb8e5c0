//! What the loop does when an observation fails.

use tablebot_agent::{AgentError, AgentEvent, Strategy};
use tablebot_transport::{ErrorClass, GameApi, TransportError};

use crate::Agent;

impl<S: Strategy, A: GameApi> Agent<S, A> {
    /// Applies the recovery policy to a failed observation.
    ///
    /// | Class | Action |
    /// |---|---|
    /// | session lost, auto-rejoin on | rejoin; a failed rejoin is reported |
    /// | rate limited | pause for the rate-limit back-off |
    /// | anything else | report and poll again next cycle |
    ///
    /// "Report" means an error log plus an [`AgentEvent::Error`]. Nothing
    /// here stops the loop.
    pub(crate) async fn recover(&mut self, err: TransportError) {
        match err.class() {
            ErrorClass::SessionLost if self.config.auto_rejoin => {
                tracing::warn!(
                    table_id = %self.config.table_id,
                    "not at a table, rejoining"
                );
                if let Err(source) = self.join_table().await {
                    let err = AgentError::Transport(source);
                    tracing::error!(error = %err, "rejoin failed");
                    self.observers.dispatch(&AgentEvent::Error(&err));
                }
            }
            ErrorClass::RateLimited => {
                tracing::warn!(
                    backoff = ?self.config.rate_limit_backoff,
                    "rate limited, backing off"
                );
                self.scheduler.back_off(self.config.rate_limit_backoff);
            }
            class => {
                let err = AgentError::Transport(err);
                tracing::error!(?class, error = %err, "poll failed");
                self.observers.dispatch(&AgentEvent::Error(&err));
            }
        }
    }
}
