//! Error types for the agent layer.

use std::any::Any;

use tablebot_transport::TransportError;

/// Errors that can occur while running an agent.
///
/// Only [`AgentError::JoinRejected`] and [`AgentError::InvalidConfig`]
/// ever stop an agent. Everything else is reported to observers and the
/// loop carries on.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// A call to the game service failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The strategy returned an error instead of a decision.
    #[error("strategy failed: {0}")]
    Strategy(String),

    /// The strategy panicked while deciding.
    #[error("strategy panicked: {0}")]
    StrategyPanicked(String),

    /// The startup join was refused for a reason other than "already
    /// seated".
    #[error("could not join table {table_id}: {source}")]
    JoinRejected {
        table_id: String,
        #[source]
        source: TransportError,
    },

    /// The agent could not be built from the given settings.
    #[error("invalid agent configuration: {0}")]
    InvalidConfig(String),
}

impl AgentError {
    /// Builds [`AgentError::StrategyPanicked`] from a caught panic payload.
    pub fn strategy_panicked(payload: Box<dyn Any + Send>) -> Self {
        Self::StrategyPanicked(panic_message(payload.as_ref()))
    }

    /// The transport error behind this one, if any.
    pub fn transport(&self) -> Option<&TransportError> {
        match self {
            Self::Transport(err) | Self::JoinRejected { source: err, .. } => {
                Some(err)
            }
            _ => None,
        }
    }
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
