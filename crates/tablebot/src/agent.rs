//! The agent loop.
//!
//! One [`Agent`] drives one seat. It owns everything it mutates (seat
//! memory, scheduler, observers, strategy) and runs on a single task, so
//! snapshots are handled strictly in poll order and every event of a
//! cycle is dispatched before the next observation.

use std::sync::Arc;

use tablebot_agent::{
    AgentConfig, AgentError, AgentEvent, LoopState, Observers, Strategy,
};
use tablebot_detect::{SeatMemory, Transition, detect, should_act};
use tablebot_poll::{PollConfig, PollMetrics, PollScheduler};
use tablebot_protocol::{Registration, Snapshot};
use tablebot_transport::{GameApi, TransportError};
use tokio::sync::watch;

use crate::AgentBuilder;
use crate::pipeline;

// ---------------------------------------------------------------------------
// StopHandle
// ---------------------------------------------------------------------------

/// Asks a running agent to stop.
///
/// Cheap to clone and safe to use from any task or thread. A stop wakes
/// the agent from its pause between polls; a cycle already in flight
/// finishes first.
#[derive(Debug, Clone)]
pub struct StopHandle {
    sender: Arc<watch::Sender<bool>>,
}

impl StopHandle {
    pub(crate) fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Requests a stop. Idempotent.
    pub fn stop(&self) {
        if !self.sender.send_replace(true) {
            tracing::debug!("stop requested");
        }
    }

    /// Whether a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        *self.sender.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.sender.subscribe()
    }
}

// ---------------------------------------------------------------------------
// Agent
// ---------------------------------------------------------------------------

/// A polling agent seated at one table.
///
/// Build one with [`Agent::builder`], then call [`run`](Self::run).
pub struct Agent<S, A> {
    pub(crate) api: A,
    pub(crate) strategy: S,
    pub(crate) config: AgentConfig,
    pub(crate) observers: Observers,
    pub(crate) memory: SeatMemory,
    pub(crate) scheduler: PollScheduler,
    pub(crate) state: LoopState,
    pub(crate) stop: StopHandle,
    pub(crate) registration: Option<Registration>,
}

impl Agent<(), tablebot_transport::HttpClient> {
    /// Starts building an agent.
    pub fn builder() -> AgentBuilder {
        AgentBuilder::new()
    }
}

impl<S: Strategy, A: GameApi> Agent<S, A> {
    pub(crate) fn new(
        api: A,
        strategy: S,
        config: AgentConfig,
        observers: Observers,
        registration: Option<Registration>,
    ) -> Self {
        let config = config.validated();
        let scheduler = PollScheduler::new(PollConfig {
            interval: config.poll_interval,
            initial_jitter: config.initial_jitter,
            ..Default::default()
        });

        Self {
            api,
            strategy,
            config,
            observers,
            memory: SeatMemory::new(),
            scheduler,
            state: LoopState::Idle,
            stop: StopHandle::new(),
            registration,
        }
    }

    /// Joins the table (when configured to) and polls until stopped.
    ///
    /// Returns `Ok(())` after a stop. Returns an error only when the
    /// startup join is refused; nothing that happens while polling is
    /// fatal. Either way the loop ends in [`LoopState::Stopped`] and
    /// observers hear exactly one [`AgentEvent::Disconnected`].
    pub async fn run(&mut self) -> Result<(), AgentError> {
        if self.state == LoopState::Stopped {
            tracing::warn!("agent already stopped");
            return Ok(());
        }

        let mut stop_rx = self.stop.subscribe();
        tracing::info!(
            table_id = %self.config.table_id,
            poll_interval = ?self.config.poll_interval,
            "agent starting"
        );

        if self.config.auto_join && !self.stop.is_stopped() {
            self.set_state(LoopState::Joining);
            if let Err(source) = self.join_table().await {
                let err = AgentError::JoinRejected {
                    table_id: self.config.table_id.clone(),
                    source,
                };
                tracing::error!(error = %err, "startup join failed");
                self.observers.dispatch(&AgentEvent::Error(&err));
                self.shutdown();
                return Err(err);
            }
        }

        if !self.stop.is_stopped() {
            self.set_state(LoopState::Polling);
        }

        loop {
            tokio::select! {
                biased;
                _ = stop_requested(&mut stop_rx) => break,
                _ = self.scheduler.wait_for_poll() => {}
            }
            self.cycle().await;
            self.scheduler.record_poll_end();
        }

        self.shutdown();
        Ok(())
    }

    /// One observe → detect → act pass.
    async fn cycle(&mut self) {
        let snapshot = match self.api.observe().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                self.recover(err).await;
                return;
            }
        };

        for transition in detect(&self.memory, &snapshot) {
            log_transition(&transition, &snapshot);
            self.observers
                .dispatch(&AgentEvent::from_transition(&transition, &snapshot));
        }
        self.memory.record(&snapshot);

        if should_act(&snapshot) {
            self.observers
                .dispatch(&AgentEvent::YourTurn { snapshot: &snapshot });
            let outcome = pipeline::act_on(
                &self.api,
                &mut self.strategy,
                &mut self.observers,
                &snapshot,
            )
            .await;
            tracing::trace!(?outcome, "turn handled");
        }
    }

    /// Joins the configured table. "Already seated" counts as joined.
    pub(crate) async fn join_table(&mut self) -> Result<(), TransportError> {
        let table_id = &self.config.table_id;
        match self.api.join(table_id).await {
            Ok(_) => tracing::info!(%table_id, "joined table"),
            Err(err) if err.is_already_seated() => {
                tracing::info!(%table_id, "already seated")
            }
            Err(err) => return Err(err),
        }
        self.observers
            .dispatch(&AgentEvent::Connected { table_id });
        Ok(())
    }

    fn shutdown(&mut self) {
        self.set_state(LoopState::Stopped);
        self.memory.clear();
        self.observers.dispatch(&AgentEvent::Disconnected);
        let metrics = self.scheduler.metrics();
        tracing::info!(
            polls = metrics.total_polls,
            backoffs = metrics.total_backoffs,
            "agent stopped"
        );
    }

    fn set_state(&mut self, next: LoopState) {
        if self.state == next {
            return;
        }
        if !self.state.can_transition_to(next) {
            tracing::warn!(from = %self.state, to = %next, "unexpected loop state change");
        }
        tracing::debug!(from = %self.state, to = %next, "loop state");
        self.state = next;
    }

    /// Requests a stop. Same as [`StopHandle::stop`].
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// A handle that can stop this agent from elsewhere.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// The effective (validated) configuration.
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Poll cadence metrics.
    pub fn metrics(&self) -> &PollMetrics {
        self.scheduler.metrics()
    }

    /// What the loop remembers from the last snapshot.
    pub fn memory(&self) -> &SeatMemory {
        &self.memory
    }

    /// The registration performed while connecting, if one was.
    ///
    /// Its `api_key` is not shown again by the service. Persist it.
    pub fn registration(&self) -> Option<&Registration> {
        self.registration.as_ref()
    }

    /// The client this agent talks through.
    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn observers_mut(&mut self) -> &mut Observers {
        &mut self.observers
    }
}

/// Resolves once a stop has been requested, including one requested
/// before the call.
async fn stop_requested(rx: &mut watch::Receiver<bool>) {
    // The agent's own `StopHandle` keeps a sender alive, so this only
    // errors after the agent is gone. Either way the loop should end.
    if rx.wait_for(|stopped| *stopped).await.is_err() {
        tracing::debug!("stop channel closed");
    }
}

fn log_transition(transition: &Transition, snapshot: &Snapshot) {
    match transition {
        Transition::HandStarted { hand_id } => tracing::info!(
            %hand_id,
            cards = %snapshot.hole_cards.join(" "),
            stack = snapshot.own_stack,
            "new hand"
        ),
        Transition::HandEnded { hand_id } => {
            tracing::debug!(%hand_id, "hand ended")
        }
        Transition::PhaseChanged { from, to } => tracing::debug!(
            %from,
            %to,
            board = %snapshot.board.join(" "),
            pot = snapshot.pot,
            "phase changed"
        ),
        Transition::WentBust { stack } => {
            tracing::info!(stack, "out of chips")
        }
    }
}
