//! Integration tests for the agent loop.
//!
//! A scripted in-memory `GameApi` stands in for the game service. It
//! serves queued observations in order, records every call, and stops the
//! agent once its script runs out. All tests run on paused tokio time, so
//! poll intervals and back-offs elapse instantly and exactly.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tablebot::prelude::*;
use tablebot::protocol::{Acknowledgement, HandRecord, LeaderboardEntry, Profile};
use tablebot::transport::TransportError;
use tablebot::{Agent, StopHandle};
use tokio::time::Instant;

// =========================================================================
// Scripted game service
// =========================================================================

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Join(String),
    Observe,
    Act(ActionKind, Option<i64>),
    Chat(String),
}

#[derive(Default)]
struct Script {
    observations: VecDeque<Result<Snapshot, TransportError>>,
    joins: VecDeque<Result<Acknowledgement, TransportError>>,
    acts: VecDeque<Result<Acknowledgement, TransportError>>,
    chat_fails: bool,
    calls: Vec<Call>,
    observed_at: Vec<Instant>,
    last_snapshot: Option<Snapshot>,
    stop: Option<StopHandle>,
}

#[derive(Clone, Default)]
struct ScriptedApi {
    script: Arc<Mutex<Script>>,
}

impl ScriptedApi {
    fn observing(observations: Vec<Result<Snapshot, TransportError>>) -> Self {
        let api = Self::default();
        api.script.lock().unwrap().observations = observations.into();
        api
    }

    fn with_joins(self, joins: Vec<Result<Acknowledgement, TransportError>>) -> Self {
        self.script.lock().unwrap().joins = joins.into();
        self
    }

    fn with_acts(self, acts: Vec<Result<Acknowledgement, TransportError>>) -> Self {
        self.script.lock().unwrap().acts = acts.into();
        self
    }

    fn failing_chat(self) -> Self {
        self.script.lock().unwrap().chat_fails = true;
        self
    }

    fn stop_when_exhausted(&self, stop: StopHandle) {
        self.script.lock().unwrap().stop = Some(stop);
    }

    fn calls(&self) -> Vec<Call> {
        self.script.lock().unwrap().calls.clone()
    }

    fn acts(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Act(..)))
            .collect()
    }

    fn observed_at(&self) -> Vec<Instant> {
        self.script.lock().unwrap().observed_at.clone()
    }
}

fn ack() -> Result<Acknowledgement, TransportError> {
    Ok(Acknowledgement::default())
}

impl GameApi for ScriptedApi {
    async fn profile(&self) -> Result<Profile, TransportError> {
        Err(TransportError::status(404, "not scripted"))
    }

    async fn join(&self, table_id: &str) -> Result<Acknowledgement, TransportError> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(Call::Join(table_id.to_string()));
        script.joins.pop_front().unwrap_or_else(ack)
    }

    async fn leave(&self) -> Result<Acknowledgement, TransportError> {
        ack()
    }

    async fn observe(&self) -> Result<Snapshot, TransportError> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(Call::Observe);
        script.observed_at.push(Instant::now());

        match script.observations.pop_front() {
            Some(Ok(snapshot)) => {
                script.last_snapshot = Some(snapshot.clone());
                Ok(snapshot)
            }
            Some(Err(err)) => Err(err),
            None => {
                // Out of script: stop, and show a quiet table meanwhile.
                if let Some(stop) = &script.stop {
                    stop.stop();
                }
                let mut quiet = script.last_snapshot.clone().unwrap_or_default();
                quiet.is_your_turn = false;
                quiet.available_actions.clear();
                Ok(quiet)
            }
        }
    }

    async fn act(
        &self,
        action: ActionKind,
        amount: Option<i64>,
    ) -> Result<Acknowledgement, TransportError> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(Call::Act(action, amount));
        script.acts.pop_front().unwrap_or_else(ack)
    }

    async fn chat(&self, text: &str) -> Result<Acknowledgement, TransportError> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(Call::Chat(text.to_string()));
        if script.chat_fails {
            Err(TransportError::status(400, "Chat rejected"))
        } else {
            ack()
        }
    }

    async fn rebuy(&self) -> Result<Acknowledgement, TransportError> {
        ack()
    }

    async fn leaderboard(&self, _limit: u32) -> Result<Vec<LeaderboardEntry>, TransportError> {
        Ok(Vec::new())
    }

    async fn history(&self, _limit: u32) -> Result<Vec<HandRecord>, TransportError> {
        Ok(Vec::new())
    }

    async fn sit_out(&self) -> Result<Acknowledgement, TransportError> {
        ack()
    }

    async fn sit_in(&self) -> Result<Acknowledgement, TransportError> {
        ack()
    }
}

// =========================================================================
// Helpers
// =========================================================================

type EventLog = Arc<Mutex<Vec<String>>>;

fn describe(event: &AgentEvent<'_>) -> String {
    match event {
        AgentEvent::Connected { table_id } => format!("connected:{table_id}"),
        AgentEvent::HandStarted { hand_id, .. } => format!("hand_started:{hand_id}"),
        AgentEvent::HandEnded { hand_id, .. } => format!("hand_ended:{hand_id}"),
        AgentEvent::PhaseChanged { from, to, .. } => format!("phase:{from}->{to}"),
        AgentEvent::WentBust { stack, .. } => format!("bust:{stack}"),
        AgentEvent::YourTurn { .. } => "your_turn".to_string(),
        AgentEvent::Action { decision, .. } => format!("action:{}", decision.action),
        AgentEvent::Error(_) => "error".to_string(),
        AgentEvent::Disconnected => "disconnected".to_string(),
    }
}

fn config() -> AgentConfig {
    AgentConfig {
        table_id: "main".into(),
        poll_interval: Duration::from_secs(2),
        rate_limit_backoff: Duration::from_secs(5),
        ..Default::default()
    }
}

/// Builds an agent over `api` that logs every event and stops when the
/// script runs out.
fn agent_with<S: Strategy>(
    api: &ScriptedApi,
    config: AgentConfig,
    strategy: S,
) -> (Agent<S, ScriptedApi>, EventLog) {
    let log: EventLog = Arc::default();
    let sink = log.clone();
    let mut agent = Agent::builder()
        .config(config)
        .strategy(strategy)
        .build_with(api.clone());
    agent
        .observers_mut()
        .on_any(move |event| sink.lock().unwrap().push(describe(event)));
    api.stop_when_exhausted(agent.stop_handle());
    (agent, log)
}

fn events(log: &EventLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

fn count(log: &EventLog, name: &str) -> usize {
    events(log).iter().filter(|e| e.as_str() == name).count()
}

fn checker() -> impl Strategy {
    strategy_fn(|snapshot: &Snapshot| {
        if snapshot.can(ActionKind::Check) {
            Decision::check()
        } else {
            Decision::fold()
        }
    })
}

fn waiting() -> Snapshot {
    Snapshot {
        phase: Phase::Waiting,
        own_stack: 1000,
        ..Default::default()
    }
}

fn hand(id: &str, phase: Phase) -> Snapshot {
    Snapshot {
        hand_id: id.to_string(),
        phase,
        own_stack: 1000,
        hole_cards: vec!["As".into(), "Kd".into()],
        ..Default::default()
    }
}

fn my_turn(actions: &[ActionKind]) -> Snapshot {
    Snapshot {
        is_your_turn: true,
        current_bet: 20,
        own_bet: 0,
        pot: 30,
        available_actions: actions.to_vec(),
        ..hand("h1", Phase::Preflop)
    }
}

// =========================================================================
// Lifecycle
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_joins_polls_and_disconnects() {
    let api = ScriptedApi::observing(vec![Ok(waiting()), Ok(waiting())]);
    let (mut agent, log) = agent_with(&api, config(), checker());

    agent.run().await.expect("run should end cleanly");

    assert_eq!(agent.state(), LoopState::Stopped);
    assert_eq!(api.calls()[0], Call::Join("main".into()));
    assert_eq!(events(&log).first().map(String::as_str), Some("connected:main"));
    assert_eq!(events(&log).last().map(String::as_str), Some("disconnected"));
    assert_eq!(count(&log, "disconnected"), 1);
    assert_eq!(agent.metrics().total_polls, 3);
}

#[tokio::test(start_paused = true)]
async fn test_already_seated_join_counts_as_connected() {
    let api = ScriptedApi::observing(vec![Ok(waiting())])
        .with_joins(vec![Err(TransportError::status(400, "Already at a table"))]);
    let (mut agent, log) = agent_with(&api, config(), checker());

    agent.run().await.expect("already seated is not an error");

    assert_eq!(count(&log, "connected:main"), 1);
    assert_eq!(count(&log, "error"), 0);
}

#[tokio::test(start_paused = true)]
async fn test_rejected_startup_join_aborts() {
    let api = ScriptedApi::observing(vec![Ok(waiting())])
        .with_joins(vec![Err(TransportError::status(403, "Table is closed"))]);
    let (mut agent, log) = agent_with(&api, config(), checker());

    let err = agent.run().await.unwrap_err();

    assert!(matches!(err, AgentError::JoinRejected { ref table_id, .. } if table_id == "main"));
    assert!(!api.calls().contains(&Call::Observe));
    assert_eq!(agent.state(), LoopState::Stopped);
    assert_eq!(events(&log), vec!["error", "disconnected"]);
}

#[tokio::test(start_paused = true)]
async fn test_auto_join_disabled_skips_join() {
    let api = ScriptedApi::observing(vec![Ok(waiting())]);
    let config = AgentConfig {
        auto_join: false,
        ..config()
    };
    let (mut agent, log) = agent_with(&api, config, checker());

    agent.run().await.unwrap();

    assert!(!api.calls().iter().any(|c| matches!(c, Call::Join(_))));
    assert_eq!(count(&log, "connected:main"), 0);
}

#[tokio::test(start_paused = true)]
async fn test_stop_before_run_never_touches_the_table() {
    let api = ScriptedApi::observing(vec![Ok(waiting())]);
    let (mut agent, log) = agent_with(&api, config(), checker());

    agent.stop();
    agent.run().await.unwrap();

    assert!(api.calls().is_empty());
    assert_eq!(events(&log), vec!["disconnected"]);
}

#[tokio::test(start_paused = true)]
async fn test_stop_wakes_the_pause_between_polls() {
    let api = ScriptedApi::default();
    let config = AgentConfig {
        poll_interval: Duration::from_secs(60),
        rate_limit_backoff: Duration::from_secs(120),
        ..config()
    };
    // Keep the table busy forever; only the stop handle ends this run.
    api.script.lock().unwrap().observations =
        std::iter::repeat_with(|| Ok(waiting())).take(1000).collect();
    let (mut agent, log) = agent_with(&api, config, checker());
    let stop = agent.stop_handle();
    let start = Instant::now();

    let stopper = async {
        tokio::time::sleep(Duration::from_secs(1)).await;
        stop.stop();
    };
    let (result, ()) = tokio::join!(agent.run(), stopper);

    result.unwrap();
    assert_eq!(start.elapsed(), Duration::from_secs(1));
    assert_eq!(api.observed_at().len(), 1);
    assert!(stop.is_stopped());
    assert_eq!(count(&log, "disconnected"), 1);
}

// =========================================================================
// Transitions
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_hand_boundaries_and_phases_in_order() {
    let api = ScriptedApi::observing(vec![
        Ok(hand("h1", Phase::Preflop)),
        Ok(hand("h1", Phase::Flop)),
        Ok(hand("h2", Phase::Preflop)),
    ]);
    let (mut agent, log) = agent_with(&api, config(), checker());

    agent.run().await.unwrap();

    assert_eq!(
        events(&log),
        vec![
            "connected:main",
            "hand_started:h1",
            "phase:preflop->flop",
            "hand_ended:h1",
            "hand_started:h2",
            "phase:flop->preflop",
            "disconnected",
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_identical_snapshots_fire_nothing_new() {
    let api = ScriptedApi::observing(vec![
        Ok(hand("h1", Phase::Turn)),
        Ok(hand("h1", Phase::Turn)),
        Ok(hand("h1", Phase::Turn)),
    ]);
    let (mut agent, log) = agent_with(&api, config(), checker());

    agent.run().await.unwrap();

    assert_eq!(
        events(&log),
        vec!["connected:main", "hand_started:h1", "disconnected"]
    );
    assert!(api.acts().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_bust_repeats_every_poll() {
    let busted = Snapshot {
        own_stack: 0,
        ..waiting()
    };
    let api = ScriptedApi::observing(vec![Ok(busted.clone()), Ok(busted)]);
    let (mut agent, log) = agent_with(&api, config(), checker());

    agent.run().await.unwrap();

    // Two scripted polls plus the quiet repeat of the last one.
    assert_eq!(count(&log, "bust:0"), 3);
}

// =========================================================================
// Action pipeline
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_turn_submits_decision_then_chat() {
    let api = ScriptedApi::observing(vec![Ok(my_turn(&[
        ActionKind::Fold,
        ActionKind::Call,
        ActionKind::Raise,
    ]))]);
    let strategy = strategy_fn(|_: &Snapshot| {
        Decision::raise(80)
            .with_chat("I like my cards.")
            .with_reasoning("strong ace")
    });
    let (mut agent, log) = agent_with(&api, config(), strategy);

    agent.run().await.unwrap();

    let calls = api.calls();
    let act = calls.iter().position(|c| *c == Call::Act(ActionKind::Raise, Some(80)));
    let chat = calls.iter().position(|c| *c == Call::Chat("I like my cards.".into()));
    assert!(act.is_some() && chat.is_some());
    assert!(act < chat, "chat must follow the action");

    let events = events(&log);
    let turn = events.iter().position(|e| e == "your_turn").unwrap();
    let action = events.iter().position(|e| e == "action:raise").unwrap();
    assert!(turn < action);
}

#[tokio::test(start_paused = true)]
async fn test_amount_only_sent_for_raise() {
    let api = ScriptedApi::observing(vec![Ok(my_turn(&[ActionKind::Fold, ActionKind::Call]))]);
    let strategy = strategy_fn(|_: &Snapshot| Decision {
        amount: Some(500),
        ..Decision::call()
    });
    let (mut agent, _log) = agent_with(&api, config(), strategy);

    agent.run().await.unwrap();

    assert_eq!(api.acts(), vec![Call::Act(ActionKind::Call, None)]);
}

#[tokio::test(start_paused = true)]
async fn test_unavailable_action_folds() {
    let api = ScriptedApi::observing(vec![Ok(my_turn(&[ActionKind::Fold, ActionKind::Call]))]);
    let strategy = strategy_fn(|_: &Snapshot| Decision::raise(10).with_chat("watch this"));
    let (mut agent, log) = agent_with(&api, config(), strategy);

    agent.run().await.unwrap();

    assert_eq!(api.acts(), vec![Call::Act(ActionKind::Fold, None)]);
    assert!(!api.calls().iter().any(|c| matches!(c, Call::Chat(_))));
    assert_eq!(count(&log, "action:raise"), 0);
}

#[tokio::test(start_paused = true)]
async fn test_unavailable_action_without_fold_submits_nothing() {
    let api = ScriptedApi::observing(vec![Ok(my_turn(&[ActionKind::Check, ActionKind::Call]))]);
    let strategy = strategy_fn(|_: &Snapshot| Decision::raise(40));
    let (mut agent, log) = agent_with(&api, config(), strategy);

    agent.run().await.unwrap();

    assert!(api.acts().is_empty());
    assert_eq!(count(&log, "action:raise"), 0);
    assert_eq!(agent.state(), LoopState::Stopped);
}

#[tokio::test(start_paused = true)]
async fn test_raise_without_amount_folds() {
    let api = ScriptedApi::observing(vec![Ok(my_turn(&[ActionKind::Fold, ActionKind::Raise]))]);
    let strategy = strategy_fn(|_: &Snapshot| Decision::new(ActionKind::Raise));
    let (mut agent, _log) = agent_with(&api, config(), strategy);

    agent.run().await.unwrap();

    assert_eq!(api.acts(), vec![Call::Act(ActionKind::Fold, None)]);
}

#[tokio::test(start_paused = true)]
async fn test_strategy_error_checks_when_possible() {
    let api = ScriptedApi::observing(vec![Ok(my_turn(&[
        ActionKind::Fold,
        ActionKind::Check,
        ActionKind::Raise,
    ]))]);
    let strategy = try_strategy_fn(|_: &Snapshot| Err("model unavailable".into()));
    let (mut agent, log) = agent_with(&api, config(), strategy);

    agent.run().await.unwrap();

    assert_eq!(api.acts(), vec![Call::Act(ActionKind::Check, None)]);
    assert_eq!(count(&log, "error"), 1);
    assert!(!events(&log).iter().any(|e| e.starts_with("action:")));
}

#[tokio::test(start_paused = true)]
async fn test_strategy_error_folds_when_check_unavailable() {
    let api = ScriptedApi::observing(vec![Ok(my_turn(&[ActionKind::Fold, ActionKind::Call]))]);
    let strategy = try_strategy_fn(|_: &Snapshot| Err("bad json".into()));
    let (mut agent, _log) = agent_with(&api, config(), strategy);

    agent.run().await.unwrap();

    assert_eq!(api.acts(), vec![Call::Act(ActionKind::Fold, None)]);
}

#[tokio::test(start_paused = true)]
async fn test_strategy_panic_is_contained() {
    let api = ScriptedApi::observing(vec![
        Ok(my_turn(&[ActionKind::Fold, ActionKind::Check])),
        Ok(hand("h1", Phase::Flop)),
    ]);
    let strategy = strategy_fn(|_: &Snapshot| -> Decision { panic!("index out of bounds") });
    let (mut agent, log) = agent_with(&api, config(), strategy);

    agent.run().await.expect("a panicking strategy must not end the loop");

    assert_eq!(api.acts(), vec![Call::Act(ActionKind::Check, None)]);
    assert_eq!(count(&log, "error"), 1);
    assert_eq!(count(&log, "phase:preflop->flop"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_refused_submission_falls_back_to_fold_once() {
    let api = ScriptedApi::observing(vec![Ok(my_turn(&[ActionKind::Fold, ActionKind::Call]))])
        .with_acts(vec![
            Err(TransportError::status(400, "Not your turn")),
            Err(TransportError::status(400, "Not your turn")),
        ]);
    let (mut agent, log) = agent_with(&api, config(), strategy_fn(|_: &Snapshot| Decision::call()));

    agent.run().await.unwrap();

    assert_eq!(
        api.acts(),
        vec![
            Call::Act(ActionKind::Call, None),
            Call::Act(ActionKind::Fold, None),
        ]
    );
    assert_eq!(count(&log, "error"), 1);
    assert_eq!(count(&log, "action:call"), 0);
}

#[tokio::test(start_paused = true)]
async fn test_chat_failure_is_swallowed() {
    let api = ScriptedApi::observing(vec![Ok(my_turn(&[ActionKind::Fold, ActionKind::Call]))])
        .failing_chat();
    let strategy = strategy_fn(|_: &Snapshot| Decision::call().with_chat("gl"));
    let (mut agent, log) = agent_with(&api, config(), strategy);

    agent.run().await.unwrap();

    assert_eq!(count(&log, "action:call"), 1);
    assert_eq!(count(&log, "error"), 0);
    assert_eq!(api.acts(), vec![Call::Act(ActionKind::Call, None)]);
}

#[tokio::test(start_paused = true)]
async fn test_long_chat_is_truncated() {
    let api = ScriptedApi::observing(vec![Ok(my_turn(&[ActionKind::Fold, ActionKind::Call]))]);
    let strategy = strategy_fn(|_: &Snapshot| Decision::call().with_chat("é".repeat(400)));
    let (mut agent, _log) = agent_with(&api, config(), strategy);

    agent.run().await.unwrap();

    let chat = api
        .calls()
        .into_iter()
        .find_map(|c| match c {
            Call::Chat(text) => Some(text),
            _ => None,
        })
        .expect("chat should be sent");
    assert_eq!(chat.chars().count(), 280);
}

#[tokio::test(start_paused = true)]
async fn test_observer_panic_does_not_break_the_turn() {
    let api = ScriptedApi::observing(vec![Ok(my_turn(&[ActionKind::Fold, ActionKind::Check]))]);
    let (mut agent, log) = agent_with(&api, config(), checker());
    agent
        .observers_mut()
        .on(EventKind::YourTurn, |_| panic!("observer bug"));

    agent.run().await.unwrap();

    assert_eq!(api.acts(), vec![Call::Act(ActionKind::Check, None)]);
    assert_eq!(count(&log, "action:check"), 1);
}

// =========================================================================
// Recovery
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_rate_limit_waits_for_backoff() {
    let api = ScriptedApi::observing(vec![
        Err(TransportError::status(429, "Rate limit exceeded")),
        Ok(waiting()),
    ]);
    let (mut agent, log) = agent_with(&api, config(), checker());

    agent.run().await.unwrap();

    let at = api.observed_at();
    assert!(at[1] - at[0] >= Duration::from_secs(5));
    assert_eq!(at[2] - at[1], Duration::from_secs(2));
    assert_eq!(count(&log, "error"), 0);
    assert_eq!(agent.metrics().total_backoffs, 1);
}

#[tokio::test(start_paused = true)]
async fn test_session_lost_rejoins() {
    let api = ScriptedApi::observing(vec![
        Ok(waiting()),
        Err(TransportError::status(400, "Not at a table")),
        Ok(waiting()),
    ]);
    let (mut agent, log) = agent_with(&api, config(), checker());

    agent.run().await.unwrap();

    let joins = api
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::Join(_)))
        .count();
    assert_eq!(joins, 2);
    assert_eq!(count(&log, "connected:main"), 2);
    assert_eq!(count(&log, "error"), 0);
}

#[tokio::test(start_paused = true)]
async fn test_failed_rejoin_is_reported_not_fatal() {
    let api = ScriptedApi::observing(vec![
        Err(TransportError::status(400, "Not at a table")),
        Ok(waiting()),
    ])
    .with_joins(vec![ack(), Err(TransportError::status(503, "Table full"))]);
    let (mut agent, log) = agent_with(&api, config(), checker());

    agent.run().await.unwrap();

    assert_eq!(count(&log, "error"), 1);
    assert_eq!(count(&log, "connected:main"), 1);
    assert!(agent.metrics().total_polls >= 3);
}

#[tokio::test(start_paused = true)]
async fn test_session_lost_without_auto_rejoin_is_reported() {
    let api = ScriptedApi::observing(vec![Err(TransportError::status(400, "Not at a table"))]);
    let config = AgentConfig {
        auto_rejoin: false,
        ..config()
    };
    let (mut agent, log) = agent_with(&api, config, checker());

    agent.run().await.unwrap();

    assert_eq!(count(&log, "error"), 1);
    assert_eq!(count(&log, "connected:main"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_network_errors_keep_the_loop_going() {
    let api = ScriptedApi::observing(vec![
        Err(TransportError::TimedOut),
        Err(TransportError::Network("connection refused".into())),
        Ok(hand("h1", Phase::Preflop)),
    ]);
    let (mut agent, log) = agent_with(&api, config(), checker());

    agent.run().await.unwrap();

    assert_eq!(count(&log, "error"), 2);
    assert_eq!(count(&log, "hand_started:h1"), 1);

    let at = api.observed_at();
    assert_eq!(at[1] - at[0], Duration::from_secs(2));
}

// =========================================================================
// Builder
// =========================================================================

#[tokio::test]
async fn test_connect_without_key_or_registration_fails() {
    let result = Agent::builder().strategy(checker()).connect().await;
    assert!(matches!(result, Err(AgentError::InvalidConfig(_))));
}

#[tokio::test]
async fn test_connect_with_key_builds_http_agent() {
    let agent = Agent::builder()
        .api_key("pk_test_abc")
        .client_config(ClientConfig::with_base_url("http://127.0.0.1:9/api/"))
        .config(AgentConfig::for_table("high-stakes"))
        .strategy(checker())
        .connect()
        .await
        .expect("no network needed to build");

    assert_eq!(agent.api().base_url(), "http://127.0.0.1:9/api");
    assert_eq!(agent.config().table_id, "high-stakes");
    assert_eq!(agent.state(), LoopState::Idle);
    assert!(agent.registration().is_none());
}

#[test]
fn test_builder_validates_config() {
    let agent = Agent::builder()
        .config(AgentConfig {
            poll_interval: Duration::from_millis(1),
            table_id: String::new(),
            ..Default::default()
        })
        .strategy(checker())
        .build_with(ScriptedApi::default());

    assert_eq!(agent.config().table_id, "main");
    assert_eq!(agent.config().poll_interval, AgentConfig::MIN_POLL_INTERVAL);
}
