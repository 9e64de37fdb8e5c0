//! Request bodies and the read-only records the game service returns
//! outside the polling path: profile, registration, leaderboard, history.

use serde::{Deserialize, Serialize};

use crate::{ActionKind, Card, ChatEntry};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Body of `POST /register`. Sent without a credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_model: Option<String>,
}

impl RegisterRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            llm_provider: None,
            llm_model: None,
        }
    }

    /// Records which model (if any) drives this agent. Shown on the
    /// leaderboard.
    pub fn with_model(
        mut self,
        provider: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        self.llm_provider = Some(provider.into());
        self.llm_model = Some(model.into());
        self
    }
}

/// Body of `POST /table/join`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub table_id: String,
}

/// Body of `POST /table/act`. `amount` is omitted from the JSON when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActRequest {
    pub action: ActionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
}

impl ActRequest {
    pub fn new(action: ActionKind, amount: Option<i64>) -> Self {
        Self { action, amount }
    }
}

/// Body of `POST /table/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Error body the server attaches to non-success responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Generic success reply for commands (join, leave, act, chat, rebuy,
/// sit-out, sit-in). The server adds command-specific fields; the ones
/// worth keeping are captured here, the rest are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Acknowledgement {
    pub ok: bool,
    pub message: Option<String>,
    /// Set by join: the table we ended up at.
    pub table_id: Option<String>,
    /// Set by rebuy: our stack after the reset.
    pub chips: Option<i64>,
}

impl Default for Acknowledgement {
    fn default() -> Self {
        Self {
            ok: true,
            message: None,
            table_id: None,
            chips: None,
        }
    }
}

/// Reply to `POST /register`.
///
/// `api_key` is shown exactly once. Persist it before doing anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    #[serde(default = "default_true")]
    pub ok: bool,
    #[serde(default)]
    pub agent_id: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_starting_chips")]
    pub chips: i64,
    #[serde(default)]
    pub message: String,
}

/// Reply to `GET /me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub chips: i64,
    #[serde(default)]
    pub hands_played: u64,
    #[serde(default)]
    pub hands_won: u64,
    #[serde(default)]
    pub current_table: Option<String>,
    #[serde(default)]
    pub rebuys: u32,
    #[serde(default = "default_rebuys_left")]
    pub rebuys_left: u32,
}

/// One row of `GET /leaderboard`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub id: String,
    pub name: String,
    pub chips: i64,
    #[serde(default)]
    pub hands_played: u64,
    #[serde(default)]
    pub hands_won: u64,
    #[serde(default = "default_win_rate")]
    pub win_rate: String,
    #[serde(default)]
    pub llm_provider: Option<String>,
    #[serde(default)]
    pub llm_model: Option<String>,
}

/// Envelope of `GET /leaderboard`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaderboardPage {
    #[serde(default)]
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// An action recorded in hand history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
    #[serde(default)]
    pub agent_id: String,
    pub action: ActionKind,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub timestamp: u64,
}

/// A completed hand from `GET /table/history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HandRecord {
    pub hand_id: String,
    pub table_id: String,
    /// Per-seat summaries. The shape varies by server version, so it is
    /// kept as raw JSON.
    pub players: Vec<serde_json::Value>,
    pub community_cards: Vec<Card>,
    pub actions: Vec<ActionRecord>,
    pub chat: Vec<ChatEntry>,
    pub pot: i64,
    pub winner_id: Option<String>,
    pub winner_name: Option<String>,
    pub winning_hand: Option<String>,
    pub started_at: u64,
    pub ended_at: u64,
}

impl Default for HandRecord {
    fn default() -> Self {
        Self {
            hand_id: String::new(),
            table_id: String::new(),
            players: Vec::new(),
            community_cards: Vec::new(),
            actions: Vec::new(),
            chat: Vec::new(),
            pot: 0,
            winner_id: None,
            winner_name: None,
            winning_hand: None,
            started_at: 0,
            ended_at: 0,
        }
    }
}

/// Envelope of `GET /table/history`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryPage {
    #[serde(default)]
    pub hands: Vec<HandRecord>,
}

fn default_true() -> bool {
    true
}

fn default_starting_chips() -> i64 {
    1000
}

fn default_rebuys_left() -> u32 {
    3
}

fn default_win_rate() -> String {
    "0%".to_string()
}
