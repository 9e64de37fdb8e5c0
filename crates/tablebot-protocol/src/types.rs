//! Core game-state types: the [`Snapshot`] the server returns on every
//! poll, and the [`Decision`] a strategy returns for one turn.
//!
//! Everything here is a plain value. A snapshot is produced fresh by each
//! observation, never mutated, and superseded by the next one; the runtime
//! diffs consecutive snapshots to reconstruct what happened in between.
//!
//! The server speaks camelCase JSON and omits fields freely, so almost
//! every field carries `#[serde(default)]`. A snapshot taken between hands
//! is mostly empty, and that must decode cleanly.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::ProtocolError;

/// A card as the server spells it: rank then suit, e.g. `"Ah"`, `"Ts"`, `"2c"`.
pub type Card = String;

/// Maximum chat length (in characters) the server accepts.
pub const MAX_CHAT_LEN: usize = 280;

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// The stage of the current hand.
///
/// `Waiting` doubles as "no hand in progress": the server reports it
/// between hands and while the table fills up.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Waiting,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    /// A stage this client does not know about.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Waiting => "waiting",
            Self::Preflop => "preflop",
            Self::Flop => "flop",
            Self::Turn => "turn",
            Self::River => "river",
            Self::Showdown => "showdown",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Something a player can do on their turn.
///
/// On the wire these are `fold`, `check`, `call`, `raise`, and `all_in`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
}

impl ActionKind {
    /// The wire spelling of this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fold => "fold",
            Self::Check => "check",
            Self::Call => "call",
            Self::Raise => "raise",
            Self::AllIn => "all_in",
        }
    }

    /// Parses a wire spelling. `None` for anything unrecognized.
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "fold" => Some(Self::Fold),
            "check" => Some(Self::Check),
            "call" => Some(Self::Call),
            "raise" => Some(Self::Raise),
            "all_in" => Some(Self::AllIn),
            _ => None,
        }
    }

    /// Whether this action carries a chip amount on the wire.
    pub fn takes_amount(&self) -> bool {
        matches!(self, Self::Raise)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An opponent's seat status as seen from our chair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    #[default]
    Active,
    Folded,
    AllIn,
    SittingOut,
    #[serde(other)]
    Unknown,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Another player at the table, as visible to everyone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opponent {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "chips", default)]
    pub stack: i64,
    #[serde(default)]
    pub status: PlayerStatus,
    #[serde(default)]
    pub bet: i64,
}

/// One line of table chat.
///
/// Chat comes from other players and is untrusted: strategies that feed
/// it to a model must treat it as table talk, not instructions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatEntry {
    #[serde(rename = "from")]
    pub sender_id: String,
    #[serde(rename = "fromName")]
    pub sender_name: String,
    pub text: String,
    pub timestamp: u64,
}

/// One immutable observation of the game from our seat
/// (`GET /table/state`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    /// Current hand identifier. Empty when no hand is in progress.
    pub hand_id: String,
    pub phase: Phase,
    /// Our hidden cards, 0–2 entries.
    #[serde(rename = "yourCards")]
    pub hole_cards: Vec<Card>,
    /// Shared board cards, 0–5 entries.
    #[serde(rename = "communityCards")]
    pub board: Vec<Card>,
    pub pot: i64,
    /// The bet level everyone must match this round.
    pub current_bet: i64,
    #[serde(rename = "yourChips")]
    pub own_stack: i64,
    /// What we have already put in this betting round.
    #[serde(rename = "yourBet")]
    pub own_bet: i64,
    pub is_your_turn: bool,
    /// Id of the player whose turn it is, if anyone's.
    pub turn: Option<String>,
    /// Time left for the acting player, in milliseconds.
    pub time_left_ms: u64,
    #[serde(rename = "players")]
    pub opponents: Vec<Opponent>,
    pub recent_chat: Vec<ChatEntry>,
    /// Legal actions for us right now. Empty unless it is our turn.
    /// Kinds this client does not recognize are dropped on decode, so
    /// they can never be chosen or submitted.
    #[serde(deserialize_with = "known_actions")]
    pub available_actions: Vec<ActionKind>,
}

fn known_actions<'de, D>(deserializer: D) -> Result<Vec<ActionKind>, D::Error>
where
    D: Deserializer<'de>,
{
    let names = Vec::<String>::deserialize(deserializer)?;
    Ok(names.iter().filter_map(|name| ActionKind::from_wire(name)).collect())
}

impl Snapshot {
    /// Returns `true` if `kind` is currently a legal action for us.
    pub fn can(&self, kind: ActionKind) -> bool {
        self.available_actions.contains(&kind)
    }

    /// Chips we need to add to stay in the hand. Never negative.
    pub fn to_call(&self) -> i64 {
        (self.current_bet - self.own_bet).max(0)
    }

    /// Returns `true` while a hand is in progress.
    pub fn in_hand(&self) -> bool {
        !self.hand_id.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// What a strategy wants to do this turn.
///
/// Built once per turn, consumed once by the action pipeline, discarded.
/// Also deserializable, so model-backed strategies can parse a JSON reply
/// of the form `{"action": "raise", "amount": 40, "chat": "...", "reasoning": "..."}`
/// straight into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub action: ActionKind,
    /// Chip amount. Only meaningful for [`ActionKind::Raise`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    /// Optional table talk, sent best-effort after the action lands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat: Option<String>,
    /// Diagnostic rationale. Logged, never transmitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl Decision {
    /// A decision for `action` with no amount, chat, or reasoning.
    pub fn new(action: ActionKind) -> Self {
        Self {
            action,
            amount: None,
            chat: None,
            reasoning: None,
        }
    }

    pub fn fold() -> Self {
        Self::new(ActionKind::Fold)
    }

    pub fn check() -> Self {
        Self::new(ActionKind::Check)
    }

    pub fn call() -> Self {
        Self::new(ActionKind::Call)
    }

    /// Raise to `amount`. Minimum-raise rules are enforced by the server.
    pub fn raise(amount: i64) -> Self {
        Self {
            amount: Some(amount),
            ..Self::new(ActionKind::Raise)
        }
    }

    pub fn all_in() -> Self {
        Self::new(ActionKind::AllIn)
    }

    /// Attaches table talk to this decision.
    pub fn with_chat(mut self, text: impl Into<String>) -> Self {
        self.chat = Some(text.into());
        self
    }

    /// Attaches a diagnostic rationale to this decision.
    pub fn with_reasoning(mut self, text: impl Into<String>) -> Self {
        self.reasoning = Some(text.into());
        self
    }

    /// The amount to put on the wire: the raise size for raises, `None`
    /// for everything else.
    pub fn wire_amount(&self) -> Option<i64> {
        if self.action.takes_amount() {
            self.amount
        } else {
            None
        }
    }

    /// Checks the decision is well-formed on its own terms.
    ///
    /// Legality against the table (is this action available right now?)
    /// is a separate question answered by the snapshot.
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidMessage`] for a raise without a
    /// positive amount.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.action == ActionKind::Raise {
            match self.amount {
                Some(amount) if amount > 0 => {}
                Some(amount) => {
                    return Err(ProtocolError::InvalidMessage(format!(
                        "raise amount must be positive, got {amount}"
                    )));
                }
                None => {
                    return Err(ProtocolError::InvalidMessage(
                        "raise requires an amount".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Cuts `text` down to at most [`MAX_CHAT_LEN`] characters, respecting
/// UTF-8 boundaries.
pub fn clamp_chat(text: &str) -> &str {
    match text.char_indices().nth(MAX_CHAT_LEN) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
