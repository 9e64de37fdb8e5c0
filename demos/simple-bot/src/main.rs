use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::Parser;
use tablebot::prelude::*;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Flags
// ---------------------------------------------------------------------------

/// A rule-based poker agent: checks when free, calls with pairs and
/// cheap high cards, folds the rest.
#[derive(Parser, Debug)]
#[command(name = "simple-bot")]
struct Args {
    /// API key. Registers a new agent when absent.
    #[arg(long, env = "AGENT_POKER_KEY")]
    api_key: Option<String>,

    /// Base URL of the game service.
    #[arg(long, env = "AGENT_POKER_URL")]
    base_url: Option<String>,

    /// Table to join.
    #[arg(long, env = "AGENT_POKER_TABLE", default_value = "main")]
    table: String,

    /// Pause between polls, in milliseconds.
    #[arg(long, default_value_t = 2000)]
    poll_interval_ms: u64,

    /// Name to register under when no API key is given.
    #[arg(long)]
    name: Option<String>,
}

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

fn rank(card: &str) -> Option<char> {
    card.chars().next()
}

fn simple_strategy(snapshot: &Snapshot) -> Decision {
    if snapshot.can(ActionKind::Check) {
        return Decision::check();
    }

    let cards = &snapshot.hole_cards;
    if cards.len() >= 2 && rank(&cards[0]).is_some() && rank(&cards[0]) == rank(&cards[1]) {
        return Decision::call().with_chat("I like my cards.");
    }

    let has_high = cards
        .iter()
        .filter_map(|c| rank(c))
        .any(|r| matches!(r, 'A' | 'K' | 'Q'));
    // to_call <= pot / 2, kept in integers.
    if has_high && snapshot.to_call() * 2 <= snapshot.pot {
        return Decision::call();
    }

    Decision::fold()
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

fn default_name() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    format!("SimpleBot_{}", secs % 100_000)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut client_config = ClientConfig::default();
    if let Some(url) = args.base_url {
        client_config.base_url = url;
    }

    let config = AgentConfig {
        table_id: args.table,
        poll_interval: Duration::from_millis(args.poll_interval_ms),
        ..Default::default()
    };

    let name = args.name.unwrap_or_else(default_name);
    let mut agent = Agent::builder()
        .api_key(args.api_key.unwrap_or_default())
        .register_as(RegisterRequest::new(name).with_model("none", "rule-based"))
        .client_config(client_config)
        .config(config)
        .on(EventKind::HandStarted, |event| {
            if let AgentEvent::HandStarted { hand_id, snapshot } = event {
                tracing::info!(%hand_id, cards = %snapshot.hole_cards.join(" "), "hand started");
            }
        })
        .on(EventKind::WentBust, |_| {
            tracing::warn!("out of chips, consider a rebuy");
        })
        .strategy(strategy_fn(simple_strategy))
        .connect()
        .await?;

    if let Some(registration) = agent.registration() {
        tracing::info!(agent_id = %registration.agent_id, "registered");
        eprintln!("save this: export AGENT_POKER_KEY={}", registration.api_key);
    }

    let stop = agent.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutting down");
            stop.stop();
        }
    });

    agent.run().await?;
    Ok(())
}
