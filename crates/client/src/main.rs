//! Headless skirmish binary.
//!
//! Composition root that loads a rule set and a map, bootstraps a session,
//! and plays it to a verdict (or the turn cap) while logging every event
//! through `tracing`.
//!
//! ```bash
//! TACTICS_SEED=7 TACTICS_PLAYER_CONTROL=scripted RUST_LOG=debug \
//!     cargo run -p tactics-client
//! ```
mod config;
mod logging;
mod script;

use anyhow::{Context, Result};
use config::{PlayerControl, SkirmishConfig};
use tactics_content::{ConfigLoader, MapLoader};
use tactics_core::Faction;
use tactics_runtime::{Controller, GameEvent, Progress, Runtime, SessionBuilder};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();

    let config = SkirmishConfig::from_env();
    let seed = config.seed.unwrap_or_else(rand::random);
    let session = format!("skirmish_{seed}");

    let _guard = logging::setup_logging(config.log_dir.as_deref(), &session)?;

    info!("Starting {session}");
    info!("Player control: {:?}", config.player_control);

    let rules = ConfigLoader::load(&config.rules_path)
        .with_context(|| format!("loading rules {}", config.rules_path.display()))?;
    let map = MapLoader::load(&config.map_path, &rules.map_bounds)
        .with_context(|| format!("loading map {}", config.map_path.display()))?;
    info!("Map '{}' ({}x{})", map.name, map.width(), map.height());

    let player = match config.player_control {
        PlayerControl::Ai => Controller::Ai,
        PlayerControl::Scripted => Controller::Human,
    };
    let scheduler = SessionBuilder::new(rules)
        .map(&map)?
        .seed(seed)
        .controller(Faction::Player, player)
        .build()?;

    let runtime = Runtime::builder()
        .scheduler(scheduler)
        .max_turns(config.max_turns)
        .build()?;
    let logger = tokio::spawn(log_events(runtime.subscribe_events()));

    let handle = runtime.handle();
    let progress = loop {
        match handle.advance().await? {
            Progress::Advanced => continue,
            Progress::AwaitingPlayer => script::play_activation(&handle).await?,
            terminal => break terminal,
        }
    };

    let snapshot = handle.snapshot().await?;
    drop(handle);
    runtime.shutdown().await?;
    logger.await?;

    match progress {
        Progress::Finished(outcome) => match outcome.winner() {
            Some(faction) => info!("{faction} wins on turn {}", snapshot.turn),
            None => info!("Draw on turn {}", snapshot.turn),
        },
        Progress::TurnLimit { turn } => info!("Turn cap reached at turn {turn}"),
        other => warn!("Session stopped early: {other:?}"),
    }
    for faction in Faction::ALL {
        info!(
            "{faction}: {} unit(s) standing",
            snapshot.state.living_count(faction)
        );
    }

    Ok(())
}

async fn log_events(mut events: broadcast::Receiver<GameEvent>) {
    loop {
        match events.recv().await {
            Ok(event) => log_event(&event),
            Err(RecvError::Lagged(skipped)) => warn!("Event log skipped {skipped} event(s)"),
            Err(RecvError::Closed) => break,
        }
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::TurnStarted { turn, order } => {
            info!("Turn {turn} begins ({} activations)", order.len());
        }
        GameEvent::CombatKill { .. } | GameEvent::UnitDied { .. } | GameEvent::GameOver { .. } => {
            info!(?event);
        }
        _ => debug!(?event),
    }
}
