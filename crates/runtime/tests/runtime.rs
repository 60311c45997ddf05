//! Session worker, handle and bootstrap exercised end to end.

use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use tactics_content::{ConfigLoader, MapLoader};
use tactics_core::{Faction, GameConfig, Grid, Position, SessionState, UnitId, UnitTemplate};
use tactics_runtime::{
    ActionKind, Command, CommandOutcome, Controller, FixedDelay, GameEvent, GamePhase, IgnoreReason,
    Progress, Runtime, RuntimeConfig, RuntimeError, SessionBuilder, Topic, TurnScheduler,
};
use tokio::sync::broadcast::error::TryRecvError;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

fn open_board() -> SessionState {
    let mut state = SessionState::new(Grid::new(16, 10));
    let template = UnitTemplate::default();
    for row in 2..6 {
        state
            .spawn_unit(Faction::Player, Position::new(1, row), &template)
            .unwrap();
    }
    for row in 4..8 {
        state
            .spawn_unit(Faction::Enemy, Position::new(14, row), &template)
            .unwrap();
    }
    state
}

fn wide_buffers(max_turns: u32) -> RuntimeConfig {
    RuntimeConfig {
        event_buffer_size: 1 << 16,
        max_turns: Some(max_turns),
        ..RuntimeConfig::default()
    }
}

#[tokio::test]
async fn paced_skirmish_publishes_every_event_in_order() {
    let scheduler = TurnScheduler::new(open_board(), GameConfig::default(), 11);
    let step = Duration::from_millis(1);
    let attack = Duration::from_millis(2);
    let runtime = Runtime::builder()
        .scheduler(scheduler)
        .config(wide_buffers(200))
        .pacer(FixedDelay::new(step, attack))
        .build()
        .unwrap();
    let mut events = runtime.subscribe_events();

    let started = Instant::now();
    let progress = runtime.run().await.unwrap();
    let elapsed = started.elapsed();
    assert!(matches!(progress, Progress::Finished(_)), "{progress:?}");

    let mut log = Vec::new();
    loop {
        match events.try_recv() {
            Ok(event) => log.push(event),
            Err(TryRecvError::Empty) => break,
            Err(err) => panic!("event stream broken: {err}"),
        }
    }

    assert_eq!(
        log.first(),
        Some(&GameEvent::PhaseChanged {
            from: GamePhase::Loading,
            to: GamePhase::TurnTransition,
        })
    );
    assert!(matches!(log.get(1), Some(GameEvent::TurnStarted { turn: 1, .. })));
    let Progress::Finished(outcome) = progress else {
        unreachable!()
    };
    assert_eq!(log.last(), Some(&GameEvent::GameOver { outcome }));

    let steps = log
        .iter()
        .filter(|event| matches!(event, GameEvent::UnitMoveStep { .. }))
        .count() as u32;
    let attacks = log
        .iter()
        .filter(|event| matches!(event, GameEvent::CombatComplete { .. }))
        .count() as u32;
    assert!(attacks > 0);
    assert!(elapsed >= step * steps + attack * attacks);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn turn_cap_freezes_the_session() {
    let scheduler = TurnScheduler::new(open_board(), GameConfig::default(), 3);
    let runtime = Runtime::builder()
        .scheduler(scheduler)
        .config(wide_buffers(1))
        .build()
        .unwrap();
    let handle = runtime.handle();

    assert_eq!(runtime.run().await.unwrap(), Progress::TurnLimit { turn: 2 });
    assert_eq!(handle.advance().await.unwrap(), Progress::TurnLimit { turn: 2 });

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.turn, 2);
    assert_eq!(snapshot.outcome, None);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn human_commands_travel_through_the_handle() {
    let mut state = SessionState::new(Grid::new(16, 10));
    let template = UnitTemplate::default();
    state
        .spawn_unit(Faction::Player, Position::new(0, 0), &template)
        .unwrap();
    state
        .spawn_unit(Faction::Enemy, Position::new(15, 9), &template)
        .unwrap();
    let scheduler = TurnScheduler::new(state, GameConfig::default(), 5)
        .with_controller(Faction::Player, Controller::Human);

    let runtime = Runtime::builder().scheduler(scheduler).build().unwrap();
    let handle = runtime.handle();
    let mut interaction = handle.subscribe(Topic::Interaction);

    assert_eq!(handle.start().await.unwrap(), Progress::AwaitingPlayer);
    assert_eq!(
        handle
            .submit(Command::RequestMove(Position::new(1, 1)))
            .await
            .unwrap(),
        CommandOutcome::Ignored(IgnoreReason::WrongPhase(GamePhase::PlayerSelectUnit))
    );
    assert!(
        handle
            .submit(Command::SelectUnit(UnitId(0)))
            .await
            .unwrap()
            .is_accepted()
    );
    assert_eq!(
        interaction.recv().await.unwrap(),
        GameEvent::UnitSelected { unit: UnitId(0) }
    );

    assert!(
        handle
            .submit(Command::RequestAction(ActionKind::EndTurn))
            .await
            .unwrap()
            .is_accepted()
    );
    assert_eq!(handle.advance().await.unwrap(), Progress::Advanced);
    assert_eq!(handle.advance().await.unwrap(), Progress::AwaitingPlayer);

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.turn, 2);
    assert_eq!(snapshot.phase, GamePhase::PlayerSelectUnit);
    assert_eq!(snapshot.active_unit, Some(UnitId(0)));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[test]
fn bundled_map_bootstraps_a_session() {
    let config = ConfigLoader::load(&data_dir().join("rules.toml")).unwrap();
    let map = MapLoader::load(&data_dir().join("maps/outpost.json"), &config.map_bounds).unwrap();

    let mut scheduler = SessionBuilder::new(config)
        .map(&map)
        .unwrap()
        .seed(5)
        .build()
        .unwrap();

    let units = scheduler.state().units();
    assert_eq!(units.len(), 8);
    assert_eq!(units[0].position, Position::new(0, 3));
    assert_eq!(units[3].position, Position::new(0, 5));
    assert_eq!(units[4].position, Position::new(13, 3));
    assert_eq!(units[4].faction, Faction::Enemy);

    scheduler.start();
    scheduler.run_until_blocked(3);
    assert!(scheduler.turn() > 3 || scheduler.outcome().is_some());
}

#[test]
fn undersized_spawn_zone_aborts_bootstrap() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "name": "cramped",
            "gridSize": [8, 8],
            "tileSize": 1.0,
            "spawnZones": {{
                "player": [[0, 0], [0, 1], [0, 2], [0, 3]],
                "enemy": [[7, 7]]
            }}
        }}"#
    )
    .unwrap();

    let config = GameConfig::default();
    let map = MapLoader::load(file.path(), &config.map_bounds).unwrap();
    let err = SessionBuilder::new(config)
        .map(&map)
        .unwrap()
        .build()
        .unwrap_err();

    assert!(matches!(
        err,
        RuntimeError::SpawnZoneTooSmall {
            faction: Faction::Enemy,
            available: 1,
            required: 4,
        }
    ));
}

#[test]
fn events_serialize_with_a_snake_case_tag() {
    let event = GameEvent::UnitSelected { unit: UnitId(2) };
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json, serde_json::json!({ "event": "unit_selected", "unit": 2 }));

    let decoded: GameEvent =
        serde_json::from_str(r#"{ "event": "turn_ended", "turn": 7 }"#).unwrap();
    assert_eq!(decoded, GameEvent::TurnEnded { turn: 7 });
}
