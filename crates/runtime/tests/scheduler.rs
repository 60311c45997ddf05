//! Phase machine behaviour driven through the public command surface.

use tactics_core::{
    Direction, Faction, FixedRolls, GameConfig, Grid, Position, SessionState, UnitId, UnitState,
    UnitStatus, UnitTemplate,
};
use tactics_runtime::{
    ActionKind, Command, CommandOutcome, Controller, GameEvent, GamePhase, IgnoreReason, Outcome,
    TurnScheduler,
};

fn board(players: &[Position], enemies: &[Position]) -> SessionState {
    let mut state = SessionState::new(Grid::new(16, 10));
    let template = UnitTemplate::default();
    for &pos in players {
        state.spawn_unit(Faction::Player, pos, &template).unwrap();
    }
    for &pos in enemies {
        state.spawn_unit(Faction::Enemy, pos, &template).unwrap();
    }
    state
}

fn hotseat(state: SessionState) -> TurnScheduler {
    let mut scheduler = TurnScheduler::new(state, GameConfig::default(), 7)
        .with_controller(Faction::Player, Controller::Human)
        .with_controller(Faction::Enemy, Controller::Human)
        .with_rolls(FixedRolls::always_hit());
    scheduler.start();
    scheduler
}

fn accept(scheduler: &mut TurnScheduler, command: Command) {
    assert_eq!(
        scheduler.submit(command),
        CommandOutcome::Accepted,
        "{command:?} rejected in {}",
        scheduler.phase()
    );
}

fn end_activation_of(scheduler: &mut TurnScheduler, unit: UnitId) {
    accept(scheduler, Command::SelectUnit(unit));
    accept(scheduler, Command::RequestAction(ActionKind::EndTurn));
}

#[test]
fn five_a_side_activations_alternate() {
    let players: Vec<_> = (0..5).map(|row| Position::new(0, row)).collect();
    let enemies: Vec<_> = (0..5).map(|row| Position::new(15, row)).collect();
    let mut scheduler = hotseat(board(&players, &enemies));

    let expected: Vec<UnitId> = [0, 5, 1, 6, 2, 7, 3, 8, 4, 9].map(UnitId).to_vec();
    assert_eq!(scheduler.queue().order(), expected.as_slice());

    let mut factions = Vec::new();
    for &unit in &expected {
        assert_eq!(scheduler.active_unit(), Some(unit));
        factions.push(scheduler.state().unit(unit).unwrap().faction);
        end_activation_of(&mut scheduler, unit);
    }

    assert!(factions.windows(2).all(|pair| pair[0] != pair[1]));
    assert_eq!(scheduler.turn(), 2);
    assert_eq!(scheduler.active_unit(), Some(UnitId(0)));
}

#[test]
fn human_activation_walks_every_phase() {
    let mut scheduler = hotseat(board(&[Position::new(2, 5)], &[Position::new(9, 5)]));
    assert_eq!(scheduler.phase(), GamePhase::PlayerSelectUnit);

    // Out of order and wrong-unit commands change nothing.
    assert_eq!(
        scheduler.submit(Command::RequestMove(Position::new(3, 5))),
        CommandOutcome::Ignored(IgnoreReason::WrongPhase(GamePhase::PlayerSelectUnit))
    );
    assert_eq!(
        scheduler.submit(Command::SelectUnit(UnitId(1))),
        CommandOutcome::Ignored(IgnoreReason::NotActiveUnit)
    );

    accept(&mut scheduler, Command::SelectUnit(UnitId(0)));
    assert_eq!(scheduler.phase(), GamePhase::PlayerMovement);
    let shown = scheduler
        .drain_events()
        .find_map(|event| match event {
            GameEvent::MovementRangeShown { tiles, .. } => Some(tiles),
            _ => None,
        })
        .unwrap();
    assert!(shown.iter().all(|tile| tile.cost <= 5));

    assert_eq!(
        scheduler.submit(Command::RequestMove(Position::new(2, 5))),
        CommandOutcome::Ignored(IgnoreReason::Unreachable)
    );
    assert_eq!(
        scheduler.submit(Command::RequestMove(Position::new(15, 5))),
        CommandOutcome::Ignored(IgnoreReason::Unreachable)
    );

    accept(&mut scheduler, Command::HoverTile(Position::new(4, 5)));
    assert!(scheduler.drain_events().any(|event| matches!(
        event,
        GameEvent::PathPreview { path, .. } if path.last() == Some(&Position::new(4, 5))
    )));

    accept(&mut scheduler, Command::RequestMove(Position::new(4, 5)));
    assert_eq!(scheduler.phase(), GamePhase::PlayerAction);
    let mover = scheduler.state().unit(UnitId(0)).unwrap();
    assert_eq!(mover.position, Position::new(4, 5));
    assert_eq!(mover.ap, 1);
    assert_eq!(
        scheduler.submit(Command::RequestMove(Position::new(5, 5))),
        CommandOutcome::Ignored(IgnoreReason::WrongPhase(GamePhase::PlayerAction))
    );

    accept(&mut scheduler, Command::RequestAction(ActionKind::Shoot));
    assert_eq!(scheduler.phase(), GamePhase::PlayerTargetSelect);

    // The defender faces the board centre (west), so the shot is frontal.
    accept(&mut scheduler, Command::HoverTile(Position::new(9, 5)));
    let preview = scheduler
        .drain_events()
        .find_map(|event| match event {
            GameEvent::HitPreview { breakdown, .. } => Some(breakdown),
            _ => None,
        })
        .unwrap();
    assert!((preview.chance - 0.75).abs() < 1e-6);
    assert_eq!(
        scheduler.submit(Command::HoverTile(Position::new(8, 5))),
        CommandOutcome::Ignored(IgnoreReason::NothingToPreview)
    );

    accept(&mut scheduler, Command::Cancel);
    assert_eq!(scheduler.phase(), GamePhase::PlayerAction);
    accept(&mut scheduler, Command::Cancel);
    assert_eq!(scheduler.phase(), GamePhase::PlayerAction);

    accept(&mut scheduler, Command::RequestAction(ActionKind::Shoot));
    assert_eq!(
        scheduler.submit(Command::RequestTarget(Position::new(8, 5))),
        CommandOutcome::Ignored(IgnoreReason::InvalidTarget)
    );
    scheduler.drain_events().for_each(drop);

    accept(&mut scheduler, Command::RequestTarget(Position::new(9, 5)));
    let events: Vec<_> = scheduler.drain_events().collect();
    assert!(events.contains(&GameEvent::CombatDamage {
        attacker: UnitId(0),
        target: UnitId(1),
        damage: 3,
        hp_left: 7,
    }));
    assert!(events.contains(&GameEvent::UnitDeselected { unit: UnitId(0) }));

    // Out of AP: the enemy's activation is next.
    assert_eq!(scheduler.active_unit(), Some(UnitId(1)));
    assert_eq!(scheduler.phase(), GamePhase::PlayerSelectUnit);
    let shooter = scheduler.state().unit(UnitId(0)).unwrap();
    assert!(shooter.activated);
    assert_eq!(shooter.status, UnitStatus::Activated);
    assert_eq!(shooter.facing, Direction::East);
}

#[test]
fn actions_are_accepted_before_moving() {
    let mut scheduler = hotseat(board(&[Position::new(2, 5)], &[Position::new(14, 5)]));
    accept(&mut scheduler, Command::SelectUnit(UnitId(0)));

    assert_eq!(
        scheduler.submit(Command::RequestAction(ActionKind::Shoot)),
        CommandOutcome::Ignored(IgnoreReason::ActionUnavailable)
    );
    accept(&mut scheduler, Command::RequestAction(ActionKind::Hunker));

    let hunkered = scheduler.state().unit(UnitId(0)).unwrap();
    assert_eq!(hunkered.status, UnitStatus::Hunkered);
    assert_eq!(hunkered.ap, 1);
    assert!(hunkered.activated);
    assert_eq!(scheduler.active_unit(), Some(UnitId(1)));
}

/// Player 0 idles, the enemy watcher sets overwatch facing east, then player
/// 1 walks two tiles from `from` to `to`.
fn overwatch_run(from: Position, to: Position) -> TurnScheduler {
    let mut scheduler = hotseat(board(
        &[Position::new(15, 0), from],
        &[Position::new(3, 5)],
    ));
    end_activation_of(&mut scheduler, UnitId(0));

    accept(&mut scheduler, Command::SelectUnit(UnitId(2)));
    accept(&mut scheduler, Command::RequestAction(ActionKind::Overwatch));
    assert_eq!(
        scheduler.state().unit(UnitId(2)).unwrap().status,
        UnitStatus::Overwatch {
            cone: Direction::East
        }
    );
    scheduler.drain_events().for_each(drop);

    accept(&mut scheduler, Command::SelectUnit(UnitId(1)));
    accept(&mut scheduler, Command::RequestMove(to));
    scheduler
}

#[test]
fn overwatch_fires_on_moves_along_the_cone() {
    let mut scheduler = overwatch_run(Position::new(5, 8), Position::new(7, 8));
    let events: Vec<_> = scheduler.drain_events().collect();

    let fired: Vec<_> = events
        .iter()
        .filter(|event| matches!(event, GameEvent::OverwatchFired { .. }))
        .collect();
    assert_eq!(
        fired,
        [&GameEvent::OverwatchFired {
            watcher: UnitId(2),
            target: UnitId(1)
        }]
    );
    assert!(events.contains(&GameEvent::UnitMoveComplete {
        unit: UnitId(1),
        position: Position::new(7, 8),
        interrupted: false,
    }));

    let mover = scheduler.state().unit(UnitId(1)).unwrap();
    assert_eq!(mover.hp, 7);
    assert_eq!(mover.position, Position::new(7, 8));
    assert_eq!(
        scheduler.state().unit(UnitId(2)).unwrap().status,
        UnitStatus::Activated
    );
    assert_eq!(scheduler.phase(), GamePhase::PlayerAction);
}

#[test]
fn overwatch_ignores_moves_against_the_cone() {
    let mut scheduler = overwatch_run(Position::new(9, 8), Position::new(7, 8));

    assert!(
        !scheduler
            .drain_events()
            .any(|event| matches!(event, GameEvent::OverwatchFired { .. }))
    );
    assert_eq!(scheduler.state().unit(UnitId(1)).unwrap().hp, 10);
    assert!(
        scheduler
            .state()
            .unit(UnitId(2))
            .unwrap()
            .status
            .is_overwatch()
    );
}

#[test]
fn reaction_fire_kill_abandons_the_rest_of_the_path() {
    let mut state = board(&[Position::new(15, 0)], &[]);
    let mover = UnitState::new(
        UnitId(0),
        Faction::Player,
        Position::new(5, 8),
        &UnitTemplate::default(),
    )
    .with_hp(3);
    state.insert_unit(mover).unwrap();
    let template = UnitTemplate::default();
    state
        .spawn_unit(Faction::Enemy, Position::new(3, 5), &template)
        .unwrap();
    state
        .spawn_unit(Faction::Enemy, Position::new(15, 9), &template)
        .unwrap();
    let mut scheduler = hotseat(state);

    end_activation_of(&mut scheduler, UnitId(0));
    accept(&mut scheduler, Command::SelectUnit(UnitId(2)));
    accept(&mut scheduler, Command::RequestAction(ActionKind::Overwatch));
    scheduler.drain_events().for_each(drop);

    accept(&mut scheduler, Command::SelectUnit(UnitId(1)));
    accept(&mut scheduler, Command::RequestMove(Position::new(9, 8)));
    let events: Vec<_> = scheduler.drain_events().collect();

    let mover = scheduler.state().unit(UnitId(1)).unwrap();
    assert_eq!(mover.status, UnitStatus::Dead);
    assert_eq!(mover.position, Position::new(6, 8));
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(event, GameEvent::UnitMoveStep { .. }))
            .count(),
        1
    );

    let complete = events
        .iter()
        .position(|event| {
            *event
                == GameEvent::UnitMoveComplete {
                    unit: UnitId(1),
                    position: Position::new(6, 8),
                    interrupted: true,
                }
        })
        .expect("move completion reported");
    assert_eq!(
        events.get(complete + 1),
        Some(&GameEvent::UnitActivated { unit: UnitId(1) })
    );
    assert!(!events.iter().any(|event| matches!(
        event,
        GameEvent::PhaseChanged {
            to: GamePhase::PlayerAction,
            ..
        }
    )));

    assert_eq!(scheduler.phase(), GamePhase::PlayerSelectUnit);
    assert_eq!(scheduler.active_unit(), Some(UnitId(3)));
    assert_eq!(scheduler.outcome(), None);
}

#[test]
fn lethal_blow_frees_the_tile_and_ends_the_game() {
    let mut state = board(&[Position::new(4, 5)], &[]);
    let wounded = UnitState::new(
        UnitId(0),
        Faction::Enemy,
        Position::new(5, 5),
        &UnitTemplate::default(),
    )
    .with_hp(3);
    state.insert_unit(wounded).unwrap();
    let mut scheduler = hotseat(state);

    accept(&mut scheduler, Command::SelectUnit(UnitId(0)));
    accept(&mut scheduler, Command::RequestAction(ActionKind::Melee));
    accept(&mut scheduler, Command::RequestTarget(Position::new(5, 5)));

    let events: Vec<_> = scheduler.drain_events().collect();
    assert!(events.contains(&GameEvent::UnitDied {
        unit: UnitId(1),
        position: Position::new(5, 5),
    }));
    assert_eq!(
        events.last(),
        Some(&GameEvent::GameOver {
            outcome: Outcome::Victory(Faction::Player)
        })
    );

    assert_eq!(scheduler.state().grid.occupant(Position::new(5, 5)), None);
    assert_eq!(scheduler.phase(), GamePhase::GameOver);
    assert_eq!(scheduler.outcome(), Some(Outcome::Victory(Faction::Player)));
    assert_eq!(
        scheduler.submit(Command::Cancel),
        CommandOutcome::Ignored(IgnoreReason::WrongPhase(GamePhase::GameOver))
    );
}

#[test]
fn opponent_turns_run_on_tick() {
    let state = board(&[Position::new(0, 0)], &[Position::new(15, 9)]);
    let mut scheduler = TurnScheduler::new(state, GameConfig::default(), 3)
        .with_controller(Faction::Player, Controller::Human);
    scheduler.start();

    assert!(!scheduler.tick());
    end_activation_of(&mut scheduler, UnitId(0));
    assert_eq!(scheduler.phase(), GamePhase::AiThinking);

    assert!(scheduler.tick());
    let events: Vec<_> = scheduler.drain_events().collect();
    assert!(events.contains(&GameEvent::ActivationStarted {
        unit: UnitId(1),
        faction: Faction::Enemy,
        controller: Controller::Ai,
    }));
    // Out of reach: the opponent closes in, then settles into overwatch.
    assert!(
        events
            .iter()
            .any(|event| matches!(event, GameEvent::UnitMoveComplete { unit: UnitId(1), .. }))
    );
    assert!(events.iter().any(|event| matches!(
        event,
        GameEvent::UnitStatusChanged {
            unit: UnitId(1),
            status: UnitStatus::Overwatch { .. }
        }
    )));
    assert!(events.contains(&GameEvent::TurnEnded { turn: 1 }));
    assert_eq!(scheduler.turn(), 2);
    assert_eq!(scheduler.phase(), GamePhase::PlayerSelectUnit);
}

fn open_skirmish(seed: u64) -> TurnScheduler {
    let players: Vec<_> = (2..6).map(|row| Position::new(1, row)).collect();
    let enemies: Vec<_> = (4..8).map(|row| Position::new(14, row)).collect();
    TurnScheduler::new(board(&players, &enemies), GameConfig::default(), seed)
}

#[test]
fn ai_skirmish_reaches_a_verdict() {
    let mut scheduler = open_skirmish(42);
    scheduler.start();
    scheduler.run_until_blocked(200);

    let outcome = scheduler.outcome().expect("skirmish should finish");
    let standing = |faction| scheduler.state().living_count(faction);
    match outcome {
        Outcome::Victory(winner) => {
            assert!(standing(winner) > 0);
            assert_eq!(standing(winner.opponent()), 0);
        }
        Outcome::Draw => {
            assert_eq!(standing(Faction::Player) + standing(Faction::Enemy), 0);
        }
    }
    assert!(!scheduler.tick());
}

#[test]
fn same_seed_replays_the_same_skirmish() {
    let run = |seed| {
        let mut scheduler = open_skirmish(seed);
        scheduler.start();
        scheduler.run_until_blocked(200);
        scheduler.drain_events().collect::<Vec<_>>()
    };
    assert_eq!(run(9), run(9));
}
