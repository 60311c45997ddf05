//! Turn scheduler: the phase machine that drives a skirmish.
//!
//! [`TurnScheduler`] owns the authoritative [`SessionState`] and is the only
//! code that mutates it once a session is running. Everything that happens
//! is reported as a [`GameEvent`] pushed to an outbound queue, which callers
//! drain after each call (the async worker fans the queue out on the bus).
//!
//! The scheduler is synchronous. Reaction fire is a nested call inside
//! movement resolution, and an opponent activation runs to completion inside
//! a single [`TurnScheduler::tick`].
//!
//! # Flow
//!
//! - [`start`](TurnScheduler::start) opens turn 1 and hands out the first
//!   activation.
//! - Human activations advance through [`submit`](TurnScheduler::submit).
//! - Opponent activations advance through [`tick`](TurnScheduler::tick).
//! - Every activation ends in [`end_activation`](TurnScheduler::end_activation)
//!   followed by [`next_activation`](TurnScheduler::next_activation), which
//!   checks for a winner first and opens a new turn when the queue runs dry.

mod ai;
mod commands;
mod phase;
mod player;
mod queue;
mod resolve;

pub use commands::{ActionKind, Command, CommandOutcome, IgnoreReason};
pub use phase::{Controller, GamePhase, Outcome};
pub use queue::ActivationQueue;

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tactics_core::{
    AttackKind, Faction, GameConfig, ReachableTile, RollSource, SeededRolls, SessionState, UnitId,
    UnitStatus,
};
use tracing::{debug, info};

use crate::events::GameEvent;
use crate::providers::AiPlanner;

/// Transient bookkeeping for the activation in progress.
#[derive(Clone, Debug, Default)]
struct Activation {
    unit: UnitId,
    moved: bool,
    /// Movement range shown at selection time.
    range: Vec<ReachableTile>,
    /// Attack chosen from the action menu, with the targets offered for it.
    attack: Option<AttackKind>,
    targets: Vec<UnitId>,
}

impl Activation {
    fn new(unit: UnitId) -> Self {
        Self {
            unit,
            ..Self::default()
        }
    }

    fn clear_targeting(&mut self) {
        self.attack = None;
        self.targets.clear();
    }
}

/// Read-only copy of a session, handed to observers on request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub turn: u32,
    pub phase: GamePhase,
    pub active_unit: Option<UnitId>,
    pub outcome: Option<Outcome>,
    pub state: SessionState,
}

/// Phase machine and activation driver for one skirmish.
pub struct TurnScheduler {
    state: SessionState,
    config: GameConfig,
    rolls: Box<dyn RollSource + Send>,
    controllers: [Controller; GameConfig::FACTION_COUNT],
    planner: AiPlanner,

    phase: GamePhase,
    turn: u32,
    queue: ActivationQueue,
    active: Option<Activation>,
    outcome: Option<Outcome>,
    events: VecDeque<GameEvent>,
}

impl TurnScheduler {
    /// A scheduler in [`GamePhase::Loading`] with both factions under AI
    /// control. Hit rolls are drawn from `seed`.
    pub fn new(state: SessionState, config: GameConfig, seed: u64) -> Self {
        Self {
            state,
            config,
            rolls: Box::new(SeededRolls::new(seed)),
            controllers: [Controller::Ai; GameConfig::FACTION_COUNT],
            planner: AiPlanner::new(),
            phase: GamePhase::Loading,
            turn: 0,
            queue: ActivationQueue::default(),
            active: None,
            outcome: None,
            events: VecDeque::new(),
        }
    }

    pub fn with_controller(mut self, faction: Faction, controller: Controller) -> Self {
        self.controllers[faction_slot(faction)] = controller;
        self
    }

    /// Replaces the roll stream (scripted scenarios, tests).
    pub fn with_rolls(mut self, rolls: impl RollSource + Send + 'static) -> Self {
        self.rolls = Box::new(rolls);
        self
    }

    // ===== accessors =====

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn queue(&self) -> &ActivationQueue {
        &self.queue
    }

    pub fn active_unit(&self) -> Option<UnitId> {
        self.active.as_ref().map(|activation| activation.unit)
    }

    pub fn controller(&self, faction: Faction) -> Controller {
        self.controllers[faction_slot(faction)]
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            turn: self.turn,
            phase: self.phase,
            active_unit: self.active_unit(),
            outcome: self.outcome,
            state: self.state.clone(),
        }
    }

    /// Removes and returns every event emitted since the last drain, in
    /// emission order.
    pub fn drain_events(&mut self) -> std::collections::vec_deque::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    // ===== turn flow =====

    /// Leaves [`GamePhase::Loading`] and opens the first activation.
    /// Does nothing once started.
    pub fn start(&mut self) {
        if self.phase != GamePhase::Loading {
            return;
        }
        info!(
            units = self.state.units().len(),
            squad_size = self.config.squad_size,
            "skirmish starting"
        );
        self.start_turn();
        self.next_activation();
    }

    /// Runs queued opponent activations until a human must act, the game
    /// ends, or `turn_limit` is exceeded. Returns the number of activations
    /// run.
    pub fn run_until_blocked(&mut self, turn_limit: u32) -> usize {
        let mut activations = 0;
        while self.turn <= turn_limit && self.tick() {
            activations += 1;
        }
        activations
    }

    /// Opens a new turn: bumps the counter, refreshes every living unit and
    /// rebuilds the activation queue.
    pub fn start_turn(&mut self) {
        self.set_phase(GamePhase::TurnTransition);
        self.turn += 1;

        let refreshed: Vec<UnitId> = self
            .state
            .units()
            .iter()
            .filter(|unit| unit.is_alive())
            .map(|unit| unit.id)
            .collect();
        for id in refreshed {
            if let Some(unit) = self.state.unit_mut(id) {
                unit.refresh();
            }
        }

        self.queue = self.build_activation_queue();
        info!(turn = self.turn, queued = self.queue.order().len(), "turn started");
        self.emit(GameEvent::TurnStarted {
            turn: self.turn,
            order: self.queue.order().to_vec(),
        });
    }

    /// Interleaves the factions' living, unactivated units in roster order.
    ///
    /// The planner's preferred order for opponent squads is logged for
    /// diagnostics only; it never reorders the queue.
    pub fn build_activation_queue(&self) -> ActivationQueue {
        for faction in Faction::ALL {
            if self.controller(faction) == Controller::Ai {
                let preferred =
                    self.planner
                        .choose_activation_order(&self.state, &self.config, faction);
                debug!(%faction, ?preferred, "planner activation preference");
            }
        }
        ActivationQueue::build(&self.state)
    }

    /// Hands out the next activation.
    ///
    /// Checks for a winner first. When the queue is exhausted the turn ends
    /// and a new one starts. Human units wait in
    /// [`GamePhase::PlayerSelectUnit`]; opponent units wait in
    /// [`GamePhase::AiThinking`] for the next [`tick`](Self::tick).
    pub fn next_activation(&mut self) {
        loop {
            if self.is_over() {
                return;
            }
            if let Some(outcome) = self.check_win_condition() {
                self.finish(outcome);
                return;
            }
            match self.queue.next(&self.state) {
                Some(unit) => {
                    self.begin_activation(unit);
                    return;
                }
                None => {
                    self.emit(GameEvent::TurnEnded { turn: self.turn });
                    self.start_turn();
                }
            }
        }
    }

    /// Closes `unit`'s activation for this turn.
    ///
    /// Stances (overwatch, hunker) survive; any other living unit becomes
    /// [`UnitStatus::Activated`].
    pub fn end_activation(&mut self, unit: UnitId) {
        let Some(state) = self.state.unit_mut(unit) else {
            return;
        };
        state.activated = true;
        let faction = state.faction;
        let became_activated = state.is_alive() && !state.status.is_stance();
        if became_activated {
            state.status = UnitStatus::Activated;
        }

        if became_activated {
            self.emit(GameEvent::UnitStatusChanged {
                unit,
                status: UnitStatus::Activated,
            });
        }
        self.emit(GameEvent::UnitActivated { unit });
        if self.controller(faction) == Controller::Human {
            self.emit(GameEvent::UnitDeselected { unit });
        }
        if self.active_unit() == Some(unit) {
            self.active = None;
        }
        debug!(%unit, "activation ended");
    }

    /// `Some` once at most one faction has living units left.
    pub fn check_win_condition(&self) -> Option<Outcome> {
        let mut standing = Faction::ALL
            .into_iter()
            .filter(|&faction| self.state.living_count(faction) > 0);
        match (standing.next(), standing.next()) {
            (None, _) => Some(Outcome::Draw),
            (Some(faction), None) => Some(Outcome::Victory(faction)),
            (Some(_), Some(_)) => None,
        }
    }

    // ===== internals shared by the human and opponent paths =====

    fn begin_activation(&mut self, unit: UnitId) {
        let Some(faction) = self.state.unit(unit).map(|state| state.faction) else {
            return;
        };
        let controller = self.controller(faction);
        self.active = Some(Activation::new(unit));
        info!(turn = self.turn, %unit, %faction, %controller, "activation started");

        self.emit(GameEvent::ActivationStarted {
            unit,
            faction,
            controller,
        });
        self.set_phase(match controller {
            Controller::Human => GamePhase::PlayerSelectUnit,
            Controller::Ai => GamePhase::AiThinking,
        });
    }

    /// Ends the active unit's activation and moves on.
    fn close_activation(&mut self, unit: UnitId) {
        self.end_activation(unit);
        self.next_activation();
    }

    fn finish(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
        self.active = None;
        info!(turn = self.turn, %outcome, "skirmish over");
        self.set_phase(GamePhase::GameOver);
        self.emit(GameEvent::GameOver { outcome });
    }

    /// Finishes the game if the last resolution decided it. Returns true
    /// when it did.
    fn settle(&mut self) -> bool {
        match self.check_win_condition() {
            Some(outcome) => {
                self.finish(outcome);
                true
            }
            None => false,
        }
    }

    fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        self.emit(GameEvent::PhaseChanged { from, to });
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push_back(event);
    }
}

impl std::fmt::Debug for TurnScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnScheduler")
            .field("turn", &self.turn)
            .field("phase", &self.phase)
            .field("active_unit", &self.active_unit())
            .field("outcome", &self.outcome)
            .field("pending_events", &self.events.len())
            .finish_non_exhaustive()
    }
}

const fn faction_slot(faction: Faction) -> usize {
    match faction {
        Faction::Player => 0,
        Faction::Enemy => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::{Grid, Position, UnitTemplate};

    pub(super) fn skirmish(players: &[Position], enemies: &[Position]) -> SessionState {
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

    #[test]
    fn start_opens_turn_one_for_the_first_player_unit() {
        let state = skirmish(&[Position::new(0, 0)], &[Position::new(15, 9)]);
        let mut scheduler = TurnScheduler::new(state, GameConfig::default(), 1)
            .with_controller(Faction::Player, Controller::Human);
        scheduler.start();

        assert_eq!(scheduler.turn(), 1);
        assert_eq!(scheduler.phase(), GamePhase::PlayerSelectUnit);
        assert_eq!(scheduler.active_unit(), Some(UnitId(0)));

        let names: Vec<_> = scheduler.drain_events().map(|event| event.name()).collect();
        assert_eq!(
            names,
            [
                "phase_changed",
                "turn_started",
                "activation_started",
                "phase_changed"
            ]
        );
    }

    #[test]
    fn opponent_squads_interleave_in_roster_order() {
        let state = skirmish(
            &[Position::new(0, 0), Position::new(3, 5)],
            &[Position::new(15, 9), Position::new(8, 5)],
        );
        let config = GameConfig::default();
        let preferred = AiPlanner::new().choose_activation_order(&state, &config, Faction::Enemy);
        assert_eq!(preferred, vec![UnitId(3), UnitId(2)]);

        let scheduler = TurnScheduler::new(state, config, 0);
        assert_eq!(
            scheduler.build_activation_queue().order(),
            &[UnitId(0), UnitId(2), UnitId(1), UnitId(3)]
        );
    }

    #[test]
    fn win_detection_covers_both_sides_and_the_draw() {
        let mut state = skirmish(&[Position::new(0, 0)], &[Position::new(15, 9)]);
        assert_eq!(
            TurnScheduler::new(state.clone(), GameConfig::default(), 0).check_win_condition(),
            None
        );

        state.unit_mut(UnitId(1)).unwrap().take_damage(100);
        assert_eq!(
            TurnScheduler::new(state.clone(), GameConfig::default(), 0).check_win_condition(),
            Some(Outcome::Victory(Faction::Player))
        );

        state.unit_mut(UnitId(0)).unwrap().take_damage(100);
        assert_eq!(
            TurnScheduler::new(state, GameConfig::default(), 0).check_win_condition(),
            Some(Outcome::Draw)
        );
    }

    #[test]
    fn end_activation_keeps_stances() {
        let mut state = skirmish(
            &[Position::new(0, 0), Position::new(0, 2)],
            &[Position::new(15, 9)],
        );
        state.unit_mut(UnitId(1)).unwrap().status = UnitStatus::Hunkered;
        let mut scheduler = TurnScheduler::new(state, GameConfig::default(), 0);

        scheduler.end_activation(UnitId(0));
        scheduler.end_activation(UnitId(1));

        let units = scheduler.state().units();
        assert!(units[0].activated && units[1].activated);
        assert_eq!(units[0].status, UnitStatus::Activated);
        assert_eq!(units[1].status, UnitStatus::Hunkered);
    }

    #[test]
    fn exhausted_queue_rolls_into_the_next_turn() {
        let state = skirmish(&[Position::new(0, 0)], &[Position::new(15, 9)]);
        let mut scheduler = TurnScheduler::new(state, GameConfig::default(), 0)
            .with_controller(Faction::Player, Controller::Human)
            .with_controller(Faction::Enemy, Controller::Human);
        scheduler.start();

        scheduler.end_activation(UnitId(0));
        scheduler.next_activation();
        assert_eq!(scheduler.active_unit(), Some(UnitId(1)));

        scheduler.end_activation(UnitId(1));
        scheduler.next_activation();
        assert_eq!(scheduler.turn(), 2);
        assert_eq!(scheduler.active_unit(), Some(UnitId(0)));
        assert!(scheduler.state().units().iter().all(|unit| !unit.activated));
        assert!(
            scheduler
                .drain_events()
                .any(|event| event == GameEvent::TurnEnded { turn: 1 })
        );
    }
}
