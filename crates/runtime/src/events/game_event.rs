//! Typed notifications emitted by the scheduler.
//!
//! Events are the only way observers learn about the session. They are
//! queued by the scheduler in emission order and fanned out by the
//! [`EventBus`](super::EventBus).

use serde::{Deserialize, Serialize};
use tactics_core::{
    ActionSet, AttackKind, AttackResult, Faction, HitBreakdown, Position, ReachableTile, UnitId,
    UnitStatus,
};

use crate::scheduler::{Controller, GamePhase, Outcome};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum GameEvent {
    // ----- turn flow -----
    PhaseChanged {
        from: GamePhase,
        to: GamePhase,
    },
    TurnStarted {
        turn: u32,
        order: Vec<UnitId>,
    },
    TurnEnded {
        turn: u32,
    },
    ActivationStarted {
        unit: UnitId,
        faction: Faction,
        controller: Controller,
    },
    GameOver {
        outcome: Outcome,
    },

    // ----- interaction -----
    UnitSelected {
        unit: UnitId,
    },
    UnitDeselected {
        unit: UnitId,
    },
    MovementRangeShown {
        unit: UnitId,
        tiles: Vec<ReachableTile>,
    },
    PathPreview {
        unit: UnitId,
        path: Vec<Position>,
    },
    ActionsOffered {
        unit: UnitId,
        actions: ActionSet,
    },
    TargetsOffered {
        unit: UnitId,
        kind: AttackKind,
        targets: Vec<UnitId>,
    },
    HitPreview {
        attacker: UnitId,
        target: UnitId,
        breakdown: HitBreakdown,
    },
    HighlightsCleared {
        unit: UnitId,
    },

    // ----- movement -----
    UnitMoveStep {
        unit: UnitId,
        from: Position,
        to: Position,
    },
    UnitMoveComplete {
        unit: UnitId,
        position: Position,
        /// True when reaction fire killed the mover before it arrived.
        interrupted: bool,
    },

    // ----- combat -----
    OverwatchFired {
        watcher: UnitId,
        target: UnitId,
    },
    CombatDamage {
        attacker: UnitId,
        target: UnitId,
        damage: u32,
        hp_left: u32,
    },
    CombatMiss {
        attacker: UnitId,
        target: UnitId,
        chance: f32,
        roll: f32,
    },
    CombatKill {
        attacker: UnitId,
        target: UnitId,
        position: Position,
    },
    CombatComplete {
        result: AttackResult,
    },

    // ----- unit state -----
    UnitDamaged {
        unit: UnitId,
        amount: u32,
        hp: u32,
    },
    UnitDied {
        unit: UnitId,
        position: Position,
    },
    UnitStatusChanged {
        unit: UnitId,
        status: UnitStatus,
    },
    UnitActivated {
        unit: UnitId,
    },
}

impl GameEvent {
    /// Short snake_case label, handy for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::PhaseChanged { .. } => "phase_changed",
            GameEvent::TurnStarted { .. } => "turn_started",
            GameEvent::TurnEnded { .. } => "turn_ended",
            GameEvent::ActivationStarted { .. } => "activation_started",
            GameEvent::GameOver { .. } => "game_over",
            GameEvent::UnitSelected { .. } => "unit_selected",
            GameEvent::UnitDeselected { .. } => "unit_deselected",
            GameEvent::MovementRangeShown { .. } => "movement_range_shown",
            GameEvent::PathPreview { .. } => "path_preview",
            GameEvent::ActionsOffered { .. } => "actions_offered",
            GameEvent::TargetsOffered { .. } => "targets_offered",
            GameEvent::HitPreview { .. } => "hit_preview",
            GameEvent::HighlightsCleared { .. } => "highlights_cleared",
            GameEvent::UnitMoveStep { .. } => "unit_move_step",
            GameEvent::UnitMoveComplete { .. } => "unit_move_complete",
            GameEvent::OverwatchFired { .. } => "overwatch_fired",
            GameEvent::CombatDamage { .. } => "combat_damage",
            GameEvent::CombatMiss { .. } => "combat_miss",
            GameEvent::CombatKill { .. } => "combat_kill",
            GameEvent::CombatComplete { .. } => "combat_complete",
            GameEvent::UnitDamaged { .. } => "unit_damaged",
            GameEvent::UnitDied { .. } => "unit_died",
            GameEvent::UnitStatusChanged { .. } => "unit_status_changed",
            GameEvent::UnitActivated { .. } => "unit_activated",
        }
    }
}
