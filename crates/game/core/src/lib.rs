//! Deterministic rules and data types for the squad-tactics simulation.
//!
//! `tactics-core` defines the board ([`grid`]), the units and session state
//! ([`state`]), and the combat math ([`combat`]) as pure APIs. Scheduling,
//! the opponent, events and logging live in `tactics-runtime`; this crate
//! performs no I/O so it can be reused by loaders, tools and tests alike.
pub mod combat;
pub mod config;
pub mod error;
pub mod grid;
pub mod rng;
pub mod state;

pub use combat::{
    ActionSet, AttackKind, AttackResult, HitBreakdown, available_actions, check_overwatch,
    execute_attack, execute_overwatch_shot, hit_chance, melee_targets, ranged_targets, set_hunker,
    set_overwatch, valid_targets,
};
pub use config::{AiTuning, CombatRules, GameConfig, MapBounds, UnitTemplate};
pub use error::{ErrorSeverity, GameError};
pub use grid::{CoverReport, Grid, ReachableTile, SightLine, trace_line};
pub use rng::{FixedRolls, PcgRng, RngOracle, RollSource, SeededRolls, compute_seed};
pub use state::{
    CoverType, Direction, Faction, ObjectKind, Position, SessionState, StateError, Tile, UnitId,
    UnitState, UnitStatus,
};
