//! Command vocabulary accepted by the scheduler.
//!
//! Every input (a human clicking, the opponent deciding, a scripted test)
//! enters through [`Command`]. Whether a command is accepted depends only on
//! the current [`GamePhase`](super::GamePhase); illegal commands are ignored
//! and reported back as [`CommandOutcome::Ignored`], never as errors.

use serde::{Deserialize, Serialize};
use tactics_core::{ActionSet, AttackKind, Position, UnitId};

use super::GamePhase;

/// External input to a running session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    SelectUnit(UnitId),
    RequestMove(Position),
    RequestAction(ActionKind),
    RequestTarget(Position),
    HoverTile(Position),
    Cancel,
}

/// Entries of the action menu.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActionKind {
    Shoot,
    Melee,
    Overwatch,
    Hunker,
    EndTurn,
}

impl ActionKind {
    /// The availability flag that gates this entry.
    pub fn required(self) -> ActionSet {
        match self {
            ActionKind::Shoot => ActionSet::RANGED,
            ActionKind::Melee => ActionSet::MELEE,
            ActionKind::Overwatch => ActionSet::OVERWATCH,
            ActionKind::Hunker => ActionSet::HUNKER,
            ActionKind::EndTurn => ActionSet::END,
        }
    }

    pub fn attack_kind(self) -> Option<AttackKind> {
        match self {
            ActionKind::Shoot => Some(AttackKind::Ranged),
            ActionKind::Melee => Some(AttackKind::Melee),
            _ => None,
        }
    }
}

/// Whether the scheduler acted on a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandOutcome {
    Accepted,
    Ignored(IgnoreReason),
}

impl CommandOutcome {
    pub fn is_accepted(self) -> bool {
        matches!(self, CommandOutcome::Accepted)
    }
}

/// Why a command was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IgnoreReason {
    /// The command is not accepted in this phase.
    WrongPhase(GamePhase),
    /// The unit is not the one whose activation is in progress.
    NotActiveUnit,
    /// The tile is outside the movement range shown.
    Unreachable,
    /// Reachable in range, but no route was found; the range is shown again.
    NoPath,
    /// The action is not on the unit's current menu.
    ActionUnavailable,
    /// No valid target stands on the tile.
    InvalidTarget,
    /// Hovering over a tile with nothing to preview.
    NothingToPreview,
}
