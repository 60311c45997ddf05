//! State management errors.
//!
//! Raised while assembling a session (spawning units, placing them on tiles).
//! Once a session is running, the scheduler validates commands up front and
//! these errors are never produced.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{Position, UnitId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// Position is outside the grid.
    #[error("position {position} is out of bounds (grid size: {width}x{height})")]
    PositionOutOfBounds {
        position: Position,
        width: u32,
        height: u32,
    },

    /// Position is already held by another unit.
    #[error("position {position} is already occupied by unit {occupant}")]
    PositionOccupied {
        position: Position,
        occupant: UnitId,
    },

    /// Terrain or a placed object makes the tile impassable.
    #[error("position {position} is not walkable")]
    PositionBlocked { position: Position },

    /// No unit with this id exists in the roster.
    #[error("unit {0} not found")]
    UnknownUnit(UnitId),

    /// Roster cannot hand out another id.
    #[error("unit id overflow (roster size: {size})")]
    UnitIdOverflow { size: usize },
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        use StateError::*;
        match self {
            PositionOutOfBounds { .. } | PositionOccupied { .. } | PositionBlocked { .. } => {
                ErrorSeverity::Validation
            }
            UnknownUnit(_) => ErrorSeverity::Internal,
            UnitIdOverflow { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            PositionOutOfBounds { .. } => "STATE_POSITION_OUT_OF_BOUNDS",
            PositionOccupied { .. } => "STATE_POSITION_OCCUPIED",
            PositionBlocked { .. } => "STATE_POSITION_BLOCKED",
            UnknownUnit(_) => "STATE_UNKNOWN_UNIT",
            UnitIdOverflow { .. } => "STATE_UNIT_ID_OVERFLOW",
        }
    }
}
