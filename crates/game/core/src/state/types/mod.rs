//! Plain data types shared by the grid, combat and scheduling layers.
mod common;
mod tile;
mod unit;

pub use common::{Direction, Position, UnitId};
pub use tile::{CoverType, ObjectKind, Tile};
pub use unit::{Faction, UnitState, UnitStatus};
