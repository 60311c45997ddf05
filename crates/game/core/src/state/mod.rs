//! Authoritative session state.
//!
//! [`SessionState`] bundles the grid and the unit roster. It is owned by the
//! turn scheduler and lent by reference to the grid, combat and opponent
//! code; nothing in the crate keeps state anywhere else.
//!
//! Occupancy is written only through the helpers here, so a tile's
//! `occupant` and the unit's `position` always agree.

mod error;
pub mod types;

pub use error::StateError;
pub use types::{
    CoverType, Direction, Faction, ObjectKind, Position, Tile, UnitId, UnitState, UnitStatus,
};

use crate::config::UnitTemplate;
use crate::grid::Grid;

/// Grid plus every unit that has ever been spawned (dead ones included).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionState {
    pub grid: Grid,
    units: Vec<UnitState>,
}

impl SessionState {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            units: Vec::new(),
        }
    }

    /// Places a new unit on `position` and returns its id.
    ///
    /// The unit faces the centre of the board, or east when spawned on it.
    pub fn spawn_unit(
        &mut self,
        faction: Faction,
        position: Position,
        template: &UnitTemplate,
    ) -> Result<UnitId, StateError> {
        let tile = self
            .grid
            .tile(position)
            .ok_or(StateError::PositionOutOfBounds {
                position,
                width: self.grid.width(),
                height: self.grid.height(),
            })?;
        if let Some(occupant) = tile.occupant {
            return Err(StateError::PositionOccupied { position, occupant });
        }
        if !tile.walkable {
            return Err(StateError::PositionBlocked { position });
        }

        let id = u32::try_from(self.units.len())
            .map(UnitId)
            .map_err(|_| StateError::UnitIdOverflow {
                size: self.units.len(),
            })?;
        let facing = position
            .direction_to(self.grid.center())
            .unwrap_or(Direction::East);

        self.units
            .push(UnitState::new(id, faction, position, template).with_facing(facing));
        self.grid.set_occupant(position, Some(id));
        Ok(id)
    }

    /// Inserts a fully built unit, overriding its id with the next roster slot.
    /// Intended for scenario setup and tests.
    pub fn insert_unit(&mut self, mut unit: UnitState) -> Result<UnitId, StateError> {
        let position = unit.position;
        if !self.grid.contains(position) {
            return Err(StateError::PositionOutOfBounds {
                position,
                width: self.grid.width(),
                height: self.grid.height(),
            });
        }
        if let Some(occupant) = self.grid.occupant(position) {
            return Err(StateError::PositionOccupied { position, occupant });
        }
        let id = UnitId(self.units.len() as u32);
        unit.id = id;
        if unit.is_alive() {
            self.grid.set_occupant(position, Some(id));
        }
        self.units.push(unit);
        Ok(id)
    }

    pub fn unit(&self, id: UnitId) -> Option<&UnitState> {
        self.units.get(id.index())
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut UnitState> {
        self.units.get_mut(id.index())
    }

    pub fn units(&self) -> &[UnitState] {
        &self.units
    }

    /// Living unit standing on `position`.
    pub fn unit_at(&self, position: Position) -> Option<&UnitState> {
        self.grid
            .occupant(position)
            .and_then(|id| self.unit(id))
            .filter(|unit| unit.is_alive())
    }

    pub fn living(&self, faction: Faction) -> impl Iterator<Item = &UnitState> {
        self.units
            .iter()
            .filter(move |unit| unit.faction == faction && unit.is_alive())
    }

    pub fn living_count(&self, faction: Faction) -> usize {
        self.living(faction).count()
    }

    /// Living units hostile to `unit`, in roster order.
    pub fn living_enemies_of(&self, unit: &UnitState) -> impl Iterator<Item = &UnitState> {
        self.living(unit.faction.opponent())
    }

    /// Moves a unit one tile, keeping occupancy and facing in sync.
    ///
    /// Returns false when the unit is unknown or the destination is off the
    /// board. Path legality is the caller's responsibility.
    pub fn relocate(&mut self, id: UnitId, to: Position) -> bool {
        if !self.grid.contains(to) {
            return false;
        }
        let Some(unit) = self.units.get_mut(id.index()) else {
            return false;
        };
        let from = unit.position;
        if let Some(facing) = from.direction_to(to) {
            unit.facing = facing;
        }
        unit.position = to;

        if self.grid.occupant(from) == Some(id) {
            self.grid.set_occupant(from, None);
        }
        self.grid.set_occupant(to, Some(id));
        true
    }

    /// Frees the tile a unit stands on (used on death).
    pub fn vacate(&mut self, id: UnitId) {
        let Some(unit) = self.unit(id) else {
            return;
        };
        let position = unit.position;
        if self.grid.occupant(position) == Some(id) {
            self.grid.set_occupant(position, None);
        }
    }
}
