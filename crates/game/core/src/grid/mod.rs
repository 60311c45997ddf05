//! Authoritative spatial model.
//!
//! [`Grid`] owns every tile of a fixed `width × height` board together with
//! the occupancy table. The geometry queries the combat resolver and the
//! opponent depend on are split by concern:
//!
//! - [`pathfinding`]: reachable-tile flood fill and shortest paths
//! - [`sight`]: line tracing and line-of-sight
//! - [`cover`]: cover between two tiles, flanking, cover-adjacent tiles
//!
//! Every query tolerates out-of-bounds input and answers with a neutral
//! result (`None`, `false`, an empty set) instead of panicking.

pub mod cover;
pub mod pathfinding;
pub mod sight;

pub use cover::CoverReport;
pub use pathfinding::ReachableTile;
pub use sight::{SightLine, trace_line};

use crate::state::{CoverType, Direction, Faction, ObjectKind, Position, Tile, UnitId};

/// Fixed-size tile board stored in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Creates a board of open, walkable tiles.
    pub fn new(width: u32, height: u32) -> Self {
        let mut tiles = Vec::with_capacity(width as usize * height as usize);
        for row in 0..height as i32 {
            for col in 0..width as i32 {
                tiles.push(Tile::open(Position::new(col, row)));
            }
        }
        Self {
            width,
            height,
            tiles,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, position: Position) -> bool {
        position.col >= 0
            && position.row >= 0
            && position.col < self.width as i32
            && position.row < self.height as i32
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.row as usize * self.width as usize + position.col as usize)
    }

    /// Bounds-checked tile lookup.
    pub fn tile(&self, position: Position) -> Option<&Tile> {
        self.index(position).map(|index| &self.tiles[index])
    }

    fn tile_mut(&mut self, position: Position) -> Option<&mut Tile> {
        self.index(position).map(|index| &mut self.tiles[index])
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Centre of the board, rounded down.
    pub fn center(&self) -> Position {
        Position::new(self.width as i32 / 2, self.height as i32 / 2)
    }

    /// In bounds, passable and unoccupied.
    pub fn is_walkable(&self, position: Position) -> bool {
        self.tile(position)
            .is_some_and(|tile| tile.walkable && tile.occupant.is_none())
    }

    /// In bounds and passable, regardless of who stands there.
    pub fn is_walkable_ignoring_occupant(&self, position: Position) -> bool {
        self.tile(position).is_some_and(|tile| tile.walkable)
    }

    pub fn occupant(&self, position: Position) -> Option<UnitId> {
        self.tile(position).and_then(|tile| tile.occupant)
    }

    /// Places an object on a tile. Objects are impassable and grant `cover`.
    /// Returns false when the position is out of bounds.
    pub fn place_object(
        &mut self,
        position: Position,
        object: ObjectKind,
        cover: CoverType,
        cover_direction: Option<Direction>,
    ) -> bool {
        let Some(tile) = self.tile_mut(position) else {
            return false;
        };
        tile.walkable = false;
        tile.cover_type = cover;
        tile.cover_direction = cover_direction;
        tile.object = Some(object);
        true
    }

    /// Toggles bare-terrain passability without placing an object.
    pub fn set_walkable(&mut self, position: Position, walkable: bool) -> bool {
        let Some(tile) = self.tile_mut(position) else {
            return false;
        };
        tile.walkable = walkable;
        true
    }

    pub fn mark_spawn_zone(&mut self, position: Position, faction: Faction) -> bool {
        let Some(tile) = self.tile_mut(position) else {
            return false;
        };
        tile.spawn_zone = Some(faction);
        true
    }

    /// Spawn tiles of `faction` in row-major order.
    pub fn spawn_tiles(&self, faction: Faction) -> Vec<Position> {
        self.tiles
            .iter()
            .filter(|tile| tile.spawn_zone == Some(faction))
            .map(|tile| tile.position)
            .collect()
    }

    /// Writes the occupancy table. Only the session state calls this so the
    /// tile and unit views stay in agreement.
    pub(crate) fn set_occupant(&mut self, position: Position, occupant: Option<UnitId>) -> bool {
        let Some(tile) = self.tile_mut(position) else {
            return false;
        };
        tile.occupant = occupant;
        true
    }

    /// In-bounds neighbours of `position` in [`Direction::NEIGHBOR_ORDER`].
    pub fn neighbors(&self, position: Position) -> impl Iterator<Item = Position> + '_ {
        Direction::NEIGHBOR_ORDER
            .into_iter()
            .map(move |direction| position.step(direction))
            .filter(|neighbor| self.contains(*neighbor))
    }
}
