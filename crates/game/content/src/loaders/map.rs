//! Map data loader.
//!
//! Maps are authored as camelCase JSON:
//!
//! ```json
//! {
//!   "name": "warehouse",
//!   "gridSize": [12, 12],
//!   "tileSize": 2.0,
//!   "groundTexture": "concrete",
//!   "spawnZones": { "player": [[0, 0], [1, 0]], "enemy": [[11, 11]] },
//!   "objects": [
//!     { "type": "crate", "tile": [5, 5], "seed": 7, "scale": 1.0,
//!       "rotation": 90.0, "cover": "half", "coverDirection": "north" }
//!   ],
//!   "lights": [ { "kind": "point", "intensity": 0.8 } ]
//! }
//! ```
//!
//! Only the grid size, spawn zones and object placement/cover reach the
//! simulation. Texture, light, seed, scale and rotation fields are carried
//! through untouched for whoever renders the board.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::{
    CoverType, Direction, ErrorSeverity, Faction, GameError, Grid, MapBounds, ObjectKind,
    Position,
};

use crate::loaders::{LoadResult, read_file};

/// Map file contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapDefinition {
    pub name: String,
    /// `[width, height]` in tiles.
    pub grid_size: [u32; 2],
    pub tile_size: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ground_texture: Option<String>,
    #[serde(default)]
    pub spawn_zones: BTreeMap<Faction, Vec<[i32; 2]>>,
    #[serde(default)]
    pub objects: Vec<MapObject>,
    /// Presentation-only; never inspected.
    #[serde(default)]
    pub lights: Vec<serde_json::Value>,
}

/// A prop placed on one tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapObject {
    #[serde(rename = "type")]
    pub kind: String,
    pub tile: [i32; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
    #[serde(default)]
    pub cover: CoverType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_direction: Option<Direction>,
}

impl MapObject {
    pub fn position(&self) -> Position {
        Position::new(self.tile[0], self.tile[1])
    }
}

/// Structural problems in a map file that parsed but cannot start a session.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapError {
    #[error("grid size {width}x{height} outside allowed range {min}..={max}")]
    GridSizeOutOfBounds {
        width: u32,
        height: u32,
        min: u32,
        max: u32,
    },

    #[error("tile size must be positive, got {tile_size}")]
    InvalidTileSize { tile_size: f32 },

    #[error("object '{kind}' at {position} lies outside the grid")]
    ObjectOutOfBounds { kind: String, position: Position },

    #[error("two objects share tile {position}")]
    ObjectOverlap { position: Position },

    #[error("{faction} spawn tile {position} lies outside the grid")]
    SpawnOutOfBounds { faction: Faction, position: Position },

    #[error("{faction} spawn tile {position} is covered by an object")]
    SpawnOnObject { faction: Faction, position: Position },

    #[error("spawn tile {position} is claimed by more than one faction")]
    SpawnConflict { position: Position },
}

impl GameError for MapError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use MapError::*;
        match self {
            GridSizeOutOfBounds { .. } => "MAP_GRID_SIZE_OUT_OF_BOUNDS",
            InvalidTileSize { .. } => "MAP_INVALID_TILE_SIZE",
            ObjectOutOfBounds { .. } => "MAP_OBJECT_OUT_OF_BOUNDS",
            ObjectOverlap { .. } => "MAP_OBJECT_OVERLAP",
            SpawnOutOfBounds { .. } => "MAP_SPAWN_OUT_OF_BOUNDS",
            SpawnOnObject { .. } => "MAP_SPAWN_ON_OBJECT",
            SpawnConflict { .. } => "MAP_SPAWN_CONFLICT",
        }
    }
}

impl MapDefinition {
    pub fn width(&self) -> u32 {
        self.grid_size[0]
    }

    pub fn height(&self) -> u32 {
        self.grid_size[1]
    }

    fn contains(&self, position: Position) -> bool {
        position.col >= 0
            && position.row >= 0
            && position.col < self.width() as i32
            && position.row < self.height() as i32
    }

    /// Checks everything the simulation relies on. Presentation fields are
    /// not examined.
    pub fn validate(&self, bounds: &MapBounds) -> Result<(), MapError> {
        let (width, height) = (self.width(), self.height());
        if !bounds.contains(width) || !bounds.contains(height) {
            return Err(MapError::GridSizeOutOfBounds {
                width,
                height,
                min: bounds.min_size,
                max: bounds.max_size,
            });
        }
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return Err(MapError::InvalidTileSize {
                tile_size: self.tile_size,
            });
        }

        let mut object_tiles = HashSet::new();
        for object in &self.objects {
            let position = object.position();
            if !self.contains(position) {
                return Err(MapError::ObjectOutOfBounds {
                    kind: object.kind.clone(),
                    position,
                });
            }
            if !object_tiles.insert(position) {
                return Err(MapError::ObjectOverlap { position });
            }
        }

        let mut spawn_tiles = HashSet::new();
        for (&faction, tiles) in &self.spawn_zones {
            for &[col, row] in tiles {
                let position = Position::new(col, row);
                if !self.contains(position) {
                    return Err(MapError::SpawnOutOfBounds { faction, position });
                }
                if object_tiles.contains(&position) {
                    return Err(MapError::SpawnOnObject { faction, position });
                }
                if !spawn_tiles.insert(position) {
                    return Err(MapError::SpawnConflict { position });
                }
            }
        }

        Ok(())
    }

    /// Validates the map and lays it out as a fresh grid: objects block
    /// movement and carry their cover, spawn tiles are tagged by faction.
    pub fn build_grid(&self, bounds: &MapBounds) -> Result<Grid, MapError> {
        self.validate(bounds)?;

        let mut grid = Grid::new(self.width(), self.height());
        for object in &self.objects {
            grid.place_object(
                object.position(),
                ObjectKind::new(object.kind.clone()),
                object.cover,
                object.cover_direction,
            );
        }
        for (&faction, tiles) in &self.spawn_zones {
            for &[col, row] in tiles {
                grid.mark_spawn_zone(Position::new(col, row), faction);
            }
        }
        Ok(grid)
    }
}

/// Loader for map data from JSON files.
pub struct MapLoader;

impl MapLoader {
    /// Load and validate a map from a JSON file.
    pub fn load(path: &Path, bounds: &MapBounds) -> LoadResult<MapDefinition> {
        let content = read_file(path)?;
        Self::parse(&content, bounds)
            .map_err(|e| anyhow::anyhow!("Invalid map {}: {:#}", path.display(), e))
    }

    /// Parse and validate a map from a JSON string.
    pub fn parse(content: &str, bounds: &MapBounds) -> LoadResult<MapDefinition> {
        let definition: MapDefinition = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map JSON: {}", e))?;
        definition.validate(bounds)?;

        tracing::debug!(
            map = %definition.name,
            width = definition.width(),
            height = definition.height(),
            objects = definition.objects.len(),
            "loaded map"
        );
        Ok(definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MapDefinition {
        MapDefinition {
            name: "yard".into(),
            grid_size: [8, 8],
            tile_size: 1.0,
            ground_texture: None,
            spawn_zones: BTreeMap::from([
                (Faction::Player, vec![[0, 0], [1, 0]]),
                (Faction::Enemy, vec![[7, 7]]),
            ]),
            objects: vec![MapObject {
                kind: "crate".into(),
                tile: [4, 4],
                seed: None,
                scale: None,
                rotation: None,
                cover: CoverType::Half,
                cover_direction: None,
            }],
            lights: Vec::new(),
        }
    }

    #[test]
    fn grid_size_outside_bounds_is_rejected() {
        let mut map = sample();
        map.grid_size = [5, 8];
        assert!(matches!(
            map.validate(&MapBounds::default()),
            Err(MapError::GridSizeOutOfBounds { width: 5, .. })
        ));
        map.grid_size = [8, 41];
        assert!(map.validate(&MapBounds::default()).is_err());
    }

    #[test]
    fn non_positive_tile_size_is_rejected() {
        let mut map = sample();
        map.tile_size = 0.0;
        assert!(matches!(
            map.validate(&MapBounds::default()),
            Err(MapError::InvalidTileSize { .. })
        ));
    }

    #[test]
    fn spawn_on_object_is_rejected() {
        let mut map = sample();
        map.spawn_zones
            .entry(Faction::Enemy)
            .or_default()
            .push([4, 4]);
        let err = map.validate(&MapBounds::default()).unwrap_err();
        assert_eq!(
            err,
            MapError::SpawnOnObject {
                faction: Faction::Enemy,
                position: Position::new(4, 4)
            }
        );
        assert_eq!(err.error_code(), "MAP_SPAWN_ON_OBJECT");
    }

    #[test]
    fn build_grid_places_objects_and_zones() {
        let grid = sample().build_grid(&MapBounds::default()).unwrap();
        let crate_tile = grid.tile(Position::new(4, 4)).unwrap();
        assert!(!crate_tile.walkable);
        assert_eq!(crate_tile.cover_type, CoverType::Half);
        assert_eq!(
            grid.spawn_tiles(Faction::Player),
            vec![Position::new(0, 0), Position::new(1, 0)]
        );
    }
}
