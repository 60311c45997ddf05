use super::{Direction, Faction, Position, UnitId};

/// Protection a tile offers to units standing next to it.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CoverType {
    #[default]
    None,
    Half,
    Full,
}

/// Opaque identifier of a placed map object (crate, wall, barrel, ...).
///
/// The core never interprets the name; it only records that something sits on
/// the tile so line-of-sight can tell an object apart from bare terrain.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectKind(pub String);

impl ObjectKind {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A single grid cell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub position: Position,
    pub walkable: bool,
    pub cover_type: CoverType,
    /// Facing the cover presents, when the object is directional.
    pub cover_direction: Option<Direction>,
    pub object: Option<ObjectKind>,
    pub occupant: Option<UnitId>,
    pub spawn_zone: Option<Faction>,
}

impl Tile {
    /// Open floor with nothing on it.
    pub fn open(position: Position) -> Self {
        Self {
            position,
            walkable: true,
            cover_type: CoverType::None,
            cover_direction: None,
            object: None,
            occupant: None,
            spawn_zone: None,
        }
    }

    pub fn has_object(&self) -> bool {
        self.object.is_some()
    }

    /// Full-cover objects are the only thing that blocks line of sight.
    pub fn blocks_sight(&self) -> bool {
        self.cover_type == CoverType::Full && self.has_object()
    }
}
