use std::fmt;

/// Stable identifier of a unit; doubles as its index in the session roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl UnitId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed in tile coordinates.
///
/// Columns grow to the east, rows grow to the south.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub col: i32,
    pub row: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { col: 0, row: 0 };

    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Neighbouring position one step in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dc, dr) = direction.delta();
        Self::new(self.col + dc, self.row + dr)
    }

    /// Raw `(dcol, drow)` offset from `self` to `other`.
    pub fn delta_to(self, other: Position) -> (i32, i32) {
        (other.col - self.col, other.row - self.row)
    }

    /// Chebyshev distance: diagonal steps cost the same as orthogonal ones.
    pub fn chebyshev(self, other: Position) -> u32 {
        let (dc, dr) = self.delta_to(other);
        dc.unsigned_abs().max(dr.unsigned_abs())
    }

    /// Sign-normalised direction towards `other`, `None` when equal.
    pub fn direction_to(self, other: Position) -> Option<Direction> {
        let (dc, dr) = self.delta_to(other);
        Direction::from_delta(dc, dr)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// One of the eight grid directions.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// Neighbour expansion order used by every breadth-first search:
    /// orthogonal steps first, then diagonals.
    pub const NEIGHBOR_ORDER: [Direction; 8] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// Normalises each component of an arbitrary offset to `{-1, 0, 1}`.
    pub fn from_delta(dc: i32, dr: i32) -> Option<Self> {
        match (dc.signum(), dr.signum()) {
            (0, -1) => Some(Direction::North),
            (1, -1) => Some(Direction::NorthEast),
            (1, 0) => Some(Direction::East),
            (1, 1) => Some(Direction::SouthEast),
            (0, 1) => Some(Direction::South),
            (-1, 1) => Some(Direction::SouthWest),
            (-1, 0) => Some(Direction::West),
            (-1, -1) => Some(Direction::NorthWest),
            _ => None,
        }
    }

    pub const fn is_diagonal(self) -> bool {
        let (dc, dr) = self.delta();
        dc != 0 && dr != 0
    }

    /// The orthogonal components of a diagonal (`NorthEast` → `North`, `East`).
    /// Orthogonal directions return themselves once.
    pub fn components(self) -> (Option<Direction>, Option<Direction>) {
        let (dc, dr) = self.delta();
        (Direction::from_delta(dc, 0), Direction::from_delta(0, dr))
    }

    /// Integer dot product with an arbitrary offset. Only the sign is used by
    /// callers, so the offset need not be normalised.
    pub const fn dot(self, offset: (i32, i32)) -> i32 {
        let (dc, dr) = self.delta();
        dc * offset.0 + dr * offset.1
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_delta_normalises_components() {
        assert_eq!(Direction::from_delta(5, 0), Some(Direction::East));
        assert_eq!(Direction::from_delta(-3, 7), Some(Direction::SouthWest));
        assert_eq!(Direction::from_delta(0, 0), None);
    }

    #[test]
    fn diagonal_components_split_into_orthogonals() {
        assert_eq!(
            Direction::NorthEast.components(),
            (Some(Direction::East), Some(Direction::North))
        );
        assert_eq!(Direction::West.components(), (Some(Direction::West), None));
    }

    #[test]
    fn chebyshev_counts_diagonals_as_one() {
        let a = Position::new(1, 1);
        assert_eq!(a.chebyshev(Position::new(4, 3)), 3);
        assert_eq!(a.chebyshev(a), 0);
    }

    #[test]
    fn direction_parses_from_snake_case() {
        assert_eq!("north_east".parse::<Direction>(), Ok(Direction::NorthEast));
    }
}
