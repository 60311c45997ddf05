//! Line tracing and line-of-sight.

use super::{CoverReport, Grid};
use crate::config::CombatRules;
use crate::state::Position;

/// Result of a line-of-sight check.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SightLine {
    /// A full-cover object sits on the line; no cover value applies.
    Blocked,
    /// The line is open; the target's cover from this angle is attached.
    Clear(CoverReport),
}

impl SightLine {
    pub fn is_clear(&self) -> bool {
        matches!(self, SightLine::Clear(_))
    }

    pub fn cover(&self) -> Option<CoverReport> {
        match self {
            SightLine::Clear(report) => Some(*report),
            SightLine::Blocked => None,
        }
    }
}

/// Tiles a straight ray from `from` to `to` crosses, endpoints excluded.
///
/// Integer Bresenham walk; symmetric lines are not guaranteed, so callers
/// always trace from the viewer towards the viewed tile.
pub fn trace_line(from: Position, to: Position) -> Vec<Position> {
    let dx = (to.col - from.col).abs();
    let dy = -(to.row - from.row).abs();
    let sx = if from.col < to.col { 1 } else { -1 };
    let sy = if from.row < to.row { 1 } else { -1 };

    let mut err = dx + dy;
    let mut col = from.col;
    let mut row = from.row;
    let mut line = Vec::new();

    loop {
        if col == to.col && row == to.row {
            break;
        }
        let doubled = 2 * err;
        if doubled >= dy {
            err += dy;
            col += sx;
        }
        if doubled <= dx {
            err += dx;
            row += sy;
        }
        if col == to.col && row == to.row {
            break;
        }
        line.push(Position::new(col, row));
    }

    line
}

impl Grid {
    /// Line of sight from `from` to `to`.
    ///
    /// Blocked when any tile strictly between carries full cover and a placed
    /// object. When clear, the target's cover as seen from `from` is reported.
    /// Endpoints outside the grid are treated as blocked.
    pub fn check_los(&self, from: Position, to: Position, rules: &CombatRules) -> SightLine {
        if !self.contains(from) || !self.contains(to) {
            return SightLine::Blocked;
        }

        let obstructed = trace_line(from, to)
            .into_iter()
            .filter_map(|position| self.tile(position))
            .any(|tile| tile.blocks_sight());

        if obstructed {
            SightLine::Blocked
        } else {
            SightLine::Clear(self.cover_between(from, to, rules))
        }
    }

    pub fn has_clear_los(&self, from: Position, to: Position, rules: &CombatRules) -> bool {
        self.check_los(from, to, rules).is_clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CoverType, ObjectKind};

    #[test]
    fn adjacent_tiles_have_nothing_between() {
        assert!(trace_line(Position::new(2, 2), Position::new(3, 3)).is_empty());
        assert!(trace_line(Position::new(2, 2), Position::new(2, 2)).is_empty());
    }

    #[test]
    fn straight_line_lists_interior_tiles() {
        let line = trace_line(Position::new(0, 0), Position::new(4, 0));
        assert_eq!(
            line,
            vec![Position::new(1, 0), Position::new(2, 0), Position::new(3, 0)]
        );
    }

    #[test]
    fn shallow_line_steps_once_per_column() {
        let line = trace_line(Position::new(0, 0), Position::new(6, 2));
        assert_eq!(line.len(), 5);
        for pair in line.windows(2) {
            assert_eq!(pair[1].col - pair[0].col, 1);
        }
    }

    #[test]
    fn full_cover_object_between_blocks() {
        let rules = CombatRules::default();
        let mut grid = Grid::new(10, 10);
        grid.place_object(Position::new(3, 2), ObjectKind::new("wall"), CoverType::Full, None);

        assert_eq!(
            grid.check_los(Position::new(0, 2), Position::new(6, 2), &rules),
            SightLine::Blocked
        );
    }

    #[test]
    fn half_cover_between_does_not_block() {
        let rules = CombatRules::default();
        let mut grid = Grid::new(10, 10);
        grid.place_object(Position::new(3, 2), ObjectKind::new("crate"), CoverType::Half, None);

        let sight = grid.check_los(Position::new(0, 2), Position::new(6, 2), &rules);
        assert!(sight.is_clear());
        assert_eq!(sight.cover().map(|c| c.cover_type), Some(CoverType::None));
    }

    #[test]
    fn bare_impassable_terrain_does_not_block() {
        let rules = CombatRules::default();
        let mut grid = Grid::new(10, 10);
        grid.set_walkable(Position::new(3, 2), false);
        assert!(grid.has_clear_los(Position::new(0, 2), Position::new(6, 2), &rules));
    }

    #[test]
    fn full_cover_adjacent_to_target_reports_cover() {
        let rules = CombatRules::default();
        let mut grid = Grid::new(10, 10);
        // Beside the target, off the traced line.
        grid.place_object(Position::new(6, 4), ObjectKind::new("wall"), CoverType::Full, None);

        let sight = grid.check_los(Position::new(0, 6), Position::new(6, 3), &rules);
        assert!(sight.is_clear());
        let cover = sight.cover().unwrap();
        assert_eq!(cover.cover_type, CoverType::Full);
        assert_eq!(cover.penalty, rules.full_cover_penalty);
    }

    #[test]
    fn out_of_bounds_is_blocked() {
        let rules = CombatRules::default();
        let grid = Grid::new(6, 6);
        assert_eq!(
            grid.check_los(Position::new(0, 0), Position::new(10, 0), &rules),
            SightLine::Blocked
        );
    }
}
