//! Cover and flanking geometry.

use arrayvec::ArrayVec;

use super::Grid;
use crate::config::{CombatRules, GameConfig};
use crate::state::{CoverType, Direction, Position};

/// Cover a target enjoys against one attacker, with its accuracy penalty.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverReport {
    pub cover_type: CoverType,
    /// Zero or negative; added to the attacker's hit chance.
    pub penalty: f32,
}

impl CoverReport {
    pub fn new(cover_type: CoverType, rules: &CombatRules) -> Self {
        let penalty = match cover_type {
            CoverType::None => 0.0,
            CoverType::Half => rules.half_cover_penalty,
            CoverType::Full => rules.full_cover_penalty,
        };
        Self {
            cover_type,
            penalty,
        }
    }

    pub fn none() -> Self {
        Self {
            cover_type: CoverType::None,
            penalty: 0.0,
        }
    }
}

type CoverCandidates = ArrayVec<Position, { GameConfig::MAX_COVER_CANDIDATES }>;

impl Grid {
    /// Tiles next to `target` that sit between it and `attacker`: the
    /// orthogonal step(s) towards the attacker, plus the diagonal step when
    /// the attacker is off-axis.
    fn cover_candidates(&self, attacker: Position, target: Position) -> CoverCandidates {
        let mut candidates = CoverCandidates::new();
        let Some(towards) = target.direction_to(attacker) else {
            return candidates;
        };

        let (horizontal, vertical) = towards.components();
        for side in [horizontal, vertical].into_iter().flatten() {
            candidates.push(target.step(side));
        }
        if towards.is_diagonal() {
            candidates.push(target.step(towards));
        }
        candidates
    }

    /// Strongest cover protecting `target` from `attacker`.
    pub fn cover_between(
        &self,
        attacker: Position,
        target: Position,
        rules: &CombatRules,
    ) -> CoverReport {
        let best = self
            .cover_candidates(attacker, target)
            .into_iter()
            .filter_map(|position| self.tile(position))
            .map(|tile| tile.cover_type)
            .max()
            .unwrap_or_default();
        CoverReport::new(best, rules)
    }

    /// True when `attacker` stands beside or behind a target facing
    /// `target_facing` (dot product of facing and target→attacker ≤ 0).
    pub fn check_flanking(
        &self,
        attacker: Position,
        target: Position,
        target_facing: Direction,
    ) -> bool {
        target_facing.dot(target.delta_to(attacker)) <= 0
    }

    /// Best cover tier among the eight tiles surrounding `position`.
    pub fn best_adjacent_cover(&self, position: Position) -> CoverType {
        self.neighbors(position)
            .filter_map(|neighbor| self.tile(neighbor))
            .map(|tile| tile.cover_type)
            .max()
            .unwrap_or_default()
    }

    /// The subset of `tiles` that has cover next to it, each paired with the
    /// best tier available. Input order is preserved.
    pub fn cover_adjacent_tiles(&self, tiles: &[Position]) -> Vec<(Position, CoverType)> {
        tiles
            .iter()
            .map(|&position| (position, self.best_adjacent_cover(position)))
            .filter(|(_, cover)| *cover != CoverType::None)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ObjectKind;

    fn place(grid: &mut Grid, col: i32, row: i32, cover: CoverType) {
        grid.place_object(Position::new(col, row), ObjectKind::new("obj"), cover, None);
    }

    #[test]
    fn orthogonal_attacker_checks_single_tile() {
        let rules = CombatRules::default();
        let mut grid = Grid::new(10, 10);
        let target = Position::new(5, 5);
        place(&mut grid, 4, 5, CoverType::Half);
        place(&mut grid, 5, 4, CoverType::Full);

        let report = grid.cover_between(Position::new(1, 5), target, &rules);
        assert_eq!(report.cover_type, CoverType::Half);
        assert_eq!(report.penalty, rules.half_cover_penalty);
    }

    #[test]
    fn diagonal_attacker_takes_strongest_of_three() {
        let rules = CombatRules::default();
        let mut grid = Grid::new(10, 10);
        let target = Position::new(5, 5);
        place(&mut grid, 4, 5, CoverType::Half);
        place(&mut grid, 4, 4, CoverType::Full);

        let report = grid.cover_between(Position::new(1, 2), target, &rules);
        assert_eq!(report.cover_type, CoverType::Full);
    }

    #[test]
    fn cover_on_far_side_does_not_count() {
        let rules = CombatRules::default();
        let mut grid = Grid::new(10, 10);
        let target = Position::new(5, 5);
        place(&mut grid, 6, 5, CoverType::Full);

        let report = grid.cover_between(Position::new(1, 5), target, &rules);
        assert_eq!(report, CoverReport::none());
    }

    #[test]
    fn flanking_from_behind_and_side_but_not_front() {
        let grid = Grid::new(10, 10);
        let target = Position::new(5, 5);
        let facing = Direction::East;

        assert!(grid.check_flanking(Position::new(2, 5), target, facing));
        assert!(grid.check_flanking(Position::new(5, 1), target, facing));
        assert!(grid.check_flanking(Position::new(5, 8), target, facing));
        assert!(!grid.check_flanking(Position::new(8, 5), target, facing));
        assert!(!grid.check_flanking(Position::new(8, 2), target, facing));
    }

    #[test]
    fn cover_adjacent_tiles_reports_best_tier() {
        let mut grid = Grid::new(10, 10);
        place(&mut grid, 2, 2, CoverType::Half);
        place(&mut grid, 3, 3, CoverType::Full);

        let tiles = [Position::new(2, 3), Position::new(8, 8), Position::new(1, 1)];
        assert_eq!(
            grid.cover_adjacent_tiles(&tiles),
            vec![
                (Position::new(2, 3), CoverType::Full),
                (Position::new(1, 1), CoverType::Half),
            ]
        );
    }
}
