//! Move-destination scoring.
//!
//! A candidate tile is judged against the enemy the unit is closing on:
//!
//! ```text
//! score = distance band + sight bonus + cover bonus − crowding + relocation
//! ```
//!
//! The distance band peaks inside the preferred shooting window, tapers
//! steeply when too close, gently while still in weapon range, and barely
//! beyond it. The relocation term is a tiny nudge that breaks ties in favour
//! of actually moving.

use tactics_core::{CoverType, Position, UnitState};

use crate::providers::ai::AiContext;

/// Components of one tile's score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileScore {
    pub position: Position,
    pub distance: f32,
    pub sight: f32,
    pub cover: f32,
    pub crowding: f32,
    pub relocation: f32,
}

impl TileScore {
    pub fn value(&self) -> f32 {
        self.distance + self.sight + self.cover - self.crowding + self.relocation
    }
}

/// Distance term for standing `distance` tiles from the target.
pub fn distance_band(ctx: &AiContext, distance: u32) -> f32 {
    let tuning = ctx.tuning();
    let (near, far) = (
        tuning.preferred_min_distance,
        tuning.preferred_max_distance,
    );
    let range = ctx.rules().ranged_range;

    if (near..=far).contains(&distance) {
        tuning.window_reward
    } else if distance < near {
        tuning.window_reward - tuning.too_close_taper * (near - distance) as f32
    } else if distance <= range {
        tuning.in_range_reward - tuning.in_range_taper * (distance - far) as f32
    } else {
        tuning.out_of_range_reward - tuning.out_of_range_taper * (distance - range) as f32
    }
}

pub fn score_tile(ctx: &AiContext, position: Position, target: &UnitState) -> TileScore {
    let tuning = ctx.tuning();
    let rules = ctx.rules();
    let grid = &ctx.state.grid;

    let range = position.chebyshev(target.position);
    let distance = distance_band(ctx, range);
    let in_range = range <= rules.ranged_range;
    let sight = if in_range && grid.has_clear_los(position, target.position, rules) {
        tuning.los_bonus
    } else {
        0.0
    };
    let cover = match grid.cover_between(target.position, position, rules).cover_type {
        CoverType::Full => tuning.full_cover_bonus,
        CoverType::Half => tuning.full_cover_bonus * tuning.half_cover_factor,
        CoverType::None => 0.0,
    };
    let crowding = ctx.adjacent_enemies(position).saturating_sub(1) as f32 * tuning.crowding_penalty;
    let relocation = if position != ctx.unit.position {
        tuning.relocation_tiebreak
    } else {
        0.0
    };

    TileScore {
        position,
        distance,
        sight,
        cover,
        crowding,
        relocation,
    }
}

/// Best tile within the unit's movement range for engaging `target`.
///
/// Candidates are visited in flood-fill order, the current tile included;
/// the first maximum wins.
pub fn find_best_move_tile(ctx: &AiContext, target: &UnitState) -> Option<Position> {
    let unit = ctx.unit;
    let mut best: Option<TileScore> = None;

    for reachable in ctx.state.grid.movement_range(unit.position, unit.move_points) {
        let score = score_tile(ctx, reachable.position, target);
        if best.is_none_or(|current| score.value() > current.value()) {
            best = Some(score);
        }
    }

    if let Some(score) = &best {
        tracing::trace!(
            unit = %unit.id,
            target = %target.id,
            tile = %score.position,
            distance = score.distance,
            sight = score.sight,
            cover = score.cover,
            crowding = score.crowding,
            total = score.value(),
            "picked move tile"
        );
    }
    best.map(|score| score.position)
}
