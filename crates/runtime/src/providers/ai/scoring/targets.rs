//! Target selection.

use tactics_core::{AttackKind, CoverType, UnitId, UnitState};

use crate::providers::ai::AiContext;

/// Share of the exposure weight still granted against a target in half cover.
const HALF_COVER_EXPOSURE: f32 = 0.3;

/// Breakdown of how attractive one target is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetScore {
    pub target: UnitId,
    /// Missing health fraction × `low_hp_weight`.
    pub wounded: f32,
    /// Closeness within the attack's range × `close_weight`.
    pub proximity: f32,
    /// How exposed the target is from the attacker's tile.
    pub exposure: f32,
}

impl TargetScore {
    pub fn value(&self) -> f32 {
        self.wounded + self.proximity + self.exposure
    }
}

/// Scores `target` for an attack of `kind` by the context unit.
pub fn score_target(ctx: &AiContext, target: &UnitState, kind: AttackKind) -> TargetScore {
    let tuning = ctx.tuning();
    let rules = ctx.rules();

    let health = if target.max_hp == 0 {
        1.0
    } else {
        target.hp as f32 / target.max_hp as f32
    };
    let wounded = (1.0 - health) * tuning.low_hp_weight;

    let range = kind.range(rules);
    let distance = ctx.unit.position.chebyshev(target.position);
    let proximity = if range == 0 {
        0.0
    } else {
        (1.0 - distance as f32 / range as f32) * tuning.close_weight
    };

    let cover = ctx
        .state
        .grid
        .cover_between(ctx.unit.position, target.position, rules);
    let exposure = match cover.cover_type {
        CoverType::None => tuning.no_cover_weight,
        CoverType::Half => tuning.no_cover_weight * HALF_COVER_EXPOSURE,
        CoverType::Full => 0.0,
    };

    TargetScore {
        target: target.id,
        wounded,
        proximity,
        exposure,
    }
}

/// Highest-scoring target among `candidates`; the earliest candidate wins
/// ties. A single candidate is returned without scoring.
pub fn pick_best_target(ctx: &AiContext, candidates: &[UnitId], kind: AttackKind) -> Option<UnitId> {
    if let [only] = candidates {
        return Some(*only);
    }

    let mut best: Option<TargetScore> = None;
    for target in candidates.iter().filter_map(|&id| ctx.state.unit(id)) {
        let score = score_target(ctx, target, kind);
        tracing::trace!(
            attacker = %ctx.unit.id,
            target = %target.id,
            wounded = score.wounded,
            proximity = score.proximity,
            exposure = score.exposure,
            total = score.value(),
            "scored target"
        );
        if best.is_none_or(|current| score.value() > current.value()) {
            best = Some(score);
        }
    }
    best.map(|score| score.target)
}
