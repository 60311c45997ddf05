//! Hit-chance formulas.

use crate::config::CombatRules;
use crate::grid::Grid;
use crate::state::{CoverType, UnitState, UnitStatus};

/// Attack flavour. Ranged attacks respect cover and range; melee ignores both.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AttackKind {
    Ranged,
    Melee,
}

impl AttackKind {
    pub fn damage(self, rules: &CombatRules) -> u32 {
        match self {
            AttackKind::Ranged => rules.ranged_damage,
            AttackKind::Melee => rules.melee_damage,
        }
    }

    pub fn range(self, rules: &CombatRules) -> u32 {
        match self {
            AttackKind::Ranged => rules.ranged_range,
            AttackKind::Melee => rules.melee_range,
        }
    }
}

/// Every term that went into a hit chance, independent of the roll.
///
/// `raw` is the unclamped sum; `chance` is what the roll is compared against.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitBreakdown {
    pub kind: AttackKind,
    pub base: f32,
    pub cover_type: CoverType,
    pub cover: f32,
    /// Extra penalty when the target is hunkered behind cover.
    pub hunker: f32,
    pub flank: f32,
    pub range: f32,
    pub raw: f32,
    pub chance: f32,
    pub damage: u32,
}

impl HitBreakdown {
    pub fn is_flanking(&self) -> bool {
        self.flank > 0.0
    }
}

/// Hit chance of `attacker` against `target`.
///
/// ```text
/// ranged = base + cover [+ cover if hunkered] [+ flank] [+ near-max-range]
/// melee  = base [+ flank]
/// ```
///
/// clamped to `[min_hit_chance, max_hit_chance]`. Callers have already
/// validated range and line of sight.
pub fn hit_chance(
    grid: &Grid,
    rules: &CombatRules,
    attacker: &UnitState,
    target: &UnitState,
    kind: AttackKind,
) -> HitBreakdown {
    let flanked = grid.check_flanking(attacker.position, target.position, target.facing);
    let flank = if flanked { rules.flanking_bonus } else { 0.0 };

    let (base, cover_type, cover, hunker, range) = match kind {
        AttackKind::Ranged => {
            let report = grid.cover_between(attacker.position, target.position, rules);
            let hunker = if target.status == UnitStatus::Hunkered && report.penalty != 0.0 {
                report.penalty
            } else {
                0.0
            };
            let distance = attacker.position.chebyshev(target.position);
            let range = if distance + 1 >= rules.ranged_range {
                rules.near_max_range_penalty
            } else {
                0.0
            };
            (
                rules.base_ranged_accuracy,
                report.cover_type,
                report.penalty,
                hunker,
                range,
            )
        }
        AttackKind::Melee => (rules.base_melee_accuracy, CoverType::None, 0.0, 0.0, 0.0),
    };

    let raw = base + cover + hunker + flank + range;
    HitBreakdown {
        kind,
        base,
        cover_type,
        cover,
        hunker,
        flank,
        range,
        raw,
        chance: raw.clamp(rules.min_hit_chance, rules.max_hit_chance),
        damage: kind.damage(rules),
    }
}
