//! Activation priority for the opponent's squad.
//!
//! Units that can already shoot go first, then units in melee contact, then
//! units closest to the enemy, with a small push for units standing in the
//! open.

use tactics_core::{AttackKind, Faction, GameConfig, SessionState, UnitId, valid_targets};

use crate::providers::ai::AiContext;

const HAS_RANGED_TARGET: f32 = 100.0;
const HAS_MELEE_TARGET: f32 = 90.0;
/// Closeness credit is `max(0, CLOSENESS_HORIZON - distance)`.
const CLOSENESS_HORIZON: f32 = 20.0;
const EXPOSED: f32 = 10.0;

/// Urgency of activating the context unit now.
pub fn activation_priority(ctx: &AiContext) -> f32 {
    let unit = ctx.unit;
    let rules = ctx.rules();
    let mut priority = 0.0;

    if !valid_targets(ctx.state, rules, unit, AttackKind::Ranged).is_empty() {
        priority += HAS_RANGED_TARGET;
    }
    if !valid_targets(ctx.state, rules, unit, AttackKind::Melee).is_empty() {
        priority += HAS_MELEE_TARGET;
    }
    if let Some(enemy) = ctx.nearest_enemy() {
        let distance = unit.position.chebyshev(enemy.position) as f32;
        priority += (CLOSENESS_HORIZON - distance).max(0.0);
    }
    if ctx
        .state
        .grid
        .cover_adjacent_tiles(&[unit.position])
        .is_empty()
    {
        priority += EXPOSED;
    }
    priority
}

/// Living, unactivated units of `faction` sorted by descending priority.
/// Equal priorities keep roster order.
pub fn choose_activation_order(
    state: &SessionState,
    config: &GameConfig,
    faction: Faction,
) -> Vec<UnitId> {
    let mut ranked: Vec<(UnitId, f32)> = state
        .living(faction)
        .filter(|unit| !unit.activated)
        .map(|unit| {
            let priority = activation_priority(&AiContext::new(state, config, unit));
            (unit.id, priority)
        })
        .collect();

    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.into_iter().map(|(id, _)| id).collect()
}
