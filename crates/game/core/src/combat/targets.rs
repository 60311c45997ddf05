//! Target enumeration.

use super::AttackKind;
use crate::config::CombatRules;
use crate::state::{SessionState, UnitId, UnitState};

/// Living enemies of `attacker` it could hit with `kind`, in roster order.
///
/// Ranged targets need Chebyshev distance within `ranged_range` and a clear
/// line of sight; melee targets only need to be within `melee_range`.
pub fn valid_targets(
    state: &SessionState,
    rules: &CombatRules,
    attacker: &UnitState,
    kind: AttackKind,
) -> Vec<UnitId> {
    let reach = kind.range(rules);
    state
        .living_enemies_of(attacker)
        .filter(|enemy| attacker.position.chebyshev(enemy.position) <= reach)
        .filter(|enemy| match kind {
            AttackKind::Ranged => {
                state
                    .grid
                    .has_clear_los(attacker.position, enemy.position, rules)
            }
            AttackKind::Melee => true,
        })
        .map(|enemy| enemy.id)
        .collect()
}

pub fn ranged_targets(
    state: &SessionState,
    rules: &CombatRules,
    attacker: &UnitState,
) -> Vec<UnitId> {
    valid_targets(state, rules, attacker, AttackKind::Ranged)
}

pub fn melee_targets(
    state: &SessionState,
    rules: &CombatRules,
    attacker: &UnitState,
) -> Vec<UnitId> {
    valid_targets(state, rules, attacker, AttackKind::Melee)
}
