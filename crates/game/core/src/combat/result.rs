//! Attack execution.

use super::hit::{AttackKind, HitBreakdown, hit_chance};
use crate::config::CombatRules;
use crate::rng::RollSource;
use crate::state::{Position, SessionState, StateError, UnitId};

/// Outcome of one resolved attack.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    pub attacker: UnitId,
    pub target: UnitId,
    pub hit: bool,
    /// The uniform roll drawn for this attack.
    pub roll: f32,
    /// Damage dealt; zero on a miss.
    pub damage: u32,
    pub killed: bool,
    pub breakdown: HitBreakdown,
    /// Target hit points after the attack.
    pub target_hp: u32,
    pub target_position: Position,
}

/// Resolves an attack and applies its consequences to `state`.
///
/// Draws exactly one roll; the attack hits when `roll <= chance`. The
/// attacker turns to face its target and pays one action point whether or
/// not the shot lands. A lethal hit marks the target dead and frees its tile.
///
/// This is the only place damage and death are applied.
pub fn execute_attack(
    state: &mut SessionState,
    rules: &CombatRules,
    rolls: &mut impl RollSource,
    attacker: UnitId,
    target: UnitId,
    kind: AttackKind,
) -> Result<AttackResult, StateError> {
    let attacker_state = state.unit(attacker).ok_or(StateError::UnknownUnit(attacker))?;
    let target_state = state.unit(target).ok_or(StateError::UnknownUnit(target))?;

    let breakdown = hit_chance(&state.grid, rules, attacker_state, target_state, kind);
    let attacker_position = attacker_state.position;
    let target_position = target_state.position;

    let roll = rolls.roll(attacker.0);
    let hit = roll <= breakdown.chance;

    if let Some(unit) = state.unit_mut(attacker) {
        if let Some(facing) = attacker_position.direction_to(target_position) {
            unit.facing = facing;
        }
        unit.spend_ap();
    }

    let (damage, killed, target_hp) = match state.unit_mut(target) {
        Some(unit) if hit => {
            let killed = unit.take_damage(breakdown.damage);
            (breakdown.damage, killed, unit.hp)
        }
        Some(unit) => (0, false, unit.hp),
        None => return Err(StateError::UnknownUnit(target)),
    };

    if killed {
        state.vacate(target);
    }

    Ok(AttackResult {
        attacker,
        target,
        hit,
        roll,
        damage,
        killed,
        breakdown,
        target_hp,
        target_position,
    })
}
