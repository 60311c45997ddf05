//! What a unit may do right now.
//!
//! Used by the scheduler to build the action menu it offers a human player and
//! to validate `RequestAction` commands. The opponent runs its own decision
//! loop but consults the same sets.

use bitflags::bitflags;

use super::targets::{melee_targets, ranged_targets};
use crate::config::CombatRules;
use crate::state::{SessionState, UnitId, UnitStatus};

bitflags! {
    /// Set of actions currently open to a unit.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ActionSet: u8 {
        const MOVE      = 1 << 0;
        const RANGED    = 1 << 1;
        const MELEE     = 1 << 2;
        const OVERWATCH = 1 << 3;
        const HUNKER    = 1 << 4;
        const END       = 1 << 5;
    }
}

/// Actions `unit` may take given its AP, whether it already moved this
/// activation, and the targets in reach.
///
/// Ending the activation is always possible for a living unit; everything
/// else costs one action point. A stance already held is not offered again.
pub fn available_actions(
    state: &SessionState,
    rules: &CombatRules,
    unit: UnitId,
    has_moved: bool,
) -> ActionSet {
    let Some(unit) = state.unit(unit).filter(|unit| unit.is_alive()) else {
        return ActionSet::empty();
    };

    let mut actions = ActionSet::END;
    if unit.ap == 0 {
        return actions;
    }

    if !has_moved
        && state
            .grid
            .movement_range(unit.position, unit.move_points)
            .len()
            > 1
    {
        actions |= ActionSet::MOVE;
    }
    if !ranged_targets(state, rules, unit).is_empty() {
        actions |= ActionSet::RANGED;
    }
    if !melee_targets(state, rules, unit).is_empty() {
        actions |= ActionSet::MELEE;
    }
    if !unit.status.is_overwatch() {
        actions |= ActionSet::OVERWATCH;
    }
    if unit.status != UnitStatus::Hunkered {
        actions |= ActionSet::HUNKER;
    }
    actions
}
