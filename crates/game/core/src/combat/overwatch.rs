//! Stances and reaction fire.
//!
//! A unit on overwatch watches the half-plane in front of the facing it had
//! when it set the stance. Any enemy stepping onto a tile within range and
//! sight, while moving in a direction not opposed to that cone, draws one
//! reaction shot. Firing spends the stance.

use super::hit::AttackKind;
use super::result::{AttackResult, execute_attack};
use crate::config::CombatRules;
use crate::rng::RollSource;
use crate::state::{Direction, Position, SessionState, StateError, UnitId, UnitStatus};

/// Puts `unit` on overwatch facing its current direction. Costs one AP.
pub fn set_overwatch(state: &mut SessionState, unit: UnitId) -> Result<Direction, StateError> {
    let unit = state.unit_mut(unit).ok_or(StateError::UnknownUnit(unit))?;
    let cone = unit.facing;
    unit.status = UnitStatus::Overwatch { cone };
    unit.spend_ap();
    Ok(cone)
}

/// Puts `unit` into the hunkered stance. Costs one AP.
pub fn set_hunker(state: &mut SessionState, unit: UnitId) -> Result<(), StateError> {
    let unit = state.unit_mut(unit).ok_or(StateError::UnknownUnit(unit))?;
    unit.status = UnitStatus::Hunkered;
    unit.spend_ap();
    Ok(())
}

/// Watchers that react to `mover` stepping from `from` onto `to`, in roster
/// order.
pub fn check_overwatch(
    state: &SessionState,
    rules: &CombatRules,
    mover: UnitId,
    from: Position,
    to: Position,
) -> Vec<UnitId> {
    let Some(mover) = state.unit(mover) else {
        return Vec::new();
    };
    let Some(heading) = from.direction_to(to) else {
        return Vec::new();
    };

    state
        .living_enemies_of(mover)
        .filter_map(|watcher| watcher.overwatch_cone().map(|cone| (watcher, cone)))
        .filter(|(watcher, _)| watcher.position.chebyshev(to) <= rules.overwatch_range)
        .filter(|(watcher, _)| state.grid.has_clear_los(watcher.position, to, rules))
        .filter(|(_, cone)| cone.dot(heading.delta()) >= 0)
        .map(|(watcher, _)| watcher.id)
        .collect()
}

/// Fires a reaction shot from `watcher` at `mover` and ends the watch.
pub fn execute_overwatch_shot(
    state: &mut SessionState,
    rules: &CombatRules,
    rolls: &mut impl RollSource,
    watcher: UnitId,
    mover: UnitId,
) -> Result<AttackResult, StateError> {
    let result = execute_attack(state, rules, rolls, watcher, mover, AttackKind::Ranged)?;
    if let Some(unit) = state.unit_mut(watcher) {
        unit.status = UnitStatus::Activated;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UnitTemplate;
    use crate::grid::Grid;
    use crate::rng::FixedRolls;
    use crate::state::{CoverType, Faction, ObjectKind, UnitState};

    fn watcher_facing(state: &mut SessionState, pos: Position, facing: Direction) -> UnitId {
        let unit = UnitState::new(UnitId(0), Faction::Player, pos, &UnitTemplate::default())
            .with_facing(facing);
        let id = state.insert_unit(unit).unwrap();
        set_overwatch(state, id).unwrap();
        id
    }

    fn mover_at(state: &mut SessionState, pos: Position) -> UnitId {
        let unit = UnitState::new(UnitId(0), Faction::Enemy, pos, &UnitTemplate::default());
        state.insert_unit(unit).unwrap()
    }

    #[test]
    fn overwatch_records_cone_and_spends_ap() {
        let mut state = SessionState::new(Grid::new(10, 10));
        let id = watcher_facing(&mut state, Position::new(2, 2), Direction::East);
        let unit = state.unit(id).unwrap();
        assert_eq!(unit.overwatch_cone(), Some(Direction::East));
        assert_eq!(unit.ap, unit.max_ap - 1);
    }

    #[test]
    fn cone_triggers_on_heading_not_opposed() {
        let rules = CombatRules::default();
        let mut state = SessionState::new(Grid::new(12, 12));
        let watcher = watcher_facing(&mut state, Position::new(2, 5), Direction::East);
        let mover = mover_at(&mut state, Position::new(6, 4));

        // Eastward: same heading as the cone.
        let east = check_overwatch(
            &state,
            &rules,
            mover,
            Position::new(6, 4),
            Position::new(7, 4),
        );
        assert_eq!(east, vec![watcher]);

        // Southward: perpendicular, dot is zero.
        let south = check_overwatch(
            &state,
            &rules,
            mover,
            Position::new(6, 4),
            Position::new(6, 5),
        );
        assert_eq!(south, vec![watcher]);

        // Westward: opposed.
        let west = check_overwatch(
            &state,
            &rules,
            mover,
            Position::new(6, 4),
            Position::new(5, 4),
        );
        assert!(west.is_empty());
    }

    #[test]
    fn out_of_range_or_sight_does_not_trigger() {
        let rules = CombatRules::default();
        let mut state = SessionState::new(Grid::new(16, 12));
        let _watcher = watcher_facing(&mut state, Position::new(1, 1), Direction::East);
        let mover = mover_at(&mut state, Position::new(10, 1));

        let far = check_overwatch(
            &state,
            &rules,
            mover,
            Position::new(10, 1),
            Position::new(11, 1),
        );
        assert!(far.is_empty());

        state.grid.place_object(
            Position::new(3, 1),
            ObjectKind::new("wall"),
            CoverType::Full,
            None,
        );
        let hidden = check_overwatch(
            &state,
            &rules,
            mover,
            Position::new(4, 1),
            Position::new(5, 1),
        );
        assert!(hidden.is_empty());
    }

    #[test]
    fn allies_and_ready_units_never_react() {
        let rules = CombatRules::default();
        let mut state = SessionState::new(Grid::new(10, 10));
        let ally =
            UnitState::new(UnitId(0), Faction::Enemy, Position::new(1, 1), &UnitTemplate::default())
                .with_facing(Direction::East);
        let ally = state.insert_unit(ally).unwrap();
        set_overwatch(&mut state, ally).unwrap();
        let _idle = state
            .insert_unit(UnitState::new(
                UnitId(0),
                Faction::Player,
                Position::new(1, 3),
                &UnitTemplate::default(),
            ))
            .unwrap();
        let mover = mover_at(&mut state, Position::new(4, 2));

        assert!(
            check_overwatch(
                &state,
                &rules,
                mover,
                Position::new(4, 2),
                Position::new(5, 2)
            )
            .is_empty()
        );
    }

    #[test]
    fn reaction_shot_spends_the_stance() {
        let rules = CombatRules::default();
        let mut state = SessionState::new(Grid::new(10, 10));
        let watcher = watcher_facing(&mut state, Position::new(2, 5), Direction::East);
        let mover = mover_at(&mut state, Position::new(5, 5));

        let result = execute_overwatch_shot(
            &mut state,
            &rules,
            &mut FixedRolls::always_hit(),
            watcher,
            mover,
        )
        .unwrap();

        assert!(result.hit);
        assert_eq!(result.breakdown.kind, AttackKind::Ranged);
        let watcher = state.unit(watcher).unwrap();
        assert_eq!(watcher.status, UnitStatus::Activated);
        assert_eq!(watcher.overwatch_cone(), None);
        assert_eq!(watcher.ap, 0);
    }
}
