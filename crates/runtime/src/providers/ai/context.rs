//! Read-only view the opponent reasons over.

use tactics_core::{AiTuning, CombatRules, GameConfig, Position, SessionState, UnitState};

/// Everything one scoring pass needs: the session, the rules, and the unit
/// being planned for.
///
/// The context borrows the scheduler's state; planning never mutates it.
#[derive(Clone, Copy)]
pub struct AiContext<'a> {
    pub state: &'a SessionState,
    pub config: &'a GameConfig,
    pub unit: &'a UnitState,
}

impl<'a> AiContext<'a> {
    pub fn new(state: &'a SessionState, config: &'a GameConfig, unit: &'a UnitState) -> Self {
        Self {
            state,
            config,
            unit,
        }
    }

    pub fn rules(&self) -> &'a CombatRules {
        &self.config.combat
    }

    pub fn tuning(&self) -> &'a AiTuning {
        &self.config.ai
    }

    /// Living hostile units in roster order.
    pub fn enemies(&self) -> impl Iterator<Item = &'a UnitState> + 'a {
        self.state.living_enemies_of(self.unit)
    }

    /// Closest living enemy by Chebyshev distance; the first in roster order
    /// wins ties.
    pub fn nearest_enemy(&self) -> Option<&'a UnitState> {
        let origin = self.unit.position;
        self.enemies()
            .fold(None, |best: Option<&UnitState>, enemy| match best {
                Some(current)
                    if current.position.chebyshev(origin) <= enemy.position.chebyshev(origin) =>
                {
                    Some(current)
                }
                _ => Some(enemy),
            })
    }

    /// Living enemies standing next to `position`.
    pub fn adjacent_enemies(&self, position: Position) -> usize {
        self.enemies()
            .filter(|enemy| enemy.position.chebyshev(position) == 1)
            .count()
    }
}
