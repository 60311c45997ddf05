//! Per-turn activation order.

use serde::{Deserialize, Serialize};
use tactics_core::{Faction, SessionState, UnitId};

/// Units left to activate this turn, interleaved across factions.
///
/// Built once at the start of a turn. Entries whose unit has since died or
/// already activated are skipped when reached.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationQueue {
    order: Vec<UnitId>,
    cursor: usize,
}

impl ActivationQueue {
    /// Round-robin over the factions in [`Faction::ALL`] order: the first
    /// player unit, the first enemy unit, the second player unit, and so on.
    /// Within a faction units keep roster order.
    pub fn build(state: &SessionState) -> Self {
        let squads = Faction::ALL
            .iter()
            .map(|&faction| {
                state
                    .living(faction)
                    .filter(|unit| !unit.activated)
                    .map(|unit| unit.id)
                    .collect()
            })
            .collect();
        Self::interleave(squads)
    }

    /// Round-robin over pre-ordered squads. A squad that runs out simply
    /// stops contributing.
    pub fn interleave(squads: Vec<Vec<UnitId>>) -> Self {
        let longest = squads.iter().map(Vec::len).max().unwrap_or(0);
        let mut order = Vec::with_capacity(squads.iter().map(Vec::len).sum());
        for slot in 0..longest {
            order.extend(squads.iter().filter_map(|squad| squad.get(slot).copied()));
        }

        Self { order, cursor: 0 }
    }

    /// Advances past the next unit that is still alive and unactivated.
    pub fn next(&mut self, state: &SessionState) -> Option<UnitId> {
        while let Some(&id) = self.order.get(self.cursor) {
            self.cursor += 1;
            if state
                .unit(id)
                .is_some_and(|unit| unit.is_alive() && !unit.activated)
            {
                return Some(id);
            }
        }
        None
    }

    pub fn order(&self) -> &[UnitId] {
        &self.order
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.order.len()
    }
}
