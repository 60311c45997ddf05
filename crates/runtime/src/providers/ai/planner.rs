//! Per-activation decision loop.

use serde::{Deserialize, Serialize};
use tactics_core::{
    AttackKind, Faction, GameConfig, Position, SessionState, UnitId, melee_targets, ranged_targets,
};

use super::AiContext;
use super::scoring::{choose_activation_order, find_best_move_tile, pick_best_target};

/// Attacks the opponent will make in one activation at most.
const MAX_ATTACKS_PER_ACTIVATION: u32 = 2;

/// One step the opponent wants taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiDecision {
    Attack { target: UnitId, kind: AttackKind },
    Move { destination: Position },
    Overwatch,
    End,
}

/// What has already happened during the current activation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AiMemo {
    pub moved: bool,
    pub attacks: u32,
}

/// Rule-based opponent.
///
/// The scheduler asks for one [`AiDecision`] at a time, executes it through
/// the same paths a human command would take, records it in the
/// [`AiMemo`], and asks again until the planner answers
/// [`AiDecision::End`] or [`AiDecision::Overwatch`]:
///
/// 1. out of AP → end
/// 2. melee target in reach → strike the best one
/// 3. ranged target in sight → shoot the best one
/// 4. nothing attacked or moved yet → move towards the nearest enemy
/// 5. AP left and not already watching → overwatch
/// 6. otherwise end
///
/// Steps 2 and 3 stop after two attacks, so a unit that fires and still has
/// AP searches for a target once more before settling into overwatch.
#[derive(Debug, Clone, Copy, Default)]
pub struct AiPlanner;

impl AiPlanner {
    pub fn new() -> Self {
        Self
    }

    pub fn decide(
        &self,
        state: &SessionState,
        config: &GameConfig,
        unit: UnitId,
        memo: &AiMemo,
    ) -> AiDecision {
        let Some(unit) = state.unit(unit).filter(|unit| unit.is_alive()) else {
            return AiDecision::End;
        };
        if unit.ap == 0 {
            return AiDecision::End;
        }

        let ctx = AiContext::new(state, config, unit);

        if memo.attacks < MAX_ATTACKS_PER_ACTIVATION {
            for kind in [AttackKind::Melee, AttackKind::Ranged] {
                let candidates = match kind {
                    AttackKind::Melee => melee_targets(state, ctx.rules(), unit),
                    AttackKind::Ranged => ranged_targets(state, ctx.rules(), unit),
                };
                if let Some(target) = pick_best_target(&ctx, &candidates, kind) {
                    return AiDecision::Attack { target, kind };
                }
            }
        }

        if memo.attacks == 0 && !memo.moved {
            let destination = ctx
                .nearest_enemy()
                .and_then(|enemy| find_best_move_tile(&ctx, enemy))
                .filter(|&tile| tile != unit.position);
            if let Some(destination) = destination {
                return AiDecision::Move { destination };
            }
        }

        if !unit.status.is_overwatch() {
            return AiDecision::Overwatch;
        }
        AiDecision::End
    }

    /// Preferred activation order for `faction`'s remaining units.
    pub fn choose_activation_order(
        &self,
        state: &SessionState,
        config: &GameConfig,
        faction: Faction,
    ) -> Vec<UnitId> {
        choose_activation_order(state, config, faction)
    }
}
