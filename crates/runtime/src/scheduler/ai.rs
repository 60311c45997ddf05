//! Opponent activations.

use tactics_core::UnitId;
use tracing::{debug, trace};

use super::resolve::Stance;
use super::{GamePhase, TurnScheduler};
use crate::providers::{AiDecision, AiMemo};

impl TurnScheduler {
    /// Runs the pending opponent activation to completion.
    ///
    /// Returns false when no opponent activation is waiting, either because a
    /// human must act or because the game is over.
    pub fn tick(&mut self) -> bool {
        if self.phase != GamePhase::AiThinking {
            return false;
        }
        let Some(unit) = self.active_unit() else {
            return false;
        };

        self.set_phase(GamePhase::AiActing);
        self.run_ai_activation(unit);
        true
    }

    /// Asks the planner for decisions until it ends the activation.
    ///
    /// Each iteration either ends the loop, records an attack (at most two are
    /// asked for) or records the single move, so the loop is bounded.
    fn run_ai_activation(&mut self, unit: UnitId) {
        let mut memo = AiMemo::default();

        loop {
            let decision = self.planner.decide(&self.state, &self.config, unit, &memo);
            trace!(%unit, ?decision, ?memo, "ai decision");

            match decision {
                AiDecision::Attack { target, kind } => {
                    memo.attacks += 1;
                    self.resolve_attack(unit, target, kind);
                    if self.settle() {
                        return;
                    }
                }
                AiDecision::Move { destination } => {
                    memo.moved = true;
                    let origin = self.state.unit(unit).map(|state| state.position);
                    let path = origin
                        .and_then(|origin| self.state.grid.find_path(origin, destination, false))
                        .filter(|path| !path.is_empty());
                    let Some(path) = path else {
                        debug!(%unit, %destination, "ai move has no path");
                        continue;
                    };
                    let alive = self.perform_move(unit, path);
                    if self.settle() {
                        return;
                    }
                    if !alive {
                        break;
                    }
                }
                AiDecision::Overwatch => {
                    self.apply_stance(unit, Stance::Overwatch);
                    break;
                }
                AiDecision::End => break,
            }
        }

        self.close_activation(unit);
    }
}
