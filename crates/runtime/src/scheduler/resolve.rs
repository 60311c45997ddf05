//! State-changing steps shared by human and opponent activations.
//!
//! Both paths validate their input first and then call into here, so a move
//! or an attack produces the same events whoever ordered it.

use tactics_core::{
    AttackKind, AttackResult, Position, UnitId, UnitStatus, check_overwatch, execute_attack,
    execute_overwatch_shot, set_hunker, set_overwatch,
};
use tracing::{debug, warn};

use super::TurnScheduler;
use crate::events::GameEvent;

/// Stance a unit can take to end its activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Stance {
    Overwatch,
    Hunker,
}

impl TurnScheduler {
    /// Walks `unit` along `path` one tile at a time, paying one AP up front.
    ///
    /// After every step each enemy watcher whose cone covers the move takes
    /// its reaction shot, in roster order. Movement stops as soon as the
    /// mover dies. Returns whether the mover survived.
    pub(super) fn perform_move(&mut self, unit: UnitId, path: Vec<Position>) -> bool {
        if let Some(mover) = self.state.unit_mut(unit) {
            mover.spend_ap();
        }
        if let Some(activation) = self.active.as_mut().filter(|a| a.unit == unit) {
            activation.moved = true;
        }

        let mut alive = true;
        for to in path {
            let Some(from) = self.state.unit(unit).map(|mover| mover.position) else {
                break;
            };
            if !self.state.relocate(unit, to) {
                warn!(%unit, %from, %to, "move step rejected");
                break;
            }
            self.emit(GameEvent::UnitMoveStep { unit, from, to });

            let watchers = check_overwatch(&self.state, &self.config.combat, unit, from, to);
            for watcher in watchers {
                self.emit(GameEvent::OverwatchFired {
                    watcher,
                    target: unit,
                });
                match execute_overwatch_shot(
                    &mut self.state,
                    &self.config.combat,
                    &mut self.rolls,
                    watcher,
                    unit,
                ) {
                    Ok(result) => {
                        self.report_attack(&result);
                        self.emit(GameEvent::UnitStatusChanged {
                            unit: watcher,
                            status: UnitStatus::Activated,
                        });
                    }
                    Err(err) => warn!(%watcher, error = %err, "reaction shot failed"),
                }

                alive = self.state.unit(unit).is_some_and(|mover| mover.is_alive());
                if !alive {
                    break;
                }
            }
            if !alive {
                break;
            }
        }

        let position = self
            .state
            .unit(unit)
            .map(|mover| mover.position)
            .unwrap_or_default();
        debug!(%unit, %position, interrupted = !alive, "move finished");
        self.emit(GameEvent::UnitMoveComplete {
            unit,
            position,
            interrupted: !alive,
        });
        alive
    }

    /// Resolves one attack and reports it. Returns `None` only when either
    /// unit is unknown, which validated callers never cause.
    pub(super) fn resolve_attack(
        &mut self,
        attacker: UnitId,
        target: UnitId,
        kind: AttackKind,
    ) -> Option<AttackResult> {
        match execute_attack(
            &mut self.state,
            &self.config.combat,
            &mut self.rolls,
            attacker,
            target,
            kind,
        ) {
            Ok(result) => {
                debug!(
                    %attacker,
                    %target,
                    %kind,
                    chance = result.breakdown.chance,
                    roll = result.roll,
                    hit = result.hit,
                    "attack resolved"
                );
                self.report_attack(&result);
                Some(result)
            }
            Err(err) => {
                warn!(%attacker, %target, error = %err, "attack failed");
                None
            }
        }
    }

    /// Puts `unit` into a stance and reports the status change.
    pub(super) fn apply_stance(&mut self, unit: UnitId, stance: Stance) {
        let status = match stance {
            Stance::Overwatch => {
                set_overwatch(&mut self.state, unit).map(|cone| UnitStatus::Overwatch { cone })
            }
            Stance::Hunker => set_hunker(&mut self.state, unit).map(|()| UnitStatus::Hunkered),
        };
        match status {
            Ok(status) => self.emit(GameEvent::UnitStatusChanged { unit, status }),
            Err(err) => warn!(%unit, error = %err, "stance rejected"),
        }
    }

    fn report_attack(&mut self, result: &AttackResult) {
        let AttackResult {
            attacker, target, ..
        } = *result;

        if result.hit {
            self.emit(GameEvent::CombatDamage {
                attacker,
                target,
                damage: result.damage,
                hp_left: result.target_hp,
            });
            self.emit(GameEvent::UnitDamaged {
                unit: target,
                amount: result.damage,
                hp: result.target_hp,
            });
            if result.killed {
                self.emit(GameEvent::CombatKill {
                    attacker,
                    target,
                    position: result.target_position,
                });
                self.emit(GameEvent::UnitDied {
                    unit: target,
                    position: result.target_position,
                });
            }
        } else {
            self.emit(GameEvent::CombatMiss {
                attacker,
                target,
                chance: result.breakdown.chance,
                roll: result.roll,
            });
        }
        self.emit(GameEvent::CombatComplete { result: *result });
    }
}
