//! Human command handling.

use tactics_core::{
    ActionSet, AttackKind, Position, UnitId, available_actions, hit_chance, valid_targets,
};
use tracing::debug;

use super::resolve::Stance;
use super::{ActionKind, Command, CommandOutcome, GamePhase, IgnoreReason, TurnScheduler};
use crate::events::GameEvent;

type Handled = Result<(), IgnoreReason>;

impl TurnScheduler {
    /// Feeds one command into the phase machine.
    ///
    /// A command that does not fit the current phase or activation is dropped
    /// without touching the session and reported as
    /// [`CommandOutcome::Ignored`].
    pub fn submit(&mut self, command: Command) -> CommandOutcome {
        let handled = match command {
            Command::SelectUnit(unit) => self.select_unit(unit),
            Command::RequestMove(to) => self.request_move(to),
            Command::RequestAction(kind) => self.request_action(kind),
            Command::RequestTarget(at) => self.request_target(at),
            Command::HoverTile(at) => self.hover_tile(at),
            Command::Cancel => self.cancel(),
        };

        match handled {
            Ok(()) => CommandOutcome::Accepted,
            Err(reason) => {
                debug!(?command, phase = %self.phase, reason = reason.as_ref(), "command ignored");
                CommandOutcome::Ignored(reason)
            }
        }
    }

    fn expect_phase(&self, allowed: &[GamePhase]) -> Handled {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(IgnoreReason::WrongPhase(self.phase))
        }
    }

    fn active_id(&self) -> Result<UnitId, IgnoreReason> {
        self.active_unit().ok_or(IgnoreReason::NotActiveUnit)
    }

    fn select_unit(&mut self, unit: UnitId) -> Handled {
        self.expect_phase(&[GamePhase::PlayerSelectUnit])?;
        if self.active_id()? != unit {
            return Err(IgnoreReason::NotActiveUnit);
        }
        let Some((origin, move_points)) = self
            .state
            .unit(unit)
            .map(|state| (state.position, state.move_points))
        else {
            return Err(IgnoreReason::NotActiveUnit);
        };

        let range = self.state.grid.movement_range(origin, move_points);
        if let Some(activation) = self.active.as_mut() {
            activation.range = range.clone();
        }
        self.emit(GameEvent::UnitSelected { unit });
        self.emit(GameEvent::MovementRangeShown { unit, tiles: range });
        self.set_phase(GamePhase::PlayerMovement);
        self.offer_actions(unit);
        Ok(())
    }

    fn request_move(&mut self, to: Position) -> Handled {
        self.expect_phase(&[GamePhase::PlayerMovement])?;
        let unit = self.active_id()?;
        let Some(origin) = self.state.unit(unit).map(|state| state.position) else {
            return Err(IgnoreReason::NotActiveUnit);
        };
        let in_range = self.active.as_ref().is_some_and(|activation| {
            activation
                .range
                .iter()
                .any(|tile| tile.position == to && tile.cost > 0)
        });
        if !in_range || to == origin {
            return Err(IgnoreReason::Unreachable);
        }

        let Some(path) = self.state.grid.find_path(origin, to, false) else {
            let tiles = self
                .active
                .as_ref()
                .map(|activation| activation.range.clone())
                .unwrap_or_default();
            self.emit(GameEvent::MovementRangeShown { unit, tiles });
            return Err(IgnoreReason::NoPath);
        };

        let alive = self.perform_move(unit, path);
        if self.settle() {
            return Ok(());
        }
        let ap_left = self.state.unit(unit).map_or(0, |state| state.ap);
        if !alive || ap_left == 0 {
            self.close_activation(unit);
        } else {
            self.set_phase(GamePhase::PlayerAction);
            self.offer_actions(unit);
        }
        Ok(())
    }

    fn request_action(&mut self, kind: ActionKind) -> Handled {
        self.expect_phase(&[GamePhase::PlayerMovement, GamePhase::PlayerAction])?;
        let unit = self.active_id()?;
        if !self.actions_for(unit).contains(kind.required()) {
            return Err(IgnoreReason::ActionUnavailable);
        }

        match kind {
            ActionKind::Shoot | ActionKind::Melee => {
                let Some(attack) = kind.attack_kind() else {
                    return Err(IgnoreReason::ActionUnavailable);
                };
                let targets = self
                    .state
                    .unit(unit)
                    .map(|state| valid_targets(&self.state, &self.config.combat, state, attack))
                    .unwrap_or_default();
                if let Some(activation) = self.active.as_mut() {
                    activation.attack = Some(attack);
                    activation.targets = targets.clone();
                }
                self.set_phase(GamePhase::PlayerTargetSelect);
                self.emit(GameEvent::TargetsOffered {
                    unit,
                    kind: attack,
                    targets,
                });
            }
            ActionKind::Overwatch => {
                self.apply_stance(unit, Stance::Overwatch);
                self.close_activation(unit);
            }
            ActionKind::Hunker => {
                self.apply_stance(unit, Stance::Hunker);
                self.close_activation(unit);
            }
            ActionKind::EndTurn => self.close_activation(unit),
        }
        Ok(())
    }

    fn request_target(&mut self, at: Position) -> Handled {
        self.expect_phase(&[GamePhase::PlayerTargetSelect])?;
        let unit = self.active_id()?;
        let (target, kind) = self.offered_target_at(at)?;

        self.set_phase(GamePhase::CombatResolutionWait);
        self.resolve_attack(unit, target, kind);
        if let Some(activation) = self.active.as_mut() {
            activation.clear_targeting();
        }
        if self.settle() {
            return Ok(());
        }

        let can_continue = self
            .state
            .unit(unit)
            .is_some_and(|state| state.is_alive() && state.ap > 0);
        if can_continue {
            self.set_phase(GamePhase::PlayerAction);
            self.offer_actions(unit);
        } else {
            self.close_activation(unit);
        }
        Ok(())
    }

    fn hover_tile(&mut self, at: Position) -> Handled {
        self.expect_phase(&[GamePhase::PlayerMovement, GamePhase::PlayerTargetSelect])?;
        let unit = self.active_id()?;

        if self.phase == GamePhase::PlayerMovement {
            let origin = self
                .state
                .unit(unit)
                .map(|state| state.position)
                .ok_or(IgnoreReason::NotActiveUnit)?;
            let in_range = self.active.as_ref().is_some_and(|activation| {
                activation
                    .range
                    .iter()
                    .any(|tile| tile.position == at && tile.cost > 0)
            });
            let path = in_range
                .then(|| self.state.grid.find_path(origin, at, false))
                .flatten()
                .ok_or(IgnoreReason::NothingToPreview)?;
            self.emit(GameEvent::PathPreview { unit, path });
            return Ok(());
        }

        let (target, kind) = self
            .offered_target_at(at)
            .map_err(|_| IgnoreReason::NothingToPreview)?;
        let breakdown = match (self.state.unit(unit), self.state.unit(target)) {
            (Some(attacker), Some(defender)) => hit_chance(
                &self.state.grid,
                &self.config.combat,
                attacker,
                defender,
                kind,
            ),
            _ => return Err(IgnoreReason::NothingToPreview),
        };
        self.emit(GameEvent::HitPreview {
            attacker: unit,
            target,
            breakdown,
        });
        Ok(())
    }

    fn cancel(&mut self) -> Handled {
        self.expect_phase(&[GamePhase::PlayerTargetSelect, GamePhase::PlayerAction])?;
        let unit = self.active_id()?;

        if self.phase == GamePhase::PlayerTargetSelect {
            if let Some(activation) = self.active.as_mut() {
                activation.clear_targeting();
            }
            self.emit(GameEvent::HighlightsCleared { unit });
            self.set_phase(GamePhase::PlayerAction);
            self.offer_actions(unit);
        } else {
            self.emit(GameEvent::HighlightsCleared { unit });
        }
        Ok(())
    }

    /// The offered target standing on `at`, with the attack it was offered
    /// for.
    fn offered_target_at(
        &self,
        at: Position,
    ) -> Result<(UnitId, AttackKind), IgnoreReason> {
        let activation = self.active.as_ref().ok_or(IgnoreReason::NotActiveUnit)?;
        let kind = activation.attack.ok_or(IgnoreReason::InvalidTarget)?;
        self.state
            .grid
            .occupant(at)
            .filter(|target| activation.targets.contains(target))
            .map(|target| (target, kind))
            .ok_or(IgnoreReason::InvalidTarget)
    }

    /// Menu for the active unit in the current phase. Moving is only on
    /// offer while the movement range is shown.
    fn actions_for(&self, unit: UnitId) -> ActionSet {
        let moved = self
            .active
            .as_ref()
            .is_some_and(|activation| activation.moved);
        let mut actions = available_actions(&self.state, &self.config.combat, unit, moved);
        if self.phase != GamePhase::PlayerMovement {
            actions.remove(ActionSet::MOVE);
        }
        actions
    }

    fn offer_actions(&mut self, unit: UnitId) {
        let actions = self.actions_for(unit);
        self.emit(GameEvent::ActionsOffered { unit, actions });
    }
}
