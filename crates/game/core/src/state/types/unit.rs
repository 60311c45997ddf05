use crate::config::UnitTemplate;

use super::{Direction, Position, UnitId};

/// Side a unit fights for.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Faction {
    Player,
    Enemy,
}

impl Faction {
    pub const ALL: [Faction; 2] = [Faction::Player, Faction::Enemy];

    pub const fn opponent(self) -> Self {
        match self {
            Faction::Player => Faction::Enemy,
            Faction::Enemy => Faction::Player,
        }
    }
}

/// Lifecycle status of a unit.
///
/// The overwatch cone lives inside the `Overwatch` variant, so a cone can only
/// exist while the unit is actually on overwatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum UnitStatus {
    Ready,
    Activated,
    /// Watching the forward half-plane of the recorded facing.
    Overwatch { cone: Direction },
    Hunkered,
    Dead,
}

impl UnitStatus {
    pub const fn is_overwatch(self) -> bool {
        matches!(self, UnitStatus::Overwatch { .. })
    }

    /// Stances that survive the end of an activation.
    pub const fn is_stance(self) -> bool {
        matches!(self, UnitStatus::Overwatch { .. } | UnitStatus::Hunkered)
    }
}

/// Authoritative per-unit state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitState {
    pub id: UnitId,
    pub faction: Faction,
    pub position: Position,
    pub hp: u32,
    pub max_hp: u32,
    pub ap: u32,
    pub max_ap: u32,
    pub move_points: u32,
    pub status: UnitStatus,
    /// Set once the unit's activation for the current turn has finished.
    pub activated: bool,
    pub facing: Direction,
}

impl UnitState {
    pub fn new(id: UnitId, faction: Faction, position: Position, template: &UnitTemplate) -> Self {
        Self {
            id,
            faction,
            position,
            hp: template.max_hp,
            max_hp: template.max_hp,
            ap: template.max_ap,
            max_ap: template.max_ap,
            move_points: template.move_points,
            status: UnitStatus::Ready,
            activated: false,
            facing: Direction::East,
        }
    }

    pub fn with_facing(mut self, facing: Direction) -> Self {
        self.facing = facing;
        self
    }

    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = hp.min(self.max_hp);
        self
    }

    pub fn with_ap(mut self, ap: u32) -> Self {
        self.ap = ap.min(self.max_ap);
        self
    }

    pub fn with_status(mut self, status: UnitStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.status != UnitStatus::Dead
    }

    pub fn is_enemy_of(&self, other: &UnitState) -> bool {
        self.faction != other.faction
    }

    /// Cone recorded when overwatch was set, if the unit is still watching.
    pub fn overwatch_cone(&self) -> Option<Direction> {
        match self.status {
            UnitStatus::Overwatch { cone } => Some(cone),
            _ => None,
        }
    }

    /// Spends one action point. Callers validate `ap > 0` beforehand; the
    /// saturating subtraction keeps the invariant even when they do not.
    pub fn spend_ap(&mut self) {
        self.ap = self.ap.saturating_sub(1);
    }

    /// Applies damage, clamping at zero. Returns true when this blow killed.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.hp = self.hp.saturating_sub(amount);
        if self.hp == 0 {
            self.status = UnitStatus::Dead;
            true
        } else {
            false
        }
    }

    /// Start-of-turn reset for living units.
    pub fn refresh(&mut self) {
        if !self.is_alive() {
            return;
        }
        self.activated = false;
        self.ap = self.max_ap;
        self.status = UnitStatus::Ready;
    }
}
