//! Rule tables and tunable parameters.
//!
//! Every constant the grid, combat resolver and opponent read lives here so a
//! session can be rebalanced from a TOML file without touching code. The
//! [`Default`] implementations carry the canonical values.

/// Complete rule set for a skirmish.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub combat: CombatRules,
    pub unit: UnitTemplate,
    pub ai: AiTuning,
    pub map_bounds: MapBounds,
    /// Units spawned per faction.
    pub squad_size: usize,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Upper bound on cover candidates examined around a target (two
    /// orthogonal steps plus one diagonal).
    pub const MAX_COVER_CANDIDATES: usize = 3;
    /// Number of factions taking part in a skirmish.
    pub const FACTION_COUNT: usize = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SQUAD_SIZE: usize = 4;

    pub fn new() -> Self {
        Self {
            combat: CombatRules::default(),
            unit: UnitTemplate::default(),
            ai: AiTuning::default(),
            map_bounds: MapBounds::default(),
            squad_size: Self::DEFAULT_SQUAD_SIZE,
        }
    }

    pub fn with_squad_size(mut self, squad_size: usize) -> Self {
        self.squad_size = squad_size;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Accuracy, damage and range parameters for the combat resolver.
///
/// Probabilities are expressed as fractions in `[0, 1]`; penalties are
/// negative and added to the base accuracy.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatRules {
    pub base_ranged_accuracy: f32,
    pub base_melee_accuracy: f32,
    pub flanking_bonus: f32,
    /// Applied when the target sits at `ranged_range - 1` or further.
    pub near_max_range_penalty: f32,
    pub half_cover_penalty: f32,
    pub full_cover_penalty: f32,
    pub min_hit_chance: f32,
    pub max_hit_chance: f32,
    pub ranged_range: u32,
    pub melee_range: u32,
    pub overwatch_range: u32,
    pub ranged_damage: u32,
    pub melee_damage: u32,
}

impl CombatRules {
    pub const DEFAULT_RANGED_RANGE: u32 = 8;
    pub const DEFAULT_MELEE_RANGE: u32 = 1;
    pub const DEFAULT_OVERWATCH_RANGE: u32 = 8;
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            base_ranged_accuracy: 0.75,
            base_melee_accuracy: 0.85,
            flanking_bonus: 0.20,
            near_max_range_penalty: -0.10,
            half_cover_penalty: -0.25,
            full_cover_penalty: -0.40,
            min_hit_chance: 0.05,
            max_hit_chance: 0.95,
            ranged_range: Self::DEFAULT_RANGED_RANGE,
            melee_range: Self::DEFAULT_MELEE_RANGE,
            overwatch_range: Self::DEFAULT_OVERWATCH_RANGE,
            ranged_damage: 3,
            melee_damage: 4,
        }
    }
}

/// Baseline stats every spawned unit starts with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UnitTemplate {
    pub max_hp: u32,
    pub max_ap: u32,
    /// Tiles a unit may cover with one move command.
    pub move_points: u32,
}

impl Default for UnitTemplate {
    fn default() -> Self {
        Self {
            max_hp: 10,
            max_ap: 2,
            move_points: 5,
        }
    }
}

/// Weights used by the rule-based opponent.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AiTuning {
    // ----- target scoring -----
    pub low_hp_weight: f32,
    pub close_weight: f32,
    pub no_cover_weight: f32,

    // ----- move-tile scoring -----
    /// Inclusive distance window the opponent prefers to shoot from.
    pub preferred_min_distance: u32,
    pub preferred_max_distance: u32,
    pub window_reward: f32,
    /// Reward lost per tile closer than the preferred window.
    pub too_close_taper: f32,
    pub in_range_reward: f32,
    /// Reward lost per tile past the preferred window while still in range.
    pub in_range_taper: f32,
    pub out_of_range_reward: f32,
    pub out_of_range_taper: f32,
    pub los_bonus: f32,
    pub full_cover_bonus: f32,
    /// Fraction of `full_cover_bonus` granted for half cover.
    pub half_cover_factor: f32,
    /// Penalty per adjacent enemy beyond the first.
    pub crowding_penalty: f32,
    pub relocation_tiebreak: f32,
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            low_hp_weight: 40.0,
            close_weight: 30.0,
            no_cover_weight: 30.0,
            preferred_min_distance: 3,
            preferred_max_distance: 6,
            window_reward: 100.0,
            too_close_taper: 20.0,
            in_range_reward: 60.0,
            in_range_taper: 5.0,
            out_of_range_reward: 20.0,
            out_of_range_taper: 1.0,
            los_bonus: 50.0,
            full_cover_bonus: 30.0,
            half_cover_factor: 0.6,
            crowding_penalty: 15.0,
            relocation_tiebreak: 0.01,
        }
    }
}

/// Accepted grid dimensions for loaded maps (inclusive).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapBounds {
    pub min_size: u32,
    pub max_size: u32,
}

impl MapBounds {
    pub fn contains(&self, size: u32) -> bool {
        (self.min_size..=self.max_size).contains(&size)
    }
}

impl Default for MapBounds {
    fn default() -> Self {
        Self {
            min_size: 6,
            max_size: 40,
        }
    }
}
