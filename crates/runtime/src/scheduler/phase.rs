//! Phase machine vocabulary.

use serde::{Deserialize, Serialize};
use tactics_core::Faction;

/// Where the session is in its turn flow.
///
/// ```text
/// Loading → PlayerSelectUnit → PlayerMovement → PlayerAction
///         → PlayerTargetSelect → CombatResolutionWait → (PlayerAction | end)
/// AiThinking → AiActing → end
/// end → next activation | TurnTransition → …
/// GameOver (terminal)
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GamePhase {
    Loading,
    PlayerSelectUnit,
    PlayerMovement,
    PlayerAction,
    PlayerTargetSelect,
    CombatResolutionWait,
    AiThinking,
    AiActing,
    TurnTransition,
    GameOver,
}

impl GamePhase {
    /// Phases in which a human command may be accepted.
    pub fn awaits_player(self) -> bool {
        matches!(
            self,
            GamePhase::PlayerSelectUnit
                | GamePhase::PlayerMovement
                | GamePhase::PlayerAction
                | GamePhase::PlayerTargetSelect
        )
    }
}

/// Who issues commands for a faction.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Controller {
    Human,
    #[default]
    Ai,
}

/// How a finished skirmish ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Victory(Faction),
    /// Both factions were eliminated by the same resolution.
    Draw,
}

impl Outcome {
    pub fn winner(self) -> Option<Faction> {
        match self {
            Outcome::Victory(faction) => Some(faction),
            Outcome::Draw => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Victory(faction) => write!(f, "{faction} victory"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}
