//! Skirmish configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;

/// How the player squad is driven in a headless run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayerControl {
    /// Both squads are played by the rule-based opponent.
    #[default]
    Ai,
    /// The player squad is driven by a fixed command script through the handle.
    Scripted,
}

impl std::str::FromStr for PlayerControl {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ai" => Ok(PlayerControl::Ai),
            "scripted" | "script" => Ok(PlayerControl::Scripted),
            other => Err(format!("unknown player control `{other}`")),
        }
    }
}

/// Configuration required to bootstrap a headless skirmish.
#[derive(Clone, Debug)]
pub struct SkirmishConfig {
    pub map_path: PathBuf,
    pub rules_path: PathBuf,
    pub seed: Option<u64>,
    pub log_dir: Option<PathBuf>,
    pub max_turns: u32,
    pub player_control: PlayerControl,
}

impl Default for SkirmishConfig {
    fn default() -> Self {
        Self {
            map_path: PathBuf::from("data/maps/outpost.json"),
            rules_path: PathBuf::from("data/rules.toml"),
            seed: None,
            log_dir: None,
            max_turns: 50,
            player_control: PlayerControl::Ai,
        }
    }
}

impl SkirmishConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TACTICS_MAP` - Map JSON file (default: data/maps/outpost.json)
    /// - `TACTICS_RULES` - Rule set TOML file (default: data/rules.toml)
    /// - `TACTICS_SEED` - Session seed (default: random)
    /// - `TACTICS_LOG_DIR` - Directory for a log file (default: stderr only)
    /// - `TACTICS_MAX_TURNS` - Turn cap for the run (default: 50)
    /// - `TACTICS_PLAYER_CONTROL` - `ai` or `scripted` (default: ai)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("TACTICS_MAP") {
            config.map_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("TACTICS_RULES") {
            config.rules_path = PathBuf::from(path);
        }

        config.seed = parse(&lookup, "TACTICS_SEED");
        config.log_dir = lookup("TACTICS_LOG_DIR").map(PathBuf::from);

        if let Some(turns) = parse::<u32>(&lookup, "TACTICS_MAX_TURNS") {
            config.max_turns = turns.max(1);
        }
        if let Some(control) = parse(&lookup, "TACTICS_PLAYER_CONTROL") {
            config.player_control = control;
        }

        config
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.parse().ok()
}
