//! Rule set loader.

use std::path::Path;

use tactics_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
///
/// Every table and field is optional; omitted values keep their defaults, so
/// a rules file only needs to list what it rebalances:
///
/// ```toml
/// squad_size = 5
///
/// [combat]
/// flanking_bonus = 0.25
///
/// [ai]
/// preferred_max_distance = 5
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from a TOML string.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.squad_size == 0 {
            anyhow::bail!("squad_size must be at least 1");
        }
        if config.map_bounds.min_size > config.map_bounds.max_size {
            anyhow::bail!(
                "map_bounds.min_size ({}) exceeds max_size ({})",
                config.map_bounds.min_size,
                config.map_bounds.max_size
            );
        }

        tracing::debug!(squad_size = config.squad_size, "loaded rules");
        Ok(config)
    }
}
