//! Content loaders for reading game data from files.
//!
//! Maps are JSON ([`MapLoader`]); rule sets are TOML ([`ConfigLoader`]).

pub mod config;
pub mod map;

pub use config::ConfigLoader;
pub use map::{MapDefinition, MapError, MapLoader, MapObject};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
