//! Data-driven content definitions and loaders.
//!
//! This crate turns authored files into values the simulation consumes:
//! - Map layouts (JSON): grid size, spawn zones, props with cover
//! - Rule sets (TOML): combat numbers, unit template, opponent weights
//!
//! Content is validated here, before a session exists; a file that fails
//! validation aborts bootstrap and never produces a partial board.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult, MapDefinition, MapError, MapLoader, MapObject};
