//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on scheduling and workers.

pub mod errors;
pub mod handle;
pub mod pacing;

pub use errors::{Result, RuntimeError};
pub use handle::{Progress, RuntimeHandle};
pub use pacing::{FixedDelay, NoPacing, Pacer};
