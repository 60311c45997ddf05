//! Rule-based opponent.
//!
//! The opponent sees the session through the same public queries a human
//! player's interface uses (targets, movement range, cover) and acts through
//! the same scheduler paths. It is a fixed scorer: no search, no learning.
//!
//! # Core Components
//!
//! - [`AiPlanner`]: one decision per call, driven by the scheduler
//! - [`AiContext`]: borrowed view of the session for one unit
//! - [`scoring`]: activation order, target and tile scoring

pub mod context;
pub mod planner;
pub mod scoring;

pub use context::AiContext;
pub use planner::{AiDecision, AiMemo, AiPlanner};
