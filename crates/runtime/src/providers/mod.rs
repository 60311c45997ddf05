//! Decision makers that drive units without human input.

pub mod ai;

pub use ai::{AiDecision, AiMemo, AiPlanner};
