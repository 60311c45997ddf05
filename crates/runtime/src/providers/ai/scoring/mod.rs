//! Scoring functions for the rule-based opponent.
//!
//! Every decision the opponent makes is an argmax over a weighted sum:
//!
//! 1. **Activation order** ([`order`]): which squad member should act first
//! 2. **Targets** ([`targets`]): who to shoot or strike
//! 3. **Tiles** ([`tiles`]): where to move before engaging
//!
//! Weights come from [`AiTuning`](tactics_core::AiTuning). All scoring is
//! deterministic: ties are broken by enumeration order (roster order for
//! units, flood-fill discovery order for tiles), never by randomness.

pub mod order;
pub mod targets;
pub mod tiles;

pub use order::{activation_priority, choose_activation_order};
pub use targets::{TargetScore, pick_best_target, score_target};
pub use tiles::{TileScore, distance_band, find_best_move_tile, score_tile};
