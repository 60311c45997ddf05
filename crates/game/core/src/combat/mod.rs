//! Combat resolution.
//!
//! Pure functions over [`SessionState`](crate::state::SessionState): nothing
//! here logs, schedules or emits events. The scheduler calls in with validated
//! inputs and turns the returned results into events.
//!
//! - [`hit_chance`]: accuracy breakdown for an attacker/target pair
//! - [`valid_targets`]: who a unit can shoot or strike
//! - [`execute_attack`]: the single path that applies damage and death
//! - [`set_overwatch`] / [`set_hunker`] / [`check_overwatch`]: stances and
//!   reaction fire
//! - [`available_actions`]: the action menu for a unit

pub mod available;
pub mod hit;
pub mod overwatch;
pub mod result;
pub mod targets;

pub use available::{ActionSet, available_actions};
pub use hit::{AttackKind, HitBreakdown, hit_chance};
pub use overwatch::{check_overwatch, execute_overwatch_shot, set_hunker, set_overwatch};
pub use result::{AttackResult, execute_attack};
pub use targets::{melee_targets, ranged_targets, valid_targets};
