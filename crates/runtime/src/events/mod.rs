//! Topic-based event bus for runtime events.
//!
//! The scheduler queues [`GameEvent`]s as it resolves commands; the session
//! worker drains that queue and publishes each event on its [`Topic`], so
//! consumers can subscribe only to the topics they need.

mod bus;
mod game_event;

pub use bus::{EventBus, Topic};
pub use game_event::GameEvent;
