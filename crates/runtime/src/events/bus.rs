//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::GameEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Phase changes, turn boundaries, activations, game over
    Turn,
    /// Selection, highlights, menus and previews meant for an input layer
    Interaction,
    /// Unit move steps and arrivals
    Movement,
    /// Attacks, reaction fire and their results
    Combat,
    /// Per-unit state changes (damage, death, status)
    Unit,
}

impl Topic {
    pub const ALL: [Topic; 5] = [
        Topic::Turn,
        Topic::Interaction,
        Topic::Movement,
        Topic::Combat,
        Topic::Unit,
    ];

    const fn slot(self) -> usize {
        self as usize
    }
}

impl GameEvent {
    pub fn topic(&self) -> Topic {
        match self {
            GameEvent::PhaseChanged { .. }
            | GameEvent::TurnStarted { .. }
            | GameEvent::TurnEnded { .. }
            | GameEvent::ActivationStarted { .. }
            | GameEvent::GameOver { .. } => Topic::Turn,

            GameEvent::UnitSelected { .. }
            | GameEvent::UnitDeselected { .. }
            | GameEvent::MovementRangeShown { .. }
            | GameEvent::PathPreview { .. }
            | GameEvent::ActionsOffered { .. }
            | GameEvent::TargetsOffered { .. }
            | GameEvent::HitPreview { .. }
            | GameEvent::HighlightsCleared { .. } => Topic::Interaction,

            GameEvent::UnitMoveStep { .. } | GameEvent::UnitMoveComplete { .. } => {
                Topic::Movement
            }

            GameEvent::OverwatchFired { .. }
            | GameEvent::CombatDamage { .. }
            | GameEvent::CombatMiss { .. }
            | GameEvent::CombatKill { .. }
            | GameEvent::CombatComplete { .. } => Topic::Combat,

            GameEvent::UnitDamaged { .. }
            | GameEvent::UnitDied { .. }
            | GameEvent::UnitStatusChanged { .. }
            | GameEvent::UnitActivated { .. } => Topic::Unit,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. [`EventBus::subscribe_all`] yields every event in
/// the exact order the scheduler emitted it, which per-topic receivers cannot
/// guarantee across topics.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<[broadcast::Sender<GameEvent>; Topic::ALL.len()]>,
    firehose: broadcast::Sender<GameEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: Arc::new(std::array::from_fn(|_| broadcast::channel(capacity).0)),
            firehose: broadcast::channel(capacity).0,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: GameEvent) {
        let topic = event.topic();

        if self.channels[topic.slot()].send(event.clone()).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
        let _ = self.firehose.send(event);
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<GameEvent> {
        self.channels[topic.slot()].subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<GameEvent>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    /// Subscribe to every event, in emission order.
    pub fn subscribe_all(&self) -> broadcast::Receiver<GameEvent> {
        self.firehose.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
