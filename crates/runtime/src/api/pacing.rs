//! Presentation pacing for the session worker.
//!
//! The worker publishes events as soon as the scheduler emits them. A
//! [`Pacer`] lets an embedding client slow that stream down to match its
//! animations. It is awaited at two points: after every unit move step and
//! after every completed attack. The session state has already changed by
//! then, so pacing never splits an attack or a move step in half.
use std::time::Duration;

use async_trait::async_trait;
use tactics_core::{AttackResult, Position, UnitId};

/// Hooks the worker awaits while flushing events.
///
/// Both methods default to returning immediately.
#[async_trait]
pub trait Pacer: Send + Sync {
    /// `unit` has just arrived on `position`.
    async fn step_arrived(&self, _unit: UnitId, _position: Position) {}

    /// An attack (direct or reaction fire) has been resolved.
    async fn attack_resolved(&self, _result: &AttackResult) {}
}

/// Publishes events as fast as they come. Used by headless runs and tests.
pub struct NoPacing;

#[async_trait]
impl Pacer for NoPacing {}

/// Sleeps a fixed time at each suspension point.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    pub step: Duration,
    pub attack: Duration,
}

impl FixedDelay {
    pub fn new(step: Duration, attack: Duration) -> Self {
        Self { step, attack }
    }
}

#[async_trait]
impl Pacer for FixedDelay {
    async fn step_arrived(&self, _unit: UnitId, _position: Position) {
        tokio::time::sleep(self.step).await;
    }

    async fn attack_resolved(&self, _result: &AttackResult) {
        tokio::time::sleep(self.attack).await;
    }
}
