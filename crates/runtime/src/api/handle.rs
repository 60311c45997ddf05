//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving the session or streaming events from specific topics.
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc, oneshot};

use super::errors::{Result, RuntimeError};
use crate::events::{EventBus, GameEvent, Topic};
use crate::scheduler::{Command, CommandOutcome, Outcome, SessionSnapshot};
use crate::workers::Request;

/// What the session did in response to a start or advance request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Progress {
    /// An opponent activation ran.
    Advanced,
    /// A human-controlled unit is waiting for commands.
    AwaitingPlayer,
    /// Nothing to run right now.
    Idle,
    /// The configured turn cap was passed; the session stays frozen.
    TurnLimit { turn: u32 },
    Finished(Outcome),
}

impl Progress {
    /// Whether advancing again can make a difference.
    pub fn is_terminal(self) -> bool {
        matches!(self, Progress::TurnLimit { .. } | Progress::Finished(_))
    }
}

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    request_tx: mpsc::Sender<Request>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(request_tx: mpsc::Sender<Request>, event_bus: EventBus) -> Self {
        Self {
            request_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Request) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.request_tx
            .send(make(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Opens turn 1. Subscribe before calling this to see the whole log.
    pub async fn start(&self) -> Result<Progress> {
        self.request(|reply| Request::Start { reply }).await
    }

    /// Feeds a human command to the scheduler.
    pub async fn submit(&self, command: Command) -> Result<CommandOutcome> {
        self.request(|reply| Request::Submit { command, reply })
            .await
    }

    /// Runs the pending opponent activation, starting the session first if
    /// needed.
    pub async fn advance(&self) -> Result<Progress> {
        self.request(|reply| Request::Advance { reply }).await
    }

    /// Query the current session (read-only copy)
    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        self.request(|reply| Request::Snapshot { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use tactics_runtime::Topic;
    ///
    /// let mut combat_rx = handle.subscribe(Topic::Combat);
    /// while let Ok(event) = combat_rx.recv().await {
    ///     // Handle combat events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<GameEvent> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<GameEvent>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Every event, in emission order.
    pub fn subscribe_all(&self) -> broadcast::Receiver<GameEvent> {
        self.event_bus.subscribe_all()
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
