//! Session worker that owns the authoritative [`TurnScheduler`].
//!
//! Receives requests from [`RuntimeHandle`](crate::RuntimeHandle), feeds them
//! to the scheduler, and publishes the resulting events on the
//! [`EventBus`], awaiting the [`Pacer`] at each suspension point.

use std::sync::Arc;

use tactics_core::{AttackResult, Position, UnitId};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::api::{Pacer, Progress};
use crate::events::{EventBus, GameEvent};
use crate::scheduler::{Command, CommandOutcome, GamePhase, SessionSnapshot, TurnScheduler};

/// Requests that can be sent to the session worker.
pub enum Request {
    /// Leave the loading phase and publish the first turn.
    Start { reply: oneshot::Sender<Progress> },
    /// Feed a human command to the scheduler.
    Submit {
        command: Command,
        reply: oneshot::Sender<CommandOutcome>,
    },
    /// Run the pending opponent activation, if any.
    Advance { reply: oneshot::Sender<Progress> },
    /// Copy of the current session (read-only).
    Snapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
}

/// Background task that processes session requests.
pub struct SessionWorker {
    scheduler: TurnScheduler,
    request_rx: mpsc::Receiver<Request>,
    event_bus: EventBus,
    pacer: Arc<dyn Pacer>,
    max_turns: Option<u32>,
}

impl SessionWorker {
    pub fn new(
        scheduler: TurnScheduler,
        request_rx: mpsc::Receiver<Request>,
        event_bus: EventBus,
        pacer: Arc<dyn Pacer>,
        max_turns: Option<u32>,
    ) -> Self {
        info!(
            units = scheduler.state().units().len(),
            ?max_turns,
            "SessionWorker initialized"
        );
        Self {
            scheduler,
            request_rx,
            event_bus,
            pacer,
            max_turns,
        }
    }

    /// Main worker loop. Ends when every handle has been dropped.
    pub async fn run(mut self) {
        while let Some(request) = self.request_rx.recv().await {
            self.handle_request(request).await;
        }
        debug!("session worker stopped");
    }

    async fn handle_request(&mut self, request: Request) {
        match request {
            Request::Start { reply } => {
                self.scheduler.start();
                self.flush().await;
                if reply.send(self.progress(false)).is_err() {
                    debug!("Start reply channel closed (caller dropped)");
                }
            }
            Request::Submit { command, reply } => {
                let outcome = self.scheduler.submit(command);
                self.flush().await;
                if reply.send(outcome).is_err() {
                    debug!("Submit reply channel closed (caller dropped)");
                }
            }
            Request::Advance { reply } => {
                let progress = self.advance().await;
                if reply.send(progress).is_err() {
                    debug!("Advance reply channel closed (caller dropped)");
                }
            }
            Request::Snapshot { reply } => {
                if reply.send(self.scheduler.snapshot()).is_err() {
                    debug!("Snapshot reply channel closed (caller dropped)");
                }
            }
        }
    }

    async fn advance(&mut self) -> Progress {
        if self.scheduler.phase() == GamePhase::Loading {
            self.scheduler.start();
            self.flush().await;
        }
        if self.turn_limit_reached() {
            return self.progress(false);
        }
        let ticked = self.scheduler.tick();
        self.flush().await;
        self.progress(ticked)
    }

    fn turn_limit_reached(&self) -> bool {
        self.max_turns
            .is_some_and(|limit| self.scheduler.turn() > limit)
    }

    fn progress(&self, ticked: bool) -> Progress {
        if let Some(outcome) = self.scheduler.outcome() {
            return Progress::Finished(outcome);
        }
        if self.turn_limit_reached() {
            return Progress::TurnLimit {
                turn: self.scheduler.turn(),
            };
        }
        if ticked {
            Progress::Advanced
        } else if self.scheduler.phase().awaits_player() {
            Progress::AwaitingPlayer
        } else {
            Progress::Idle
        }
    }

    /// Publishes every pending scheduler event in order, pausing at the
    /// pacer's suspension points.
    async fn flush(&mut self) {
        let events: Vec<GameEvent> = self.scheduler.drain_events().collect();
        for event in events {
            let pause = match &event {
                GameEvent::UnitMoveStep { unit, to, .. } => Some(Pause::Step(*unit, *to)),
                GameEvent::CombatComplete { result } => Some(Pause::Attack(*result)),
                _ => None,
            };
            self.event_bus.publish(event);
            match pause {
                Some(Pause::Step(unit, position)) => self.pacer.step_arrived(unit, position).await,
                Some(Pause::Attack(result)) => self.pacer.attack_resolved(&result).await,
                None => {}
            }
        }
    }
}

enum Pause {
    Step(UnitId, Position),
    Attack(AttackResult),
}
