//! High-level runtime orchestrator.
//!
//! The runtime owns the session worker, wires up request/event channels, and
//! exposes a builder-based API for clients to drive a skirmish.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::api::{NoPacing, Pacer, Progress, Result, RuntimeError, RuntimeHandle};
use crate::events::{EventBus, GameEvent};
use crate::scheduler::TurnScheduler;
use crate::workers::{Request, SessionWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Advancing stops once the turn counter passes this value.
    pub max_turns: Option<u32>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 256,
            command_buffer_size: 32,
            max_turns: None,
        }
    }
}

/// Main runtime that hosts one skirmish.
///
/// Design: Runtime owns the worker task.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to every game event in emission order
    pub fn subscribe_events(&self) -> broadcast::Receiver<GameEvent> {
        self.handle.subscribe_all()
    }

    /// Advance opponent activations until the game ends, the turn cap is
    /// reached, or a human must act.
    pub async fn run(&self) -> Result<Progress> {
        loop {
            let progress = self.handle.advance().await?;
            if progress != Progress::Advanced {
                return Ok(progress);
            }
        }
    }

    /// Shutdown the runtime gracefully
    ///
    /// Waits for the worker to finish once every outstanding handle clone has
    /// been dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    scheduler: Option<TurnScheduler>,
    pacer: Option<Arc<dyn Pacer>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            scheduler: None,
            pacer: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide the session to host (required)
    pub fn scheduler(mut self, scheduler: TurnScheduler) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Set the presentation pacer (defaults to [`NoPacing`])
    pub fn pacer(mut self, pacer: impl Pacer + 'static) -> Self {
        self.pacer = Some(Arc::new(pacer));
        self
    }

    /// Stop advancing after this many turns
    pub fn max_turns(mut self, max_turns: u32) -> Self {
        self.config.max_turns = Some(max_turns);
        self
    }

    /// Build the runtime and spawn its worker. Must be called inside a tokio
    /// runtime.
    pub fn build(self) -> Result<Runtime> {
        let scheduler = self.scheduler.ok_or(RuntimeError::MissingSession)?;

        let (request_tx, request_rx) = mpsc::channel::<Request>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = RuntimeHandle::new(request_tx, event_bus.clone());

        let pacer = self.pacer.unwrap_or_else(|| Arc::new(NoPacing));
        let worker = SessionWorker::new(
            scheduler,
            request_rx,
            event_bus,
            pacer,
            self.config.max_turns,
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}
