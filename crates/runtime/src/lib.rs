//! Runtime orchestration for the squad-tactics simulation.
//!
//! This crate wires the deterministic rules in `tactics-core` into a playable
//! session: a phase machine that hands out activations, a rule-based
//! opponent, typed events, and an async worker that hosts the session behind
//! a cloneable handle. Consumers embed [`Runtime`] to drive a skirmish and
//! subscribe to events through [`RuntimeHandle`], or drive a
//! [`TurnScheduler`] directly when they want synchronous control.
//!
//! Modules are organized by responsibility:
//! - [`scheduler`] hosts the phase machine, commands and activation queue
//! - [`providers`] contains the rule-based opponent
//! - [`events`] provides the typed events and the topic-based bus
//! - [`session`] assembles a scheduler from a map and a rule set
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`workers`] keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod providers;
pub mod runtime;
pub mod scheduler;
pub mod session;

mod workers;

pub use api::{FixedDelay, NoPacing, Pacer, Progress, Result, RuntimeError, RuntimeHandle};
pub use events::{EventBus, GameEvent, Topic};
pub use providers::{AiDecision, AiMemo, AiPlanner};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use scheduler::{
    ActionKind, ActivationQueue, Command, CommandOutcome, Controller, GamePhase, IgnoreReason,
    Outcome, SessionSnapshot, TurnScheduler,
};
pub use session::SessionBuilder;
