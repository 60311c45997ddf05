//! Unified error types surfaced by the runtime API.
//!
//! Covers session bootstrap (spawning squads on a loaded map) and worker
//! coordination. Commands the scheduler rejects are not errors; they come
//! back as [`CommandOutcome::Ignored`](crate::CommandOutcome::Ignored).
use thiserror::Error;
use tokio::sync::oneshot;

use tactics_content::MapError;
use tactics_core::{ErrorSeverity, Faction, GameError, StateError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runtime requires a session before building")]
    MissingSession,

    #[error("{faction} spawn zone has {available} walkable tiles, squad needs {required}")]
    SpawnZoneTooSmall {
        faction: Faction,
        available: usize,
        required: usize,
    },

    #[error("failed to place squad")]
    Spawn(#[from] StateError),

    #[error("map rejected")]
    Map(#[from] MapError),

    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        use RuntimeError::*;
        match self {
            Spawn(err) => err.severity(),
            Map(err) => err.severity(),
            MissingSession | SpawnZoneTooSmall { .. } => ErrorSeverity::Fatal,
            CommandChannelClosed | ReplyChannelClosed(_) | WorkerJoin(_) => {
                ErrorSeverity::Internal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use RuntimeError::*;
        match self {
            MissingSession => "RUNTIME_MISSING_SESSION",
            SpawnZoneTooSmall { .. } => "RUNTIME_SPAWN_ZONE_TOO_SMALL",
            Spawn(err) => err.error_code(),
            Map(err) => err.error_code(),
            CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
        }
    }
}
