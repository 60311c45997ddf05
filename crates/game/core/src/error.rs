//! Common error infrastructure for tactics-core.
//!
//! Domain-specific errors live next to the code that raises them (for example
//! [`StateError`](crate::state::StateError) for placement failures). They all
//! implement [`GameError`] so callers can classify failures uniformly.
//!
//! Most of the core is infallible on purpose: out-of-bounds geometry queries
//! return `None`/`false`, and commands that are illegal in the current phase
//! are ignored by the scheduler rather than reported. Errors are reserved for
//! bootstrap problems that must abort a session.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input that should be rejected without retry.
    ///
    /// Examples: spawn tile outside the grid, unknown unit id
    Validation,

    /// Unexpected state inconsistency. Indicates a bug.
    ///
    /// Examples: occupancy table disagrees with a unit's position
    Internal,

    /// Session cannot be started or continued.
    ///
    /// Examples: a spawn zone too small for its squad
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all tactics-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for log filtering and assertions in tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
