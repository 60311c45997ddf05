//! Worker tasks that back the runtime orchestration.
//!
//! The session worker owns the scheduler and is the only task that touches
//! session state; everything else talks to it over channels.

mod session;

pub use session::{Request, SessionWorker};
