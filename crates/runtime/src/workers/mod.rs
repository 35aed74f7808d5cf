//! Worker tasks that back the runtime orchestration.
//!
//! The session worker owns the authoritative game state, resolves inputs
//! against a staged copy, and commits once the presenter has played the
//! resulting cues.

mod session;

pub use session::Command;
pub(crate) use session::{SessionWorker, open_session};
