//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories and session setup
//! so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use revenge_core::CombatError;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("runtime requires oracles to be configured before building")]
    MissingOracles,

    #[error("failed to initialize combat session")]
    Initialization(#[source] CombatError),
}
