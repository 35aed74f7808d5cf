//! Runtime orchestration for the office revenge combat session.
//!
//! This crate wires together oracle access, progress repositories, the
//! presenter abstraction and the session worker into a cohesive runtime API.
//! Consumers embed [`Runtime`] to drive a session, subscribe to events, and
//! send inputs through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`workers`] keeps the session task internal to the crate
//! - [`oracle`] and [`repository`] provide data adapters reused by other crates
pub mod api;
pub mod events;
pub mod oracle;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{
    InputEvent, InputOutcome, NullPresenter, Presenter, Result, RuntimeError, RuntimeHandle,
};
pub use events::{CombatEvent, Event, EventBus, GameOutcome, ProgressEvent, Topic};
pub use oracle::{ConfigOracleImpl, ItemOracleImpl, OracleManager, RosterOracleImpl};
pub use repository::{
    FileProgressRepository, InMemoryProgressRepo, ProgressRepository, ProgressSnapshot,
    RepositoryError, StagedProgress,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
