//! High-level runtime orchestrator.
//!
//! The runtime owns the session worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive a combat session.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use revenge_content::ContentSet;

use crate::api::{NullPresenter, Presenter, Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, Topic};
use crate::oracle::OracleManager;
use crate::repository::{InMemoryProgressRepo, ProgressRepository};
use crate::workers::{Command, SessionWorker, open_session};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Seed for every defense roll of the session.
    pub game_seed: u64,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Advance timing bars automatically at this period. `None` leaves
    /// ticking to `InputEvent::Tick`.
    pub tick_interval: Option<Duration>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_seed: 0,
            event_buffer_size: 100,
            command_buffer_size: 32,
            tick_interval: None,
        }
    }
}

/// Main runtime that orchestrates a combat session
///
/// Runtime owns the worker; [`RuntimeHandle`] provides a cloneable façade
/// for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Shutdown the runtime gracefully
    ///
    /// Waits for the worker, which stops once every handle clone is dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    oracles: Option<OracleManager>,
    repository: Option<Arc<dyn ProgressRepository>>,
    presenter: Option<Arc<dyn Presenter>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            oracles: None,
            repository: None,
            presenter: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn seed(mut self, game_seed: u64) -> Self {
        self.config.game_seed = game_seed;
        self
    }

    pub fn tick_interval(mut self, period: Duration) -> Self {
        self.config.tick_interval = Some(period);
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Shorthand for [`Self::oracles`] over a loaded content set.
    pub fn content(self, content: ContentSet) -> Self {
        self.oracles(OracleManager::from_content(content))
    }

    /// Progress storage. Defaults to an in-memory repository.
    pub fn repository(mut self, repository: Arc<dyn ProgressRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Cue consumer. Defaults to [`NullPresenter`].
    pub fn presenter(mut self, presenter: Arc<dyn Presenter>) -> Self {
        self.presenter = Some(presenter);
        self
    }

    /// Build the runtime
    ///
    /// Loads saved progress, initializes the session and spawns the worker.
    /// The opening cues (intro on a first run) start playing immediately.
    pub async fn build(self) -> Result<Runtime> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;
        let repository = self
            .repository
            .unwrap_or_else(|| Arc::new(InMemoryProgressRepo::new()));
        let presenter = self.presenter.unwrap_or_else(|| Arc::new(NullPresenter));

        let progress = repository.load()?;
        let (state, opening) = open_session(self.config.game_seed, &oracles, &progress)
            .map_err(RuntimeError::Initialization)?;

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let worker = SessionWorker::new(
            state,
            progress,
            opening,
            oracles,
            repository,
            presenter,
            command_rx,
            event_bus,
            self.config.tick_interval,
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
