//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive the game.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::info;

use game_content::ContentFactory;
use game_core::{GameConfig, PcgRng, RngOracle};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, SessionEvent, Topic};
use crate::repository::{InMemorySnapshotRepository, SnapshotRepository};
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            event_buffer_size: 256,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that orchestrates the game
///
/// Design: Runtime owns the worker and coordinates its lifetime.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    started: SessionEvent,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to events from a topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// How the game came up: fresh, or resumed from a snapshot.
    pub fn started(&self) -> &SessionEvent {
        &self.started
    }

    /// Save the game and stop the worker.
    pub async fn shutdown(self) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        // A worker that already stopped has nothing left to save.
        if self
            .handle
            .command_tx()
            .send(Command::Shutdown { reply: reply_tx })
            .await
            .is_ok()
        {
            reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?;
        }
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;
        info!("runtime stopped");
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    content_dir: Option<PathBuf>,
    repository: Option<Arc<dyn SnapshotRepository>>,
    rng: Option<Arc<dyn RngOracle>>,
    seed: Option<u64>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            content_dir: None,
            repository: None,
            rng: None,
            seed: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override only the game rules configuration
    pub fn game_config(mut self, game_config: GameConfig) -> Self {
        self.config.game_config = game_config;
        self
    }

    /// Load the game configuration from a content directory at build time.
    ///
    /// Takes precedence over [`game_config`](Self::game_config).
    pub fn content_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.content_dir = Some(dir.into());
        self
    }

    /// Where the game is saved. Defaults to an in-memory repository.
    pub fn repository(mut self, repository: impl SnapshotRepository + 'static) -> Self {
        self.repository = Some(Arc::new(repository));
        self
    }

    /// Share an existing repository with the runtime.
    pub fn shared_repository(mut self, repository: Arc<dyn SnapshotRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Randomness source. Defaults to [`PcgRng`].
    pub fn rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Some(Arc::new(rng));
        self
    }

    /// Seed for a new game. Ignored when a saved game is resumed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime> {
        let mut config = self.config;
        if let Some(dir) = &self.content_dir {
            config.game_config = ContentFactory::new(dir)
                .load_game_config()
                .map_err(|e| RuntimeError::Content(format!("{e:#}")))?;
        }
        config.game_config.validate()?;

        let repository: Arc<dyn SnapshotRepository> = match self.repository {
            Some(repository) => repository,
            None => Arc::new(InMemorySnapshotRepository::new()),
        };
        let rng: Arc<dyn RngOracle> = match self.rng {
            Some(rng) => rng,
            None => Arc::new(PcgRng),
        };

        let (session, started) = SimulationWorker::open_session(
            repository.as_ref(),
            &config.game_config,
            rng.as_ref(),
            self.seed,
        )?;

        let (command_tx, command_rx) = mpsc::channel::<Command>(config.command_buffer_size);
        let event_bus = EventBus::with_capacity(config.event_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let sim_worker = SimulationWorker::new(
            session,
            config.game_config,
            rng,
            repository,
            command_rx,
            event_bus,
        );

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            started,
            sim_worker_handle,
        })
    }
}
