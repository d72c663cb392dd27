//! Simulation worker that owns the authoritative [`game_core::Session`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), applies
//! intents, fires queued follow-up tasks when their real-time deadline
//! passes, saves after every change, and publishes what happened on the
//! [`EventBus`].

use std::ops::ControlFlow;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, Duration, Instant};
use tracing::{debug, error, info, warn};

use game_core::{
    GameConfig, GameEnv, GameEvent, GameState, Intent, RngOracle, Session, TransitionPhase,
};

use crate::api::{Result, RuntimeError};
use crate::events::{Event, EventBus, Rejected, SessionEvent};
use crate::repository::SnapshotRepository;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Apply a player intent and reply with its immediate events.
    Submit {
        intent: Intent,
        reply: oneshot::Sender<Result<Vec<GameEvent>>>,
    },
    /// Query the current game state (read-only).
    QueryState { reply: oneshot::Sender<GameState> },
    /// Query the active configuration.
    QueryConfig { reply: oneshot::Sender<GameConfig> },
    /// Swap the configuration used by every later intent and task.
    ReloadConfig {
        config: Box<GameConfig>,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Discard the game and start a fresh one.
    NewGame {
        seed: Option<u64>,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Save and stop.
    Shutdown { reply: oneshot::Sender<()> },
}

/// Background task that processes gameplay commands and timers.
pub struct SimulationWorker {
    session: Session,
    config: GameConfig,
    rng: Arc<dyn RngOracle>,
    repository: Arc<dyn SnapshotRepository>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    /// Real instant that corresponds to virtual time zero of `session`.
    epoch: Instant,
}

impl SimulationWorker {
    /// Creates a new simulation worker.
    pub fn new(
        session: Session,
        config: GameConfig,
        rng: Arc<dyn RngOracle>,
        repository: Arc<dyn SnapshotRepository>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        let now = Instant::now();
        let epoch = now
            .checked_sub(Duration::from_millis(session.now_ms()))
            .unwrap_or(now);
        Self {
            session,
            config,
            rng,
            repository,
            command_rx,
            event_bus,
            epoch,
        }
    }

    /// Loads the saved game or starts a new one.
    ///
    /// A snapshot that is missing or unreadable as a whole starts a new game
    /// seeded with `seed`, or a random seed when none is given.
    pub fn open_session(
        repository: &dyn SnapshotRepository,
        config: &GameConfig,
        rng: &dyn RngOracle,
        seed: Option<u64>,
    ) -> Result<(Session, SessionEvent)> {
        let seed = seed.unwrap_or_else(rand::random);
        let fallback = GameState::new_game(seed, config);

        match repository.load(fallback)? {
            Some(loaded) => {
                let nonce = loaded.state.nonce;
                info!(
                    target: "runtime::worker",
                    nonce,
                    degraded = loaded.degraded.len(),
                    "resuming saved game"
                );
                let session = Session::resume(loaded.state, GameEnv::new(config, rng));
                let started = SessionEvent::Started {
                    resumed: true,
                    nonce,
                    degraded: loaded.degraded,
                };
                Ok((session, started))
            }
            None => {
                info!(target: "runtime::worker", seed, "starting a new game");
                let started = SessionEvent::Started {
                    resumed: false,
                    nonce: 0,
                    degraded: Vec::new(),
                };
                Ok((Session::start_new_game(seed, config), started))
            }
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            let deadline = self.next_deadline();
            tokio::select! {
                command = self.command_rx.recv() => {
                    let Some(command) = command else { break };
                    if self.handle_command(command).is_break() {
                        break;
                    }
                }
                () = wait_until(deadline) => self.catch_up(),
            }
        }
        debug!(target: "runtime::worker", "simulation worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) -> ControlFlow<()> {
        match cmd {
            Command::Submit { intent, reply } => {
                let result = self.submit(intent);
                let _ = reply.send(result);
            }
            Command::QueryState { reply } => {
                self.catch_up();
                let _ = reply.send(self.session.state().clone());
            }
            Command::QueryConfig { reply } => {
                let _ = reply.send(self.config.clone());
            }
            Command::ReloadConfig { config, reply } => {
                let result = self.reload_config(*config);
                let _ = reply.send(result);
            }
            Command::NewGame { seed, reply } => {
                let result = self.new_game(seed);
                let _ = reply.send(result);
            }
            Command::Shutdown { reply } => {
                self.persist();
                let _ = reply.send(());
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    fn virtual_now(&self) -> u64 {
        u64::try_from(self.epoch.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.session
            .queue()
            .next_due()
            .map(|due_ms| self.epoch + Duration::from_millis(due_ms))
    }

    /// Runs every task whose deadline has passed.
    fn catch_up(&mut self) {
        let now = self.virtual_now();
        let nonce = self.session.state().nonce;

        let env = GameEnv::new(&self.config, self.rng.as_ref());
        let events = self.session.advance_to(env, now);

        if !events.is_empty() {
            debug!(
                target: "runtime::worker",
                now_ms = now,
                events = events.len(),
                "follow-up tasks fired"
            );
        }
        self.event_bus.publish_game(events);
        if self.session.state().nonce != nonce {
            self.persist();
        }
    }

    fn submit(&mut self, intent: Intent) -> Result<Vec<GameEvent>> {
        // Delays queued by this intent count from now, not from the last task.
        self.catch_up();
        let nonce = self.session.state().nonce;

        let env = GameEnv::new(&self.config, self.rng.as_ref());
        match self.session.submit(env, &intent) {
            Ok(events) => {
                debug!(
                    target: "runtime::worker",
                    intent = intent.as_snake_case(),
                    events = events.len(),
                    "intent applied"
                );
                self.event_bus.publish_game(events.iter().cloned());
                if self.session.state().nonce != nonce {
                    self.persist();
                }
                Ok(events)
            }
            Err(rejection) => {
                if rejection.phase == TransitionPhase::PreValidate {
                    debug!(
                        target: "runtime::worker",
                        intent = intent.as_snake_case(),
                        error = %rejection.error,
                        "intent rejected during pre-validate"
                    );
                } else {
                    error!(
                        target: "runtime::worker",
                        intent = intent.as_snake_case(),
                        phase = rejection.phase.as_str(),
                        error = %rejection.error,
                        "intent execution failed"
                    );
                }
                self.event_bus.publish(Event::Rejected(Rejected::new(intent, &rejection)));
                Err(RuntimeError::Rejected(rejection))
            }
        }
    }

    fn reload_config(&mut self, config: GameConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        info!(target: "runtime::worker", "game configuration reloaded");
        self.event_bus.publish(Event::Session(SessionEvent::ConfigReloaded));
        Ok(())
    }

    fn new_game(&mut self, seed: Option<u64>) -> Result<()> {
        self.repository.clear()?;
        let seed = seed.unwrap_or_else(rand::random);
        info!(target: "runtime::worker", seed, "starting a new game");

        self.session = Session::start_new_game(seed, &self.config);
        self.epoch = Instant::now();
        self.persist();
        self.event_bus.publish(Event::Session(SessionEvent::Started {
            resumed: false,
            nonce: 0,
            degraded: Vec::new(),
        }));
        Ok(())
    }

    fn persist(&self) {
        let state = self.session.state();
        match self.repository.save(state) {
            Ok(()) => self.event_bus.publish(Event::Session(SessionEvent::Saved {
                nonce: state.nonce,
            })),
            Err(error) => {
                warn!(target: "runtime::worker", %error, "failed to save the game");
                self.event_bus.publish(Event::Session(SessionEvent::SaveFailed {
                    error: error.to_string(),
                }));
            }
        }
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
