//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! submitting intents, reading the state, swapping configuration, or
//! streaming events from specific topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{GameConfig, GameEvent, GameState, Intent};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    pub(crate) fn command_tx(&self) -> &mpsc::Sender<Command> {
        &self.command_tx
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Apply a player intent.
    ///
    /// Returns the events the intent produced right away. Anything it set in
    /// motion (counter-attacks, victory, settling) arrives later on
    /// [`Topic::Game`]. A refused intent comes back as
    /// [`RuntimeError::Rejected`] and is also published as
    /// [`Event::Rejected`].
    pub async fn submit(&self, intent: Intent) -> Result<Vec<GameEvent>> {
        self.request(|reply| Command::Submit { intent, reply }).await?
    }

    /// Query the current game state (read-only snapshot)
    pub async fn query_state(&self) -> Result<GameState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Query the configuration the engine is currently running with.
    pub async fn query_config(&self) -> Result<GameConfig> {
        self.request(|reply| Command::QueryConfig { reply }).await
    }

    /// Replace the active configuration.
    ///
    /// The new values apply from the next intent or task on; the game state
    /// is left as it is. Invalid configurations are refused.
    pub async fn reload_config(&self, config: GameConfig) -> Result<()> {
        self.request(|reply| Command::ReloadConfig {
            config: Box::new(config),
            reply,
        })
        .await?
    }

    /// Throw away the current game and start over.
    ///
    /// `seed` pins the game seed; `None` draws a fresh one.
    pub async fn new_game(&self, seed: Option<u64>) -> Result<()> {
        self.request(|reply| Command::NewGame { seed, reply }).await?
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Game` - Engine events and rejected intents
    /// - `Topic::Session` - Lifecycle, persistence and configuration events
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut game_rx = handle.subscribe(Topic::Game);
    /// while let Ok(event) = game_rx.recv().await {
    ///     // Render the event
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
