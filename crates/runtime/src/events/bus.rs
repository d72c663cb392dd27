//! Topic-based event bus implementation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use game_core::GameEvent;

use super::types::{Rejected, SessionEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Engine events and rejected intents
    Game,
    /// Lifecycle, persistence and configuration
    Session,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize)]
pub enum Event {
    Game(GameEvent),
    Rejected(Rejected),
    Session(SessionEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Game(_) | Event::Rejected(_) => Topic::Game,
            Event::Session(_) => Topic::Session,
        }
    }
}

/// Topic-based event bus
///
/// Every topic gets its own broadcast channel up front, so publishing and
/// subscribing never contend on a lock. Publishing is best-effort: with no
/// subscribers the event is dropped, and lagging subscribers lose the oldest
/// events first.
#[derive(Clone)]
pub struct EventBus {
    game: broadcast::Sender<Event>,
    session: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            game: broadcast::channel(capacity).0,
            session: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Game => &self.game,
            Topic::Session => &self.session,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Publish a batch of engine events in order.
    pub fn publish_game(&self, events: impl IntoIterator<Item = GameEvent>) {
        for event in events {
            self.publish(Event::Game(event));
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn events_reach_only_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut game_rx = bus.subscribe(Topic::Game);
        let mut session_rx = bus.subscribe(Topic::Session);

        bus.publish_game([GameEvent::IntroductionCompleted]);
        bus.publish(Event::Session(SessionEvent::ConfigReloaded));

        assert!(matches!(
            game_rx.recv().await,
            Ok(Event::Game(GameEvent::IntroductionCompleted))
        ));
        assert!(matches!(
            session_rx.recv().await,
            Ok(Event::Session(SessionEvent::ConfigReloaded))
        ));
        assert!(game_rx.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        let bus = EventBus::default();
        bus.publish(Event::Session(SessionEvent::Saved { nonce: 3 }));
    }
}
