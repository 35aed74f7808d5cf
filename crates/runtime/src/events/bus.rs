//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{CombatEvent, ProgressEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Committed state, ignored inputs, game end
    Combat,
    /// Stage advances and persistence results
    Progress,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone)]
pub enum Event {
    Combat(CombatEvent),
    Progress(ProgressEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Combat(_) => Topic::Combat,
            Event::Progress(_) => Topic::Progress,
        }
    }
}

/// Topic-based event bus
///
/// Consumers subscribe to the topics they care about. Publishing never
/// blocks; events sent with no subscriber are dropped.
#[derive(Clone)]
pub struct EventBus {
    combat: broadcast::Sender<Event>,
    progress: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            combat: broadcast::channel(capacity).0,
            progress: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Combat => &self.combat,
            Topic::Progress => &self.progress,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
