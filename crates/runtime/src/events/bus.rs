//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::RuntimeEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Registration and login
    Account,
    /// User actions on pets
    Pet,
    /// Periodic decay sweeps
    Decay,
}

impl RuntimeEvent {
    pub fn topic(&self) -> Topic {
        match self {
            RuntimeEvent::Account(_) => Topic::Account,
            RuntimeEvent::Pet(_) => Topic::Pet,
            RuntimeEvent::Decay(_) => Topic::Decay,
        }
    }
}

struct Channels {
    account: broadcast::Sender<RuntimeEvent>,
    pet: broadcast::Sender<RuntimeEvent>,
    decay: broadcast::Sender<RuntimeEvent>,
}

impl Channels {
    fn get(&self, topic: Topic) -> &broadcast::Sender<RuntimeEvent> {
        match topic {
            Topic::Account => &self.account,
            Topic::Pet => &self.pet,
            Topic::Decay => &self.decay,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                account: broadcast::channel(capacity).0,
                pet: broadcast::channel(capacity).0,
                decay: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: impl Into<RuntimeEvent>) {
        let event = event.into();
        let topic = event.topic();
        if self.channels.get(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<RuntimeEvent> {
        self.channels.get(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<RuntimeEvent>> {
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
    use crate::events::DecayEvent;

    #[tokio::test]
    async fn events_only_reach_their_topic() {
        let bus = EventBus::new();
        let mut receivers = bus.subscribe_multiple(&[Topic::Decay, Topic::Pet]);

        bus.publish(DecayEvent::Swept { pets: 3, amount: 4 });

        let decay_rx = receivers.get_mut(&Topic::Decay).unwrap();
        match decay_rx.recv().await.unwrap() {
            RuntimeEvent::Decay(DecayEvent::Swept { pets, amount }) => {
                assert_eq!((pets, amount), (3, 4));
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert!(receivers.get_mut(&Topic::Pet).unwrap().try_recv().is_err());
    }

    #[test]
    fn publish_without_subscribers_is_fine() {
        EventBus::with_capacity(0).publish(DecayEvent::Failed {
            reason: "nobody listening".into(),
        });
    }
}
