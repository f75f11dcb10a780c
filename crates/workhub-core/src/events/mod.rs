//! Domain events emitted by WorkHub store mutations.
//!
//! Events are dispatched through the [`EventBus`] whenever a stage or item
//! changes. Hosts that keep a derived hierarchy on screen subscribe and
//! rebuild from a fresh snapshot on every event; the engine never applies
//! incremental updates.

pub mod item;
pub mod stage;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

pub use item::ItemEvent;
pub use stage::StageEvent;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum EventPayload {
    /// A stage-related event.
    Stage(StageEvent),
    /// An item-related event.
    Item(ItemEvent),
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            payload,
        }
    }
}

/// Default broadcast channel capacity.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Broadcast bus carrying [`DomainEvent`]s from the stores to any
/// number of subscribers.
///
/// Slow subscribers may observe `Lagged` errors and should treat them as
/// a cue to do a full snapshot refresh, which is always correct.
#[derive(Debug, Clone)]
pub struct EventBus {
    /// The underlying broadcast sender.
    sender: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    /// Create a new event bus.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Subscribe to all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }

    /// Publish an event. Events published with no subscribers are dropped.
    pub fn publish(&self, payload: EventPayload) {
        let _ = self.sender.send(DomainEvent::new(payload));
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
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
    use crate::types::StageId;

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.publish(EventPayload::Stage(StageEvent::Deleted {
            stage_id: StageId::new(),
            name: "Open".to_string(),
        }));

        let event = rx.recv().await.expect("event");
        assert!(matches!(
            event.payload,
            EventPayload::Stage(StageEvent::Deleted { .. })
        ));
    }

    #[test]
    fn test_publish_without_subscribers_is_silent() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count(), 0);
        bus.publish(EventPayload::Stage(StageEvent::Deleted {
            stage_id: StageId::new(),
            name: "x".to_string(),
        }));
    }
}
