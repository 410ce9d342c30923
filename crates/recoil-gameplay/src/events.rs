//! Event bus for simulation-to-collaborator communication.
//!
//! Audio listens for launches and detonations; presentation may listen for
//! the rest. Publishing never blocks and never waits on a consumer: a full
//! queue drops the event.

use crossbeam_channel::{bounded, Receiver, Sender};
use serde::{Deserialize, Serialize};

use recoil_common::Vec2;

use crate::enemy::EnemyKind;

/// Event types that can be sent through the event bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// A rocket left the gun.
    RocketLaunched {
        /// Muzzle position.
        origin: Vec2,
        /// Initial velocity.
        velocity: Vec2,
    },
    /// A rocket detonated.
    RocketDetonated {
        /// Blast center.
        contact: Vec2,
    },
    /// An enemy started its explosion sequence.
    EnemyKilled {
        /// Enemy type.
        kind: EnemyKind,
        /// Where it died.
        location: Vec2,
    },
    /// The player was killed.
    PlayerKilled {
        /// Where the player died.
        location: Vec2,
    },
    /// The player's centroid entered the portal radius.
    PortalEntered {
        /// Portal position.
        location: Vec2,
    },
    /// A teleport blend ran to completion; the level loader's cue.
    TeleportCompleted {
        /// Final player feet position.
        destination: Vec2,
    },
}

/// Event bus for broadcasting events to subscribers.
#[derive(Debug)]
pub struct EventBus {
    /// Sender for broadcasting events
    sender: Sender<SimEvent>,
    /// Receiver for collecting events
    receiver: Receiver<SimEvent>,
    /// Channel capacity
    capacity: usize,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl EventBus {
    /// Creates a new event bus with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            capacity,
        }
    }

    /// Publishes an event to the bus.
    pub fn publish(&self, event: SimEvent) {
        // Non-blocking send - if full, event is dropped
        let _ = self.sender.try_send(event);
    }

    /// Drains all pending events.
    pub fn drain(&self) -> Vec<SimEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }

    /// Returns the number of pending events.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Returns the channel capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Creates a new sender handle for publishing events.
    #[must_use]
    pub fn sender(&self) -> Sender<SimEvent> {
        self.sender.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_and_drain() {
        let bus = EventBus::new(8);
        bus.publish(SimEvent::RocketDetonated {
            contact: Vec2::new(10.0, 20.0),
        });
        bus.publish(SimEvent::PlayerKilled {
            location: Vec2::ZERO,
        });

        assert_eq!(bus.pending_count(), 2);
        let events = bus.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(bus.pending_count(), 0);
        assert!(matches!(events[0], SimEvent::RocketDetonated { .. }));
    }

    #[test]
    fn test_full_bus_drops_instead_of_blocking() {
        let bus = EventBus::new(1);
        bus.publish(SimEvent::PlayerKilled {
            location: Vec2::ZERO,
        });
        bus.publish(SimEvent::PlayerKilled {
            location: Vec2::ZERO,
        });
        assert_eq!(bus.pending_count(), 1);
    }

    #[test]
    fn test_cloned_sender_feeds_same_bus() {
        let bus = EventBus::default();
        let sender = bus.sender();
        let _ = sender.try_send(SimEvent::PortalEntered {
            location: Vec2::new(1.0, 2.0),
        });
        assert_eq!(bus.drain().len(), 1);
    }
}
