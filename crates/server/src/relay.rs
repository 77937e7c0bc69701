use std::fmt;

use shared::protocol::ControlEvent;
use tokio::sync::broadcast;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SubscriberId(Uuid);

impl SubscriberId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub_{}", self.0.simple())
    }
}

/// Fan-out of control events to every connected display client.
///
/// Delivery is best effort: nothing is acknowledged or retried, and a publish
/// with no subscribers is dropped silently. Each publish is a single send on
/// the broadcast channel, so a subscriber joining concurrently either gets
/// the whole event or starts from the next one.
#[derive(Clone)]
pub(crate) struct Relay {
    events: broadcast::Sender<ControlEvent>,
}

impl Relay {
    pub(crate) fn new(capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity.max(1));
        Self { events }
    }

    /// Returns how many subscribers the event was queued for.
    pub(crate) fn publish(&self, event: ControlEvent) -> usize {
        let name = event.name();
        match self.events.send(event) {
            Ok(receivers) => {
                debug!(event = name, receivers, "control event published");
                receivers
            }
            Err(_) => {
                debug!(event = name, "no subscribers connected; event dropped");
                0
            }
        }
    }

    pub(crate) fn subscribe(&self) -> Subscription {
        Subscription {
            id: SubscriberId::new(),
            events: self.events.subscribe(),
        }
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.events.receiver_count()
    }
}

pub(crate) struct Subscription {
    id: SubscriberId,
    events: broadcast::Receiver<ControlEvent>,
}

impl Subscription {
    pub(crate) fn id(&self) -> SubscriberId {
        self.id
    }

    /// Next event for this subscriber, or `None` once the relay is gone.
    /// A subscriber that falls behind skips what it missed and carries on.
    pub(crate) async fn next(&mut self) -> Option<ControlEvent> {
        loop {
            match self.events.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(subscriber = %self.id, skipped, "subscriber lagged, dropped events");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/relay_tests.rs"]
mod tests;
