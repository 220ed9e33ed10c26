//! The public feed: a single fan-out broadcast of every orderbook event
//! to every subscribed agent, on the "orderbook_event" topic.

use crate::market::OrderbookEvent;
use crossbeam::channel::{Receiver, Sender, unbounded};
use tracing::warn;

/// The only topic the feed currently carries. Kept as a named constant
/// rather than a string literal scattered through call sites.
pub const ORDERBOOK_EVENT_TOPIC: &str = "orderbook_event";

/// A single subscriber's mailbox: an unbounded channel that preserves
/// production order, the way `manager.rs`'s per-listener trade channel
/// does for its one fixed topic.
pub struct Subscription {
    receiver: Receiver<OrderbookEvent>,
}

impl Subscription {
    /// Drain every event published since the last drain, in order.
    pub fn drain(&self) -> Vec<OrderbookEvent> {
        self.receiver.try_iter().collect()
    }
}

/// Broadcasts [`OrderbookEvent`]s to every subscriber. `publish` never
/// blocks the caller and never returns an error: a disconnected
/// subscriber (its [`Subscription`] dropped) is logged and skipped,
/// per the engine's no-fail delivery guarantee.
#[derive(Default)]
pub struct PublicFeed {
    subscribers: Vec<Sender<OrderbookEvent>>,
}

impl PublicFeed {
    /// Create a feed with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber and return its mailbox handle.
    pub fn subscribe(&mut self) -> Subscription {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        Subscription { receiver: rx }
    }

    /// Broadcast one event to every current subscriber, in the order
    /// this method is called (so per-subscriber ordering follows
    /// publication order).
    pub fn publish(&self, event: OrderbookEvent) {
        for sub in &self.subscribers {
            if sub.send(event.clone()).is_err() {
                warn!(uid = event.uid, "public feed subscriber disconnected, dropping delivery");
            }
        }
    }

    /// Broadcast a batch of events, preserving their relative order.
    pub fn publish_all(&self, events: impl IntoIterator<Item = OrderbookEvent>) {
        for event in events {
            self.publish(event);
        }
    }

    /// Number of currently registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
