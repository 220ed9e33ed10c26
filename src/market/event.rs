//! Orderbook events: the public record of every book mutation.

use super::types::{EventUid, OrderId, OrderPrice, Side, Timestep, TraderId, Volume};
use serde::{Deserialize, Serialize};

/// The kind of mutation an [`OrderbookEvent`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// A new market order was accepted (and immediately processed)
    NewMarketOrder,
    /// A new limit order was accepted (matched and/or rested)
    NewLimitOrder,
    /// A resting limit order was cancelled
    CancelLimitOrder,
    /// An incoming buy order fully consumed a resting order, or vice
    /// versa — buy-side leg of the pair
    FullFillBuyOrder,
    /// Full-fill event, sell-side leg of the pair
    FullFillSellOrder,
    /// Partial-fill event, buy-side leg of the pair
    PartialFillBuyOrder,
    /// Partial-fill event, sell-side leg of the pair
    PartialFillSellOrder,
}

impl EventKind {
    /// `true` only for the four fill variants — these represent an
    /// actual transaction, as opposed to admission/cancellation events.
    pub fn is_transaction(self) -> bool {
        matches!(
            self,
            EventKind::FullFillBuyOrder
                | EventKind::FullFillSellOrder
                | EventKind::PartialFillBuyOrder
                | EventKind::PartialFillSellOrder
        )
    }

    /// Build the correct full/partial fill variant for the given side.
    pub fn fill(side: Side, full: bool) -> EventKind {
        match (side, full) {
            (Side::Buy, true) => EventKind::FullFillBuyOrder,
            (Side::Buy, false) => EventKind::PartialFillBuyOrder,
            (Side::Sell, true) => EventKind::FullFillSellOrder,
            (Side::Sell, false) => EventKind::PartialFillSellOrder,
        }
    }
}

/// A single, immutable record of a book mutation, broadcast on the
/// public feed and also used internally to drive CSV reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderbookEvent {
    /// Monotonic, strictly increasing identifier for this event
    pub uid: EventUid,
    /// Timestep during which the mutation occurred
    pub timestep: Timestep,
    /// The order implicated by this event
    pub order_id: OrderId,
    /// The trader whose order produced this event (the aggressor for
    /// fill events, the order owner for new/cancel events)
    pub trader: TraderId,
    /// What happened
    pub kind: EventKind,
    /// Volume implicated: order volume for new/cancel, matched quantity
    /// for fills
    pub volume: Volume,
    /// Price implicated: order limit price for new/cancel (absent for a
    /// market order), trade price for fills
    pub price: OrderPrice,
    /// Side of the event's originating order
    pub direction: Side,
}

impl OrderbookEvent {
    /// `true` only for fill events.
    pub fn is_transaction(&self) -> bool {
        self.kind.is_transaction()
    }
}

/// A price-impact measurement for one aggressing market (or marketable
/// limit) order, reported to the sink.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PriceImpactRecord {
    /// Timestep of the aggressing order
    pub timestep: Timestep,
    /// The aggressing order's identifier
    pub order_id: OrderId,
    /// Total volume the aggressing order requested
    pub volume: Volume,
    /// Mid-price immediately before the first match
    pub mid_before: f64,
    /// Mid-price after the order is fully processed
    pub mid_after: f64,
}

impl PriceImpactRecord {
    /// Log-impact = log(max(after, eps)) - log(max(before, eps)), with
    /// eps = 1e-4, per the CSV contract.
    pub fn log_impact(&self) -> f64 {
        const EPS: f64 = 1e-4;
        self.mid_after.max(EPS).ln() - self.mid_before.max(EPS).ln()
    }
}
