//! Core `OrderBook`: two price-ordered sides, FIFO per level, L1/L2 quotes.

use super::event::{EventKind, OrderbookEvent, PriceImpactRecord};
use super::level::PriceLevel;
use super::types::{EventUid, Order, OrderId, OrderPrice, Side, Ticks, TraderId, Volume};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// How an execution report characterises the state change of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionReportKind {
    /// Order fully consumed — remove it from `outstanding_orders`.
    FullFill,
    /// Order partially consumed — replace the stored copy with the
    /// smaller-volume one carried on this report.
    PartialFill,
    /// Order cancelled — remove it from `outstanding_orders`.
    Cancelled,
    /// A freshly submitted limit order rested with no fill at all —
    /// add it to `outstanding_orders`. Not one of the taxonomy's three
    /// fill/cancel kinds: since agents submit via intents rather than
    /// calling the book directly, this is how the owning agent learns
    /// the order_id the book allocated for its own order.
    Resting,
}

/// An asynchronous notification the LOB sends back to an order's owner.
#[derive(Debug, Clone)]
pub struct ExecutionReport {
    /// What happened
    pub kind: ExecutionReportKind,
    /// The order as it now stands (residual volume reflects any partial fill)
    pub order: Order,
}

/// Everything a single LOB operation produced: the public event trail,
/// the private execution reports routed to order owners, and (for
/// aggressing market orders) a price-impact measurement.
#[derive(Debug, Clone, Default)]
pub struct MatchOutcome {
    /// Events emitted by this operation, in production order
    pub events: Vec<OrderbookEvent>,
    /// Execution reports to route to their addressed trader
    pub reports: Vec<(TraderId, ExecutionReport)>,
    /// Price-impact measurement, present only for aggressing market orders
    pub impact: Option<PriceImpactRecord>,
}

impl MatchOutcome {
    fn new() -> Self {
        Self::default()
    }
}

/// The result of submitting a limit order: the order left resting (if
/// any residual survived matching) plus the usual match outcome.
#[derive(Debug, Clone)]
pub struct LimitOrderOutcome {
    /// `Some` with the residual order if any volume rests on the book
    /// after matching; `None` if the order was fully filled on arrival.
    pub resting: Option<Order>,
    /// Events, reports and impact produced while processing this order
    pub outcome: MatchOutcome,
}

/// The limit order book and matching engine for one venue/ticker pair.
///
/// Mutated only by its single owning actor — there is deliberately no
/// interior mutability or atomics here beyond the two monotonic id
/// counters, which are cheap to keep `Sync` and cost nothing extra in
/// the single-writer case.
pub struct OrderBook {
    venue: Arc<str>,
    ticker: Arc<str>,
    tick_size: f64,
    bids: BTreeMap<u64, PriceLevel>,
    asks: BTreeMap<u64, PriceLevel>,
    /// order_id -> (side, price in ticks), for O(1) average cancellation
    order_locations: HashMap<OrderId, (Side, u64)>,
    next_order_id: AtomicU64,
    next_event_uid: AtomicU64,
    last_trade_price: Ticks,
    last_trade_size: Volume,
    timestep: u64,
}

impl OrderBook {
    /// Create an empty book, with `last_price`/`last_size` initialised
    /// from configuration.
    pub fn new(
        venue: impl Into<Arc<str>>,
        ticker: impl Into<Arc<str>>,
        tick_size: f64,
        initial_last_price: f64,
        initial_last_size: Volume,
    ) -> Self {
        let last_trade_price =
            Ticks::from_decimal(initial_last_price, tick_size).unwrap_or(Ticks(0));
        Self {
            venue: venue.into(),
            ticker: ticker.into(),
            tick_size,
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            order_locations: HashMap::new(),
            next_order_id: AtomicU64::new(1),
            next_event_uid: AtomicU64::new(1),
            last_trade_price,
            last_trade_size: initial_last_size,
            timestep: 0,
        }
    }

    /// Advance the book's notion of the current timestep (set by the
    /// scheduler at the start of each pass; stamped onto every event
    /// emitted during that pass).
    pub fn set_timestep(&mut self, timestep: u64) {
        self.timestep = timestep;
    }

    pub(super) fn venue(&self) -> &Arc<str> {
        &self.venue
    }

    pub(super) fn ticker(&self) -> &Arc<str> {
        &self.ticker
    }

    pub(super) fn timestep(&self) -> u64 {
        self.timestep
    }

    /// The tick size configured for this venue/ticker pair.
    pub fn tick_size(&self) -> f64 {
        self.tick_size
    }

    pub(super) fn next_order_id(&self) -> OrderId {
        self.next_order_id.fetch_add(1, Ordering::Relaxed)
    }

    pub(super) fn next_event_uid(&self) -> EventUid {
        self.next_event_uid.fetch_add(1, Ordering::Relaxed)
    }

    fn best_bid_ticks(&self) -> Option<u64> {
        self.bids.keys().next_back().copied()
    }

    fn best_ask_ticks(&self) -> Option<u64> {
        self.asks.keys().next().copied()
    }

    /// Best (highest) bid price, or `0.0` if the bid side is empty.
    pub fn bid_price(&self) -> f64 {
        self.best_bid_ticks()
            .map(|t| Ticks(t).to_decimal(self.tick_size))
            .unwrap_or(0.0)
    }

    /// Best (lowest) ask price, or `0.0` if the ask side is empty.
    pub fn ask_price(&self) -> f64 {
        self.best_ask_ticks()
            .map(|t| Ticks(t).to_decimal(self.tick_size))
            .unwrap_or(0.0)
    }

    /// Mid price — `(best_bid + best_ask) / 2`, rounded to 2 decimals.
    /// `0.0` if either side is empty.
    pub fn mid_price(&self) -> f64 {
        match (self.best_bid_ticks(), self.best_ask_ticks()) {
            (Some(b), Some(a)) => {
                let bid = Ticks(b).to_decimal(self.tick_size);
                let ask = Ticks(a).to_decimal(self.tick_size);
                ((bid + ask) / 2.0 * 100.0).round() / 100.0
            }
            _ => 0.0,
        }
    }

    /// Aggregate volume resting at the best bid level, `0` if empty.
    pub fn bid_size(&self) -> Volume {
        self.best_bid_ticks()
            .and_then(|t| self.bids.get(&t))
            .map(PriceLevel::total_volume)
            .unwrap_or(0)
    }

    /// Aggregate volume resting at the best ask level, `0` if empty.
    pub fn ask_size(&self) -> Volume {
        self.best_ask_ticks()
            .and_then(|t| self.asks.get(&t))
            .map(PriceLevel::total_volume)
            .unwrap_or(0)
    }

    /// Up to 5 best bid prices, ordered from furthest (worst) to
    /// nearest (best).
    pub fn highest_bid_prices(&self) -> Vec<f64> {
        let mut best: Vec<u64> = self.bids.keys().rev().take(5).copied().collect();
        best.reverse();
        best.into_iter()
            .map(|t| Ticks(t).to_decimal(self.tick_size))
            .collect()
    }

    /// Up to 5 best ask prices, ordered from furthest (worst) to
    /// nearest (best).
    pub fn lowest_ask_prices(&self) -> Vec<f64> {
        let mut best: Vec<u64> = self.asks.keys().take(5).copied().collect();
        best.reverse();
        best.into_iter()
            .map(|t| Ticks(t).to_decimal(self.tick_size))
            .collect()
    }

    /// Aggregate volume per level, aligned with [`Self::highest_bid_prices`].
    pub fn highest_bid_sizes(&self) -> Vec<Volume> {
        let mut keys: Vec<u64> = self.bids.keys().rev().take(5).copied().collect();
        keys.reverse();
        keys.into_iter()
            .map(|t| self.bids.get(&t).map(PriceLevel::total_volume).unwrap_or(0))
            .collect()
    }

    /// Aggregate volume per level, aligned with [`Self::lowest_ask_prices`].
    pub fn lowest_ask_sizes(&self) -> Vec<Volume> {
        let mut keys: Vec<u64> = self.asks.keys().take(5).copied().collect();
        keys.reverse();
        keys.into_iter()
            .map(|t| self.asks.get(&t).map(PriceLevel::total_volume).unwrap_or(0))
            .collect()
    }

    /// Price of the last executed trade.
    pub fn last_price(&self) -> f64 {
        self.last_trade_price.to_decimal(self.tick_size)
    }

    /// Volume of the last executed trade.
    pub fn last_size(&self) -> Volume {
        self.last_trade_size
    }

    pub(super) fn record_trade(&mut self, price: Ticks, size: Volume) {
        self.last_trade_price = price;
        self.last_trade_size = size;
    }

    pub(super) fn bids_mut(&mut self) -> &mut BTreeMap<u64, PriceLevel> {
        &mut self.bids
    }

    pub(super) fn asks_mut(&mut self) -> &mut BTreeMap<u64, PriceLevel> {
        &mut self.asks
    }

    pub(super) fn side_mut(&mut self, side: Side) -> &mut BTreeMap<u64, PriceLevel> {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    pub(super) fn opposite_side_mut(&mut self, side: Side) -> &mut BTreeMap<u64, PriceLevel> {
        self.side_mut(side.opposite())
    }

    pub(super) fn track(&mut self, order_id: OrderId, side: Side, price: Ticks) {
        self.order_locations.insert(order_id, (side, price.0));
    }

    pub(super) fn untrack(&mut self, order_id: OrderId) {
        self.order_locations.remove(&order_id);
    }

    pub(super) fn locate(&self, order_id: OrderId) -> Option<(Side, Ticks)> {
        self.order_locations
            .get(&order_id)
            .map(|&(side, ticks)| (side, Ticks(ticks)))
    }

    /// Whether either side of the book is currently empty — the
    /// scheduler relies on this to keep the book non-empty via the
    /// bootstrap liquidity provider.
    pub fn is_side_empty(&self, side: Side) -> bool {
        match side {
            Side::Buy => self.bids.is_empty(),
            Side::Sell => self.asks.is_empty(),
        }
    }

    /// Build a new admission event stamped with the current timestep.
    pub(super) fn new_event(
        &self,
        order_id: OrderId,
        trader: TraderId,
        kind: EventKind,
        volume: Volume,
        price: OrderPrice,
        direction: Side,
    ) -> OrderbookEvent {
        OrderbookEvent {
            uid: self.next_event_uid(),
            timestep: self.timestep,
            order_id,
            trader,
            kind,
            volume,
            price,
            direction,
        }
    }
}
