//! Agent framework: the `Agent` trait, the `Intent` vocabulary agents
//! use to act on the book, and the shared bookkeeping every reference
//! strategy needs (cash, outstanding orders, a private RNG stream).

pub mod liquidity_consumer;
pub mod market_maker;
pub mod mean_reversion;
pub mod momentum;
pub mod noise;
pub mod pluggable;

#[cfg(test)]
mod tests;

use crate::market::{ExecutionReport, ExecutionReportKind, Order, OrderId, OrderbookEvent, Side, TraderId, Timestep};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

/// An action an agent wants to take this timestep. `actuate` returns a
/// batch of these rather than calling the book directly, so the
/// scheduler remains the only thing that ever holds `&mut OrderBook`.
#[derive(Debug, Clone, Copy)]
pub enum Intent {
    /// Submit a market order for `volume` shares.
    MarketOrder { side: Side, volume: i64 },
    /// Submit a limit order for `volume` shares at `price`.
    LimitOrder { side: Side, volume: i64, price: f64 },
    /// Cancel a previously-resting order.
    Cancel { order_id: OrderId },
    /// Do nothing.
    Noop,
}

/// The capability set every reference strategy implements.
pub trait Agent: Send {
    /// This agent's callback address.
    fn id(&self) -> TraderId;

    /// Current cash balance.
    fn cash(&self) -> f64;

    /// Decide this timestep's actions. Called once per pass, with a
    /// read-only view of the book and the current timestep index.
    fn actuate(&mut self, book: &crate::market::OrderBook, clock: Timestep) -> Vec<Intent>;

    /// Receive an asynchronous fill/cancel/admission notification for
    /// one of this agent's own orders.
    fn on_execution_report(&mut self, report: &ExecutionReport);

    /// Observe a public feed event (own or another agent's).
    fn on_public_event(&mut self, event: &OrderbookEvent);
}

/// Shared per-agent bookkeeping: identity, cash, outstanding orders and
/// a private RNG stream. Every reference strategy embeds one of these
/// and delegates `id`/`cash`/the outstanding-orders half of
/// `on_execution_report` to it.
pub struct TraderState {
    id: TraderId,
    cash: f64,
    outstanding: HashMap<OrderId, Order>,
    rng: ChaCha8Rng,
}

impl TraderState {
    /// Create a new trader record with the given starting cash and
    /// private RNG stream (see `rng.rs` for how the stream is derived
    /// from the run's master seed).
    pub fn new(id: TraderId, cash: f64, rng: ChaCha8Rng) -> Self {
        Self {
            id,
            cash,
            outstanding: HashMap::new(),
            rng,
        }
    }

    pub fn id(&self) -> TraderId {
        self.id
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Debit cash by `amount`, floored at zero.
    pub fn debit(&mut self, amount: f64) {
        self.cash = (self.cash - amount).max(0.0);
    }

    /// Currently outstanding (resting) orders, oldest-to-newest by
    /// order_id (insertion order into the underlying map is not
    /// meaningful; callers that need the oldest should use
    /// [`Self::oldest_outstanding`]).
    pub fn outstanding(&self) -> impl Iterator<Item = &Order> {
        self.outstanding.values()
    }

    pub fn outstanding_len(&self) -> usize {
        self.outstanding.len()
    }

    /// The outstanding order with the smallest order_id — the oldest,
    /// since order_id is monotonic by submission.
    pub fn oldest_outstanding(&self) -> Option<OrderId> {
        self.outstanding.keys().min().copied()
    }

    /// Apply one execution report, per the kind-dispatch contract.
    pub fn apply_report(&mut self, report: &ExecutionReport) {
        match report.kind {
            ExecutionReportKind::Resting => {
                self.outstanding.insert(report.order.order_id, report.order.clone());
            }
            ExecutionReportKind::PartialFill => {
                self.outstanding.insert(report.order.order_id, report.order.clone());
            }
            ExecutionReportKind::FullFill | ExecutionReportKind::Cancelled => {
                self.outstanding.remove(&report.order.order_id);
            }
        }
    }
}
