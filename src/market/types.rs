//! Core value objects: orders, sides, prices and trader identities.
//!
//! Prices are represented internally as an integer count of ticks
//! (`Ticks`) rather than a float or a decimal library, per the fixed-point
//! design note: all book-internal arithmetic stays on integers and only
//! converts to a human `f64` at the query boundary (`OrderBook::bid_price`
//! and friends).

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default tick size used when a venue/ticker pair has no explicit override.
pub const DEFAULT_TICK_SIZE: f64 = 0.01;

/// Side of an order or event: `Buy` sits on the bid book, `Sell` on the ask book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Side {
    /// Buy / bid
    Buy = 0,
    /// Sell / ask
    Sell = 1,
}

impl Side {
    /// The opposite side — bids match against the ask book and vice versa.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Process-unique, monotonically increasing order identifier.
pub type OrderId = u64;

/// Process-unique, monotonically increasing orderbook-event identifier.
pub type EventUid = u64;

/// Discrete simulation timestep index.
pub type Timestep = u64;

/// Number of shares. Always strictly positive for a live order.
pub type Volume = u64;

/// Which reference strategy a trader is an instance of.
///
/// `Pluggable` is the slot reserved for a non-reference, user-supplied
/// strategy; the simulator core does not know its behaviour, only its
/// tag for callback addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyTag {
    /// Noise trader
    Noise,
    /// Market maker
    MarketMaker,
    /// Liquidity consumer
    LiquidityConsumer,
    /// Momentum trader
    Momentum,
    /// Mean-reversion trader
    MeanReversion,
    /// Slot for a pluggable, non-reference strategy
    Pluggable,
}

impl std::fmt::Display for StrategyTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StrategyTag::Noise => "noise",
            StrategyTag::MarketMaker => "market_maker",
            StrategyTag::LiquidityConsumer => "liquidity_consumer",
            StrategyTag::Momentum => "momentum",
            StrategyTag::MeanReversion => "mean_reversion",
            StrategyTag::Pluggable => "pluggable",
        };
        write!(f, "{s}")
    }
}

/// A trader identity: a pair of strategy-tag and agent-index, used by the
/// LOB as a callback address for execution reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraderId {
    /// The strategy this trader instance belongs to
    pub strategy: StrategyTag,
    /// Index of this trader within its strategy's population
    pub index: u32,
}

impl TraderId {
    /// Build a new trader identity.
    pub fn new(strategy: StrategyTag, index: u32) -> Self {
        Self { strategy, index }
    }
}

impl std::fmt::Display for TraderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.strategy, self.index)
    }
}

/// Price expressed as an integer multiple of the tick size, or the
/// special "market" sentinel for an unpriced (market) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OrderPrice {
    /// A resting/limit price, in integer ticks from zero.
    Limit(Ticks),
    /// Unpriced — only valid for an order still in flight as a market order.
    Market,
}

impl OrderPrice {
    /// The tick value of a limit price, or `None` for `Market`.
    pub fn ticks(self) -> Option<Ticks> {
        match self {
            OrderPrice::Limit(t) => Some(t),
            OrderPrice::Market => None,
        }
    }
}

/// An integer count of ticks from price zero. The fundamental internal
/// unit of price; convert to a human decimal only at query boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Ticks(pub u64);

impl Ticks {
    /// Round a decimal price to the nearest tick, half-down. Returns
    /// `None` if the rounded price is not strictly positive (caller
    /// should reject such an order).
    pub fn from_decimal(price: f64, tick_size: f64) -> Option<Ticks> {
        if !price.is_finite() || tick_size <= 0.0 {
            return None;
        }
        let raw = price / tick_size;
        // Half-down: .5 rounds toward zero, not away from it.
        let fraction = raw.fract();
        let rounded = if fraction.abs() == 0.5 { raw.trunc() } else { raw.round() };
        if rounded <= 0.0 {
            None
        } else {
            Some(Ticks(rounded as u64))
        }
    }

    /// Convert back to a human decimal price given the venue's tick size.
    pub fn to_decimal(self, tick_size: f64) -> f64 {
        self.0 as f64 * tick_size
    }
}

/// An immutable order record. Once resting, only `volume` (the residual
/// quantity) changes, in place, on partial fill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Process-unique monotonic positive identifier
    pub order_id: OrderId,
    /// Venue tag (e.g. exchange/segment name)
    pub venue: Arc<str>,
    /// Ticker tag (instrument symbol)
    pub ticker: Arc<str>,
    /// Callback address of the order's owner
    pub trader: TraderId,
    /// Buy or sell
    pub side: Side,
    /// Residual volume: positive integer share count
    pub volume: Volume,
    /// Limit price, or the market sentinel
    pub price: OrderPrice,
    /// Monotonic nanosecond timestamp at acknowledgement
    pub acknowledged_at: u64,
}

impl Order {
    /// `true` once this order carries a concrete limit price.
    pub fn is_limit(&self) -> bool {
        matches!(self.price, OrderPrice::Limit(_))
    }
}
