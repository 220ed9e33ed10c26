//! The limit order book: types, matching engine, and query surface.

mod book;
mod error;
mod event;
mod level;
mod matching;
mod operations;

pub use book::{ExecutionReport, ExecutionReportKind, LimitOrderOutcome, MatchOutcome, OrderBook};
pub use error::OrderBookError;
pub use event::{EventKind, OrderbookEvent, PriceImpactRecord};
pub use types::{
    DEFAULT_TICK_SIZE, Order, OrderId, OrderPrice, Side, StrategyTag, Ticks, Timestep, TraderId,
    Volume,
};

pub mod types;

#[cfg(test)]
mod tests;
