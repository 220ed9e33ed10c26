mod market_impact_tests;
mod quote_tests;

use crate::market::{OrderBook, StrategyTag, TraderId};

pub(super) fn trader(idx: u32) -> TraderId {
    TraderId::new(StrategyTag::LiquidityConsumer, idx)
}

pub(super) fn fresh_book() -> OrderBook {
    OrderBook::new("SIM", "XYZ", 0.01, 100.0, 1)
}
