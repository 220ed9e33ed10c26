//! Liquidity consumer: works a single randomly-sized
//! target volume down over the run, one opportunistic market order at
//! a time.

use super::{Agent, Intent, TraderState};
use crate::config::LiquidityConsumerParams;
use crate::market::{ExecutionReport, OrderBook, OrderbookEvent, Side, TraderId, Timestep};
use rand::Rng;

/// A liquidity consumer: a single persistent buy or sell interest,
/// chipped away at opportunistically against the opposite side's
/// resting depth.
pub struct LiquidityConsumer {
    state: TraderState,
    side: Side,
    remaining: i64,
    params: LiquidityConsumerParams,
}

impl LiquidityConsumer {
    pub fn new(mut state: TraderState) -> Self {
        let params = LiquidityConsumerParams::default();
        let side = if state.rng().r#gen::<bool>() { Side::Buy } else { Side::Sell };
        let remaining = state.rng().gen_range(1..=params.max_initial_volume);
        Self {
            state,
            side,
            remaining,
            params,
        }
    }
}

impl Agent for LiquidityConsumer {
    fn id(&self) -> TraderId {
        self.state.id()
    }

    fn cash(&self) -> f64 {
        self.state.cash()
    }

    fn actuate(&mut self, book: &OrderBook, _clock: Timestep) -> Vec<Intent> {
        if self.remaining <= 0 {
            return vec![Intent::Noop];
        }

        let opposite_best_size = match self.side {
            Side::Buy => book.ask_size(),
            Side::Sell => book.bid_size(),
        } as i64;
        let takeable = self.remaining.min(opposite_best_size);

        let u: f64 = self.state.rng().r#gen();
        let intent = if u < self.params.delta && takeable > 0 {
            Intent::MarketOrder { side: self.side, volume: takeable }
        } else {
            Intent::Noop
        };

        // The opportunity is consumed whether or not we actually traded.
        self.remaining -= takeable;

        vec![intent]
    }

    fn on_execution_report(&mut self, report: &ExecutionReport) {
        self.state.apply_report(report);
    }

    fn on_public_event(&mut self, _event: &OrderbookEvent) {}
}
