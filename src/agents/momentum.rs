//! Momentum trader: trades in the direction of recent
//! price change, sized by its own cash balance.

use super::{Agent, Intent, TraderState};
use crate::config::MomentumParams;
use crate::market::{DEFAULT_TICK_SIZE, ExecutionReport, OrderBook, OrderPrice, OrderbookEvent, Side, TraderId, Timestep};
use rand::Rng;
use std::collections::VecDeque;

/// A momentum trader: buys into a rising market, sells into a falling
/// one, using a signed rate-of-change over its recent trades.
pub struct MomentumTrader {
    state: TraderState,
    window: VecDeque<f64>,
    params: MomentumParams,
}

impl MomentumTrader {
    pub fn new(state: TraderState) -> Self {
        let params = MomentumParams::default();
        Self {
            state,
            window: VecDeque::with_capacity(params.window),
            params,
        }
    }

    fn rate_of_change(&self, last_price: f64) -> Option<f64> {
        let tail = *self.window.front()?;
        if tail == 0.0 {
            return None;
        }
        Some((last_price - tail) / tail)
    }
}

impl Agent for MomentumTrader {
    fn id(&self) -> TraderId {
        self.state.id()
    }

    fn cash(&self) -> f64 {
        self.state.cash()
    }

    fn actuate(&mut self, book: &OrderBook, _clock: Timestep) -> Vec<Intent> {
        let u: f64 = self.state.rng().r#gen();
        if u >= self.params.delta {
            return vec![Intent::Noop];
        }

        let Some(roc) = self.rate_of_change(book.last_price()) else {
            return vec![Intent::Noop];
        };

        if roc >= self.params.threshold {
            let volume = (roc * self.state.cash()).round().max(1.0) as i64;
            vec![Intent::MarketOrder { side: Side::Buy, volume }]
        } else if roc <= -self.params.threshold {
            let volume = (roc.abs() * self.state.cash()).round().max(1.0) as i64;
            vec![Intent::MarketOrder { side: Side::Sell, volume }]
        } else {
            vec![Intent::Noop]
        }
    }

    fn on_execution_report(&mut self, report: &ExecutionReport) {
        self.state.apply_report(report);
    }

    fn on_public_event(&mut self, event: &OrderbookEvent) {
        if !event.is_transaction() {
            return;
        }
        if let OrderPrice::Limit(ticks) = event.price {
            if self.window.len() == self.params.window {
                self.window.pop_front();
            }
            self.window.push_back(ticks.to_decimal(DEFAULT_TICK_SIZE));
        }
    }
}
