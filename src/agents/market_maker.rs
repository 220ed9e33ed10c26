//! Market maker: quotes both sides, skewed by a short
//! rolling prediction of order-flow direction.

use super::{Agent, Intent, TraderState};
use crate::config::MarketMakerParams;
use crate::market::{EventKind, ExecutionReport, OrderBook, OrderbookEvent, Side, TraderId, Timestep};
use rand::Rng;
use std::collections::VecDeque;

/// A market maker: tracks recent order-flow direction and leans its
/// quoted pair toward (or away from) the predicted side.
pub struct MarketMaker {
    state: TraderState,
    window: VecDeque<f64>,
    params: MarketMakerParams,
}

impl MarketMaker {
    pub fn new(state: TraderState) -> Self {
        let params = MarketMakerParams::default();
        Self {
            state,
            window: VecDeque::with_capacity(params.window),
            params,
        }
    }

    fn prediction(&self) -> f64 {
        if self.window.is_empty() {
            return 0.5;
        }
        self.window.iter().sum::<f64>() / self.window.len() as f64
    }
}

impl Agent for MarketMaker {
    fn id(&self) -> TraderId {
        self.state.id()
    }

    fn cash(&self) -> f64 {
        self.state.cash()
    }

    fn actuate(&mut self, book: &OrderBook, _clock: Timestep) -> Vec<Intent> {
        let prediction = self.prediction();
        let u: f64 = self.state.rng().r#gen();
        if u >= self.params.delta {
            return vec![Intent::Noop];
        }

        let mut intents: Vec<Intent> = self
            .state
            .outstanding()
            .map(|o| Intent::Cancel { order_id: o.order_id })
            .collect();

        let ask = book.ask_price();
        let bid = book.bid_price();
        let skewed_vol: i64 = self.state.rng().gen_range(1..=self.params.max_volume);

        let (buy_vol, sell_vol) = if prediction < 0.5 {
            (self.params.min_volume, skewed_vol)
        } else {
            (skewed_vol, self.params.min_volume)
        };

        intents.push(Intent::LimitOrder {
            side: Side::Buy,
            volume: buy_vol,
            price: bid,
        });
        intents.push(Intent::LimitOrder {
            side: Side::Sell,
            volume: sell_vol,
            price: ask,
        });

        self.state.debit(ask * sell_vol as f64 + bid * buy_vol as f64);

        intents
    }

    fn on_execution_report(&mut self, report: &ExecutionReport) {
        self.state.apply_report(report);
    }

    fn on_public_event(&mut self, event: &OrderbookEvent) {
        if !matches!(event.kind, EventKind::NewMarketOrder | EventKind::NewLimitOrder) {
            return;
        }
        let side_value = match event.direction {
            Side::Buy => 0.0,
            Side::Sell => 1.0,
        };
        if self.window.len() == self.params.window {
            self.window.pop_front();
        }
        self.window.push_back(side_value);
    }
}
