//! Noise trader: the bulk of order flow, reacting to
//! nothing but its own random draws and the current best quotes.

use super::{Agent, Intent, TraderState};
use crate::config::NoiseParams;
use crate::market::{ExecutionReport, OrderBook, OrderbookEvent, Side, TraderId, Timestep};
use rand::Rng;

/// A noise trader: places and cancels orders with no view on value,
/// the background process the other strategies trade against.
pub struct NoiseTrader {
    state: TraderState,
    params: NoiseParams,
}

impl NoiseTrader {
    pub fn new(state: TraderState) -> Self {
        Self {
            state,
            params: NoiseParams::default(),
        }
    }

    fn bootstrap_intents(&self, book: &OrderBook) -> Vec<Intent> {
        let p = &self.params;
        let bid_empty = book.is_side_empty(Side::Buy);
        let ask_empty = book.is_side_empty(Side::Sell);
        match (bid_empty, ask_empty) {
            (true, true) => vec![
                Intent::LimitOrder {
                    side: Side::Buy,
                    volume: p.bootstrap_volume,
                    price: p.bootstrap_price,
                },
                Intent::LimitOrder {
                    side: Side::Sell,
                    volume: p.bootstrap_volume,
                    price: p.bootstrap_price + p.bootstrap_spread,
                },
            ],
            (true, false) => vec![Intent::LimitOrder {
                side: Side::Buy,
                volume: p.bootstrap_volume,
                price: book.ask_price() - p.bootstrap_spread,
            }],
            (false, true) => vec![Intent::LimitOrder {
                side: Side::Sell,
                volume: p.bootstrap_volume,
                price: book.bid_price() + p.bootstrap_spread,
            }],
            (false, false) => Vec::new(),
        }
    }

    /// Off-spread offset: a power-law-distributed worsening of the
    /// quoted side (buy below the bid, sell above the ask), per the
    /// resolved reading of the off-spread direction open question.
    fn off_spread_delta(params: &NoiseParams, spread: f64, u: f64) -> f64 {
        spread + params.x_min * (1.0 - u).powf(-1.0 / (params.beta - 1.0))
    }
}

impl Agent for NoiseTrader {
    fn id(&self) -> TraderId {
        self.state.id()
    }

    fn cash(&self) -> f64 {
        self.state.cash()
    }

    fn actuate(&mut self, book: &OrderBook, _clock: Timestep) -> Vec<Intent> {
        if book.is_side_empty(Side::Buy) || book.is_side_empty(Side::Sell) {
            return self.bootstrap_intents(book);
        }

        let p = self.params;
        let rng = self.state.rng();
        let u: f64 = rng.r#gen();
        if u >= p.delta {
            return vec![Intent::Noop];
        }

        let side = if rng.r#gen::<bool>() { Side::Buy } else { Side::Sell };
        let a: f64 = rng.r#gen();

        if a < p.market_order_prob {
            let opposite_best_size = match side {
                Side::Buy => book.ask_size(),
                Side::Sell => book.bid_size(),
            };
            let u2: f64 = rng.r#gen();
            let raw = (p.market_vol_mu + p.market_vol_sigma * u2).exp();
            let volume = ((opposite_best_size as f64 / 2.0).min(raw)).max(1.0).round() as i64;
            vec![Intent::MarketOrder { side, volume }]
        } else if a < p.market_order_prob + p.limit_order_prob {
            let l: f64 = rng.r#gen();
            let tick = book.tick_size();
            let bid = book.bid_price();
            let ask = book.ask_price();

            let price = if l < p.p_cross {
                match side {
                    Side::Buy => ask,
                    Side::Sell => bid,
                }
            } else if l < p.p_cross + p.p_inside {
                let lo = bid.min(ask);
                let hi = bid.max(ask);
                let steps = ((hi - lo) / tick).floor().max(0.0) as u64;
                let k = if steps == 0 { 0 } else { rng.gen_range(0..=steps) };
                lo + k as f64 * tick
            } else if l < p.p_cross + p.p_inside + p.p_spread {
                match side {
                    Side::Buy => bid,
                    Side::Sell => ask,
                }
            } else {
                let u3: f64 = rng.r#gen();
                let delta = Self::off_spread_delta(&p, ask - bid, u3);
                match side {
                    Side::Buy => bid - delta,
                    Side::Sell => ask + delta,
                }
            };

            let u4: f64 = rng.r#gen();
            let volume = (p.limit_vol_mu + p.limit_vol_sigma * u4).exp().round().max(1.0) as i64;
            vec![Intent::LimitOrder { side, volume, price }]
        } else if let Some(order_id) = self.state.oldest_outstanding() {
            vec![Intent::Cancel { order_id }]
        } else {
            vec![Intent::Noop]
        }
    }

    fn on_execution_report(&mut self, report: &ExecutionReport) {
        self.state.apply_report(report);
    }

    fn on_public_event(&mut self, _event: &OrderbookEvent) {}
}
