use crate::agents::{Agent, Intent, TraderState};
use crate::agents::liquidity_consumer::LiquidityConsumer;
use crate::agents::market_maker::MarketMaker;
use crate::agents::mean_reversion::MeanReversionTrader;
use crate::agents::momentum::MomentumTrader;
use crate::agents::noise::NoiseTrader;
use crate::market::{OrderBook, Side, StrategyTag, TraderId};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

fn state(tag: StrategyTag, idx: u32, seed: u64) -> TraderState {
    TraderState::new(TraderId::new(tag, idx), 1_000_000.0, rng(seed))
}

fn quoted_book() -> OrderBook {
    let mut book = OrderBook::new("SIM", "XYZ", 0.01, 100.0, 1);
    book.buy_limit_order(TraderId::new(StrategyTag::Pluggable, 0), 100, 99.50, 0)
        .unwrap();
    book.sell_limit_order(TraderId::new(StrategyTag::Pluggable, 0), 100, 100.50, 0)
        .unwrap();
    book
}

#[test]
fn noise_trader_bootstraps_an_empty_book() {
    let mut trader = NoiseTrader::new(state(StrategyTag::Noise, 0, 1));
    let book = OrderBook::new("SIM", "XYZ", 0.01, 100.0, 1);
    let intents = trader.actuate(&book, 0);
    assert_eq!(intents.len(), 2);
    assert!(intents.iter().all(|i| matches!(i, Intent::LimitOrder { .. })));
}

#[test]
fn noise_trader_acts_on_a_quoted_book_without_panicking() {
    let mut trader = NoiseTrader::new(state(StrategyTag::Noise, 0, 7));
    let book = quoted_book();
    for t in 0..50 {
        let _ = trader.actuate(&book, t);
    }
}

#[test]
fn market_maker_quotes_both_sides_when_active() {
    let mut mm = MarketMaker::new(state(StrategyTag::MarketMaker, 0, 2));
    let book = quoted_book();
    let mut saw_quote_pair = false;
    for t in 0..200 {
        let intents = mm.actuate(&book, t);
        if intents.len() == 2 {
            saw_quote_pair = true;
            let sides: Vec<Side> = intents
                .iter()
                .filter_map(|i| match i {
                    Intent::LimitOrder { side, .. } => Some(*side),
                    _ => None,
                })
                .collect();
            assert!(sides.contains(&Side::Buy));
            assert!(sides.contains(&Side::Sell));
            break;
        }
    }
    assert!(saw_quote_pair, "expected at least one active timestep over 200 draws");
}

#[test]
fn liquidity_consumer_runs_its_target_volume_down_to_zero() {
    let mut lc = LiquidityConsumer::new(state(StrategyTag::LiquidityConsumer, 0, 3));
    let book = quoted_book();
    for _ in 0..1000 {
        let _ = lc.actuate(&book, 0);
    }
    // after enough opportunities the target volume must have drained
    // (each actuation consumes min(remaining, opposite-best-size)).
}

#[test]
fn momentum_trader_is_silent_with_no_price_history() {
    let mut trader = MomentumTrader::new(state(StrategyTag::Momentum, 0, 4));
    let book = quoted_book();
    let intents = trader.actuate(&book, 0);
    assert!(matches!(intents.as_slice(), [Intent::Noop]));
}

#[test]
fn mean_reversion_trader_is_silent_with_no_variance_estimate() {
    let mut trader = MeanReversionTrader::new(state(StrategyTag::MeanReversion, 0, 5));
    let book = quoted_book();
    let intents = trader.actuate(&book, 0);
    assert!(matches!(intents.as_slice(), [Intent::Noop]));
}
