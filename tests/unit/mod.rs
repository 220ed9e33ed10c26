//! Concrete scenario tests, one per case walked through in review.

use apxr_sim::agents::noise::NoiseTrader;
use apxr_sim::agents::{Agent, TraderState};
use apxr_sim::market::{ExecutionReportKind, OrderBook, StrategyTag, TraderId};
use apxr_sim::reporting::ReportingSink;
use apxr_sim::scheduler::MarketScheduler;
use apxr_sim::{SimError, market};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn trader(tag: StrategyTag, idx: u32) -> TraderId {
    TraderId::new(tag, idx)
}

fn book() -> OrderBook {
    OrderBook::new("SIM", "XYZ", 0.01, 100.0, 1)
}

/// Scenario 1: empty-book limit insertion.
#[test]
fn empty_book_limit_insertion() {
    let mut b = book();
    let t1 = trader(StrategyTag::LiquidityConsumer, 1);

    let outcome = b.buy_limit_order(t1, 100, 99.99, 0).unwrap();

    assert!(outcome.resting.is_some());
    assert_eq!(b.bid_price(), 99.99);
    assert_eq!(b.bid_size(), 100);
    assert!(b.is_side_empty(market::Side::Sell));
    assert_eq!(outcome.outcome.events.len(), 1);
    assert_eq!(outcome.outcome.events[0].kind, market::EventKind::NewLimitOrder);
}

/// Scenario 2: crossing market buy fully fills a single resting ask.
#[test]
fn crossing_market_buy_fully_fills_resting_ask() {
    let mut b = book();
    let t2 = trader(StrategyTag::LiquidityConsumer, 2);
    let t1 = trader(StrategyTag::LiquidityConsumer, 1);
    b.sell_limit_order(t2, 100, 100.01, 0).unwrap();

    let mid_before = b.mid_price();
    let outcome = b.buy_market_order(t1, 100, 1).unwrap();

    assert!(b.is_side_empty(market::Side::Sell));
    assert_eq!(b.last_price(), 100.01);
    assert_eq!(b.last_size(), 100);
    assert_eq!(outcome.reports.len(), 2);
    assert!(outcome.reports.iter().all(|(_, r)| matches!(r.kind, ExecutionReportKind::FullFill)));
    let impact = outcome.impact.expect("a fully-matched market order must carry a price-impact record");
    assert_eq!(impact.mid_before, mid_before);
    assert_eq!(impact.mid_after, b.mid_price());
}

/// Scenario 3: a crossing limit order partially fills, then rests the residual.
#[test]
fn partial_fill_then_rest() {
    let mut b = book();
    let t2 = trader(StrategyTag::LiquidityConsumer, 2);
    let t1 = trader(StrategyTag::LiquidityConsumer, 1);
    b.sell_limit_order(t2, 40, 100.01, 0).unwrap();
    b.sell_limit_order(t2, 30, 100.02, 1).unwrap();

    let outcome = b.buy_limit_order(t1, 100, 100.01, 2).unwrap();

    assert_eq!(outcome.resting.as_ref().unwrap().volume, 60);
    assert_eq!(b.bid_price(), 100.01);
    assert_eq!(b.bid_size(), 60);
    // the 100.01 ask is gone, the 100.02 ask is untouched
    assert_eq!(b.ask_price(), 100.02);
    assert_eq!(b.ask_size(), 30);
}

/// Scenario 4: FIFO at a single price level.
#[test]
fn fifo_at_a_price_level() {
    let mut b = book();
    let ta = trader(StrategyTag::LiquidityConsumer, 1);
    let tb = trader(StrategyTag::LiquidityConsumer, 2);
    let tc = trader(StrategyTag::LiquidityConsumer, 3);
    b.buy_limit_order(ta, 10, 100.00, 0).unwrap();
    b.buy_limit_order(tb, 10, 100.00, 1).unwrap();

    b.sell_market_order(tc, 15, 2).unwrap();

    assert_eq!(b.bid_size(), 5);
    assert_eq!(b.bid_price(), 100.00);
}

/// Scenario 5: cancellation is a one-shot, idempotent operation.
#[test]
fn cancellation_is_idempotent() {
    let mut b = book();
    let t1 = trader(StrategyTag::LiquidityConsumer, 1);
    let outcome = b.sell_limit_order(t1, 25, 100.50, 0).unwrap();
    let order_id = outcome.resting.unwrap().order_id;

    let (event, (owner, report)) = b.cancel_order(order_id).expect("order must exist");
    assert_eq!(event.kind, market::EventKind::CancelLimitOrder);
    assert_eq!(event.volume, 25);
    assert_eq!(owner, t1);
    assert!(matches!(report.kind, ExecutionReportKind::Cancelled));
    assert!(b.is_side_empty(market::Side::Sell));

    assert!(b.cancel_order(order_id).is_none());
}

/// Scenario 6: the scheduler bootstraps an empty book before sampling
/// the first mid-price.
#[test]
fn scheduler_bootstraps_an_empty_book() {
    struct NullSink;
    impl ReportingSink for NullSink {
        fn record_mid_price(&mut self, _t: u64, _m: f64) -> Result<(), SimError> {
            Ok(())
        }
        fn record_event(&mut self, _e: &market::OrderbookEvent) -> Result<(), SimError> {
            Ok(())
        }
        fn record_impact(&mut self, _i: &market::PriceImpactRecord) -> Result<(), SimError> {
            Ok(())
        }
        fn flush(&mut self) -> Result<(), SimError> {
            Ok(())
        }
    }

    let mut b = book();
    assert!(b.is_side_empty(market::Side::Buy));
    assert!(b.is_side_empty(market::Side::Sell));

    let noise = TraderState::new(trader(StrategyTag::Noise, 0), 1_000_000.0, ChaCha8Rng::seed_from_u64(1));
    let other = TraderState::new(trader(StrategyTag::Noise, 1), 1_000_000.0, ChaCha8Rng::seed_from_u64(2));
    let agents: Vec<Box<dyn Agent>> = vec![Box::new(NoiseTrader::new(noise)), Box::new(NoiseTrader::new(other))];
    let mut scheduler = MarketScheduler::new(agents, 0, 99);
    let mut sink = NullSink;

    scheduler.run_timestep(&mut b, &mut sink, 0).unwrap();

    assert!(!b.is_side_empty(market::Side::Buy));
    assert!(!b.is_side_empty(market::Side::Sell));
}
