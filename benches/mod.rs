//! Throughput benchmarks for the matching engine and a full actuation
//! pass, in the teacher's one-`criterion_main!`-per-crate layout.

use apxr_sim::agents::liquidity_consumer::LiquidityConsumer;
use apxr_sim::agents::noise::NoiseTrader;
use apxr_sim::agents::{Agent, TraderState};
use apxr_sim::market::{OrderBook, StrategyTag, TraderId};
use apxr_sim::scheduler::MarketScheduler;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;

fn trader_state(tag: StrategyTag, idx: u32, seed: u64) -> TraderState {
    TraderState::new(TraderId::new(tag, idx), 1_000_000.0, ChaCha8Rng::seed_from_u64(seed))
}

/// No-op sink so the benchmark measures matching/scheduling cost only.
struct NullSink;
impl apxr_sim::reporting::ReportingSink for NullSink {
    fn record_mid_price(&mut self, _t: u64, _m: f64) -> Result<(), apxr_sim::SimError> {
        Ok(())
    }
    fn record_event(&mut self, _e: &apxr_sim::market::OrderbookEvent) -> Result<(), apxr_sim::SimError> {
        Ok(())
    }
    fn record_impact(&mut self, _i: &apxr_sim::market::PriceImpactRecord) -> Result<(), apxr_sim::SimError> {
        Ok(())
    }
    fn flush(&mut self) -> Result<(), apxr_sim::SimError> {
        Ok(())
    }
}

fn bench_limit_order_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("OrderBook - limit order insertion");
    for &depth in &[100, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("buy_limit_order", depth), &depth, |b, &depth| {
            b.iter_with_setup(
                || {
                    let mut book = OrderBook::new("SIM", "XYZ", 0.01, 100.0, 1);
                    let trader = TraderId::new(StrategyTag::Noise, 0);
                    for i in 0..depth {
                        let price = 90.0 - (i as f64) * 0.01;
                        book.buy_limit_order(trader, 10, price, i as u64).unwrap();
                    }
                    book
                },
                |mut book| {
                    let trader = TraderId::new(StrategyTag::Noise, 1);
                    black_box(book.buy_limit_order(trader, 10, 89.0, 0).unwrap());
                },
            );
        });
    }
    group.finish();
}

fn bench_crossing_market_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("OrderBook - crossing market order");
    group.bench_function("sell_market_order_against_1000_bids", |b| {
        b.iter_with_setup(
            || {
                let mut book = OrderBook::new("SIM", "XYZ", 0.01, 100.0, 1);
                let trader = TraderId::new(StrategyTag::Noise, 0);
                for i in 0..1_000 {
                    book.buy_limit_order(trader, 10, 100.0 - (i as f64) * 0.01, i as u64).unwrap();
                }
                book
            },
            |mut book| {
                let trader = TraderId::new(StrategyTag::Noise, 1);
                black_box(book.sell_market_order(trader, 5_000, 0).unwrap());
            },
        );
    });
    group.finish();
}

fn bench_scheduler_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("MarketScheduler - actuation pass");
    group.bench_function("100_agents_one_timestep", |b| {
        b.iter_with_setup(
            || {
                let mut book = OrderBook::new("SIM", "XYZ", 0.01, 100.0, 1);
                let agents: Vec<Box<dyn Agent>> = (0..100)
                    .map(|i| -> Box<dyn Agent> {
                        if i % 4 == 0 {
                            Box::new(LiquidityConsumer::new(trader_state(StrategyTag::LiquidityConsumer, i, i as u64)))
                        } else {
                            Box::new(NoiseTrader::new(trader_state(StrategyTag::Noise, i, i as u64)))
                        }
                    })
                    .collect();
                let scheduler = MarketScheduler::new(agents, 1, 42);
                (scheduler, book, NullSink)
            },
            |(mut scheduler, mut book, mut sink)| {
                black_box(scheduler.run_timestep(&mut book, &mut sink, 0).unwrap());
            },
        );
    });
    group.finish();
}

criterion_group!(benches, bench_limit_order_insertion, bench_crossing_market_order, bench_scheduler_pass);
criterion_main!(benches);
