//! The simulation driver: orchestrates `config.runs` independent runs,
//! each with a fresh agent population, a fresh book and its own set of
//! output files, per the run-rotation contract.

use crate::agents::liquidity_consumer::LiquidityConsumer;
use crate::agents::market_maker::MarketMaker;
use crate::agents::mean_reversion::MeanReversionTrader;
use crate::agents::momentum::MomentumTrader;
use crate::agents::noise::NoiseTrader;
use crate::agents::pluggable::InertAgent;
use crate::agents::{Agent, TraderState};
use crate::config::SimConfig;
use crate::error::SimError;
use crate::market::{OrderBook, StrategyTag, TraderId};
use crate::reporting::{CsvReportingSink, ReportingSink};
use crate::rng::derive_rng;
use crate::scheduler::MarketScheduler;
use std::path::Path;
use tracing::info;

const VENUE: &str = "SIM";
const TICKER: &str = "APXR";

/// Runs the configured simulation end to end: wipes the output
/// directory once, then executes each run with its own deterministic
/// seed derived from `config.master_seed`.
pub struct SimulationDriver {
    config: SimConfig,
}

impl SimulationDriver {
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }

    /// Execute every configured run in sequence.
    pub fn run(&self) -> Result<(), SimError> {
        CsvReportingSink::reset_output_dir(Path::new(&self.config.output_dir))?;
        for run in 0..self.config.runs {
            self.run_one(run)?;
        }
        Ok(())
    }

    fn run_one(&self, run: u32) -> Result<(), SimError> {
        let run_seed = crate::rng::derive_seed(self.config.master_seed, run as u64);
        let (agents, bootstrap_index) = self.build_population(run_seed);
        info!(run, run_seed, population = agents.len(), "starting run");

        let mut scheduler = MarketScheduler::new(agents, bootstrap_index, run_seed);
        let mut book = OrderBook::new(
            VENUE,
            TICKER,
            self.config.tick_size,
            self.config.initial_price,
            self.config.initial_last_size,
        );
        let mut sink = CsvReportingSink::create(Path::new(&self.config.output_dir), run, self.config.tick_size)?;

        for clock in 0..self.config.timesteps {
            scheduler.run_timestep(&mut book, &mut sink, clock)?;
        }

        sink.flush()?;
        info!(run, "run complete");
        Ok(())
    }

    /// Instantiate the population described by `config.population`,
    /// each agent with its own RNG stream derived from `run_seed`, and
    /// report the index of a noise trader the scheduler can lean on to
    /// bootstrap an empty book.
    fn build_population(&self, run_seed: u64) -> (Vec<Box<dyn Agent>>, usize) {
        let pop = &self.config.population;
        let cash = self.config.initial_cash;
        let mut agents: Vec<Box<dyn Agent>> = Vec::with_capacity(pop.total() as usize);
        let mut stream = 0u64;
        let mut next_state = |tag: StrategyTag, idx: u32| -> TraderState {
            let rng = derive_rng(run_seed, stream);
            stream += 1;
            TraderState::new(TraderId::new(tag, idx), cash, rng)
        };

        let bootstrap_index = agents.len();
        for idx in 0..pop.noise {
            agents.push(Box::new(NoiseTrader::new(next_state(StrategyTag::Noise, idx))));
        }
        for idx in 0..pop.market_makers {
            agents.push(Box::new(MarketMaker::new(next_state(StrategyTag::MarketMaker, idx))));
        }
        for idx in 0..pop.liquidity_consumers {
            agents.push(Box::new(LiquidityConsumer::new(next_state(StrategyTag::LiquidityConsumer, idx))));
        }
        for idx in 0..pop.momentum {
            agents.push(Box::new(MomentumTrader::new(next_state(StrategyTag::Momentum, idx))));
        }
        for idx in 0..pop.mean_reversion {
            agents.push(Box::new(MeanReversionTrader::new(next_state(StrategyTag::MeanReversion, idx))));
        }
        for idx in 0..pop.pluggable {
            agents.push(Box::new(InertAgent::new(next_state(StrategyTag::Pluggable, idx))));
        }

        (agents, bootstrap_index)
    }
}
