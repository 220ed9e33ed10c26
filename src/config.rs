//! Compile-time simulation configuration. These are defaults baked
//! into the binary, not runtime flags — the CLI in `bin/apxr-sim.rs`
//! only ever overrides a handful of them.

use crate::market::DEFAULT_TICK_SIZE;
use serde::Serialize;

/// Population counts for the five reference strategies plus the one
/// pluggable slot, set to the default configuration.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PopulationConfig {
    pub liquidity_consumers: u32,
    pub market_makers: u32,
    pub mean_reversion: u32,
    pub momentum: u32,
    pub noise: u32,
    pub pluggable: u32,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            liquidity_consumers: 5,
            market_makers: 5,
            mean_reversion: 20,
            momentum: 20,
            noise: 40,
            pluggable: 1,
        }
    }
}

impl PopulationConfig {
    /// Total number of agents across every strategy.
    pub fn total(&self) -> u32 {
        self.liquidity_consumers
            + self.market_makers
            + self.mean_reversion
            + self.momentum
            + self.noise
            + self.pluggable
    }
}

/// Noise trader tuning: activation rate, market/limit order mix, and
/// the distributions each order type's price and size are drawn from.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NoiseParams {
    /// Probability of acting at all this timestep
    pub delta: f64,
    /// Probability of a market order, conditional on acting
    pub market_order_prob: f64,
    /// Probability of a limit order, conditional on acting (the
    /// remainder cancels the oldest outstanding order)
    pub limit_order_prob: f64,
    pub market_vol_mu: f64,
    pub market_vol_sigma: f64,
    pub limit_vol_mu: f64,
    pub limit_vol_sigma: f64,
    /// Probability the limit price crosses the spread
    pub p_cross: f64,
    /// Probability the limit price lands inside the spread
    pub p_inside: f64,
    /// Probability the limit price joins the touch
    pub p_spread: f64,
    /// Power-law minimum offset for an off-spread limit price
    pub x_min: f64,
    /// Power-law shape parameter for an off-spread limit price
    pub beta: f64,
    pub bootstrap_price: f64,
    pub bootstrap_spread: f64,
    pub bootstrap_volume: i64,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            delta: 0.75,
            market_order_prob: 0.03,
            limit_order_prob: 0.54,
            market_vol_mu: 7.0,
            market_vol_sigma: 0.1,
            limit_vol_mu: 8.0,
            limit_vol_sigma: 0.7,
            p_cross: 0.003,
            p_inside: 0.098,
            p_spread: 0.173,
            x_min: 0.005,
            beta: 2.72,
            bootstrap_price: 100.0,
            bootstrap_spread: 0.05,
            bootstrap_volume: 1,
        }
    }
}

/// Market maker tuning: activation rate, flow-prediction window, and
/// quoted-size bounds.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MarketMakerParams {
    pub delta: f64,
    /// Number of recent order-flow observations averaged for the
    /// directional prediction
    pub window: usize,
    pub max_volume: i64,
    pub min_volume: i64,
}

impl Default for MarketMakerParams {
    fn default() -> Self {
        Self {
            delta: 0.1,
            window: 50,
            max_volume: 200_000,
            min_volume: 1,
        }
    }
}

/// Liquidity consumer tuning: activation rate and the range its initial
/// target volume is drawn from.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LiquidityConsumerParams {
    pub delta: f64,
    pub max_initial_volume: i64,
}

impl Default for LiquidityConsumerParams {
    fn default() -> Self {
        Self {
            delta: 0.1,
            max_initial_volume: 100_000,
        }
    }
}

/// Momentum trader tuning: activation rate, rate-of-change window and
/// threshold.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MomentumParams {
    pub delta: f64,
    /// Number of trades the rate-of-change is measured back over
    pub window: usize,
    /// Minimum |rate-of-change| required to act
    pub threshold: f64,
}

impl Default for MomentumParams {
    fn default() -> Self {
        Self {
            delta: 0.4,
            window: 5,
            threshold: 0.001,
        }
    }
}

/// Mean-reversion trader tuning: activation rate, order size, deviation
/// threshold and EMA smoothing factor.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MeanReversionParams {
    pub delta: f64,
    pub volume: i64,
    /// Number of running standard deviations the last price must
    /// deviate from the EMA before fading
    pub k: f64,
    /// EMA smoothing factor applied to each observed trade price
    pub alpha: f64,
    /// Window size named by the original windowed-sigma design; unused
    /// by the running Welford estimate this trader actually computes,
    /// kept for parity with the resolved open question on windowing.
    pub window: usize,
}

impl Default for MeanReversionParams {
    fn default() -> Self {
        Self {
            delta: 0.4,
            volume: 1,
            k: 1.0,
            alpha: 0.94,
            window: 50,
        }
    }
}

/// Top-level run configuration.
#[derive(Debug, Clone, Serialize)]
pub struct SimConfig {
    /// Number of independent runs per simulation invocation.
    pub runs: u32,
    /// Timesteps per run.
    pub timesteps: u64,
    /// Venue tick size.
    pub tick_size: f64,
    /// `last_price` the book is initialised with.
    pub initial_price: f64,
    /// `last_size` the book is initialised with.
    pub initial_last_size: u64,
    /// Master RNG seed for the first run; subsequent runs derive their
    /// own seed from it (see `driver.rs`).
    pub master_seed: u64,
    /// Starting cash for every agent.
    pub initial_cash: f64,
    /// Agent population.
    pub population: PopulationConfig,
    /// Output directory for the per-run CSV files.
    pub output_dir: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            runs: 10,
            timesteps: 300_000,
            tick_size: DEFAULT_TICK_SIZE,
            initial_price: 100.0,
            initial_last_size: 1,
            master_seed: 0,
            initial_cash: 1_000_000.0,
            population: PopulationConfig::default(),
            output_dir: "output".to_string(),
        }
    }
}
