//! `apxr-sim`: an agent-based market microstructure simulator.
//!
//! A single venue/ticker limit order book (see [`market`]) is traded by
//! a population of heterogeneous strategies (see [`agents`]) under a
//! deterministic, randomized-order scheduler ([`scheduler`]). Each run
//! emits a stream of [`market::OrderbookEvent`]s on a [`feed::PublicFeed`]
//! and appends mid-price, trade, order-side and price-impact records to
//! CSV via a [`reporting::ReportingSink`]; [`driver`] orchestrates the
//! configured number of independent runs.

pub mod agents;
pub mod config;
pub mod driver;
pub mod error;
pub mod feed;
pub mod market;
pub mod reporting;
pub mod rng;
pub mod scheduler;

pub use config::{PopulationConfig, SimConfig};
pub use error::SimError;
