//! The market scheduler: owns the agent population and the single
//! `&mut OrderBook` borrow, turning each timestep's randomized
//! actuation pass into book mutations, public events and execution
//! reports. Modelled on `zombie-einstein-bourse`'s `Env` driving loop
//! and `athena`'s `SimulationRunner`, adapted to this crate's
//! intent-based `Agent` trait instead of direct book access.

use crate::agents::{Agent, Intent};
use crate::error::SimError;
use crate::feed::{PublicFeed, Subscription};
use crate::market::{ExecutionReport, OrderBook, OrderBookError, OrderbookEvent, PriceImpactRecord, Side, TraderId, Timestep};
use crate::reporting::ReportingSink;
use crate::rng::{SCHEDULER_STREAM, derive_rng};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use tracing::warn;

/// Safety valve on the empty-book bootstrap loop: if the designated
/// bootstrap agent can't non-emptify the book within this many of its
/// own actuations, something is structurally wrong (e.g. its intents
/// are being rejected) and the run is aborted rather than spinning.
const MAX_BOOTSTRAP_ATTEMPTS: usize = 64;

struct Outcome {
    events: Vec<OrderbookEvent>,
    reports: Vec<(TraderId, ExecutionReport)>,
    impact: Option<PriceImpactRecord>,
}

impl Outcome {
    fn empty() -> Self {
        Self { events: Vec::new(), reports: Vec::new(), impact: None }
    }
}

/// Drives one or more agent populations through a sequence of
/// timesteps against a single [`OrderBook`]. The book is mutated only
/// here — agents only ever see `&OrderBook` and express their wishes
/// as [`Intent`]s.
pub struct MarketScheduler {
    agents: Vec<Box<dyn Agent>>,
    index_by_trader: HashMap<TraderId, usize>,
    subscriptions: Vec<Subscription>,
    feed: PublicFeed,
    shuffle_rng: ChaCha8Rng,
    order: Vec<usize>,
    bootstrap_index: usize,
    clock_nanos: u64,
    /// Agents that panicked during `actuate` and are permanently
    /// benched — indexed the same as `agents`. A disabled agent is
    /// never actuated again for the remainder of the run, but still
    /// receives execution reports and public events (it just never
    /// acts on them).
    disabled: Vec<bool>,
}

impl MarketScheduler {
    /// Build a scheduler over `agents`. `bootstrap_index` names the
    /// agent (conventionally a noise trader) the scheduler leans on to
    /// non-emptify the book before a pass begins; `master_seed` is the
    /// run's seed, from which the scheduler derives its own shuffle
    /// stream (kept separate from every agent's own stream).
    pub fn new(agents: Vec<Box<dyn Agent>>, bootstrap_index: usize, master_seed: u64) -> Self {
        assert!(bootstrap_index < agents.len(), "bootstrap_index out of range");
        let mut feed = PublicFeed::new();
        let subscriptions = agents.iter().map(|_| feed.subscribe()).collect();
        let index_by_trader = agents
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id(), i))
            .collect();
        let order = (0..agents.len()).collect();
        let disabled = vec![false; agents.len()];
        Self {
            agents,
            index_by_trader,
            subscriptions,
            feed,
            shuffle_rng: derive_rng(master_seed, SCHEDULER_STREAM),
            order,
            bootstrap_index,
            clock_nanos: 0,
            disabled,
        }
    }

    /// Number of agents in the population.
    pub fn population_size(&self) -> usize {
        self.agents.len()
    }

    fn next_nanos(&mut self) -> u64 {
        self.clock_nanos += 1;
        self.clock_nanos
    }

    fn apply_intent(&mut self, book: &mut OrderBook, trader: TraderId, intent: Intent) -> Outcome {
        let now = self.next_nanos();
        let result: Result<Outcome, OrderBookError> = match intent {
            Intent::Noop => Ok(Outcome::empty()),
            Intent::MarketOrder { side, volume } => {
                let outcome = match side {
                    Side::Buy => book.buy_market_order(trader, volume, now),
                    Side::Sell => book.sell_market_order(trader, volume, now),
                };
                outcome.map(|o| Outcome { events: o.events, reports: o.reports, impact: o.impact })
            }
            Intent::LimitOrder { side, volume, price } => {
                let outcome = match side {
                    Side::Buy => book.buy_limit_order(trader, volume, price, now),
                    Side::Sell => book.sell_limit_order(trader, volume, price, now),
                };
                outcome.map(|o| Outcome {
                    events: o.outcome.events,
                    reports: o.outcome.reports,
                    impact: o.outcome.impact,
                })
            }
            Intent::Cancel { order_id } => {
                Ok(match book.cancel_order(order_id) {
                    Some((event, report)) => Outcome { events: vec![event], reports: vec![report], impact: None },
                    None => Outcome::empty(),
                })
            }
        };

        match result {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(%trader, %err, "order rejected");
                Outcome::empty()
            }
        }
    }

    /// Apply one agent's intents, publishing every event, routing every
    /// execution report to its owner and recording everything in `sink`.
    fn dispatch(&mut self, book: &mut OrderBook, sink: &mut dyn ReportingSink, trader: TraderId, intents: Vec<Intent>) -> Result<(), SimError> {
        for intent in intents {
            let outcome = self.apply_intent(book, trader, intent);
            for event in &outcome.events {
                sink.record_event(event)?;
            }
            self.feed.publish_all(outcome.events);
            if let Some(impact) = &outcome.impact {
                sink.record_impact(impact)?;
            }
            for (owner, report) in outcome.reports {
                if let Some(&idx) = self.index_by_trader.get(&owner) {
                    self.agents[idx].on_execution_report(&report);
                } else {
                    warn!(%owner, "execution report addressed to an unknown trader");
                }
            }
        }
        Ok(())
    }

    /// Keep actuating the bootstrap agent until neither side of the book
    /// is empty, or give up after [`MAX_BOOTSTRAP_ATTEMPTS`].
    fn bootstrap(&mut self, book: &mut OrderBook, sink: &mut dyn ReportingSink, clock: Timestep) -> Result<(), SimError> {
        let mut attempts = 0;
        while book.is_side_empty(Side::Buy) || book.is_side_empty(Side::Sell) {
            if attempts >= MAX_BOOTSTRAP_ATTEMPTS {
                return Err(SimError::Invariant(
                    "book remained empty after exhausting bootstrap attempts".to_string(),
                ));
            }
            attempts += 1;
            let trader = self.agents[self.bootstrap_index].id();
            let intents = self.agents[self.bootstrap_index].actuate(book, clock);
            self.dispatch(book, sink, trader, intents)?;
        }
        Ok(())
    }

    /// Run one full actuation pass: bootstrap if needed, actuate every
    /// still-enabled agent once in this pass's shuffled order, sample
    /// the mid-price, then reshuffle for the next pass.
    ///
    /// A single agent's `actuate` is isolated with `catch_unwind`: a
    /// panicking agent is disabled — flagged in `self.disabled` and
    /// never actuated again for the rest of the run — rather than
    /// aborting the whole run.
    pub fn run_timestep(&mut self, book: &mut OrderBook, sink: &mut dyn ReportingSink, clock: Timestep) -> Result<(), SimError> {
        book.set_timestep(clock);
        self.bootstrap(book, sink, clock)?;

        for i in 0..self.order.len() {
            let idx = self.order[i];
            if self.disabled[idx] {
                continue;
            }
            for event in self.subscriptions[idx].drain() {
                self.agents[idx].on_public_event(&event);
            }

            let agent = &mut self.agents[idx];
            let book_ref = &*book;
            let intents = match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| agent.actuate(book_ref, clock))) {
                Ok(intents) => intents,
                Err(_) => {
                    warn!(trader = %self.agents[idx].id(), "agent panicked during actuate, disabling it for the rest of the run");
                    self.disabled[idx] = true;
                    continue;
                }
            };
            let trader = self.agents[idx].id();
            self.dispatch(book, sink, trader, intents)?;
        }

        sink.record_mid_price(clock, book.mid_price())?;
        self.order.shuffle(&mut self.shuffle_rng);
        Ok(())
    }
}
