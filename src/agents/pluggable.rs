//! The pluggable slot: one population seat reserved for a
//! non-reference, user-supplied strategy. The simulator core has no
//! opinion on its behaviour, only its callback address — this inert
//! default is what runs until something real is swapped in.

use super::{Agent, Intent, TraderState};
use crate::market::{ExecutionReport, OrderBook, OrderbookEvent, TraderId, Timestep};

/// Does nothing every timestep. A placeholder for the population's
/// pluggable seat; replace with a real [`Agent`] impl to experiment
/// with a custom strategy without touching the scheduler.
pub struct InertAgent {
    state: TraderState,
}

impl InertAgent {
    pub fn new(state: TraderState) -> Self {
        Self { state }
    }
}

impl Agent for InertAgent {
    fn id(&self) -> TraderId {
        self.state.id()
    }

    fn cash(&self) -> f64 {
        self.state.cash()
    }

    fn actuate(&mut self, _book: &OrderBook, _clock: Timestep) -> Vec<Intent> {
        vec![Intent::Noop]
    }

    fn on_execution_report(&mut self, report: &ExecutionReport) {
        self.state.apply_report(report);
    }

    fn on_public_event(&mut self, _event: &OrderbookEvent) {}
}
