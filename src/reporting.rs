//! The reporting sink: appends mid-price, trade, order-side and
//! price-impact records to per-run CSV files, in the style of one
//! small writer per concern.

use crate::error::SimError;
use crate::market::{EventKind, OrderPrice, OrderbookEvent, PriceImpactRecord, Side, Ticks, Timestep};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Everything the simulation wants to record, decoupled from how (or
/// whether) it's persisted — a run with reporting disabled can plug in
/// a no-op implementation without touching the scheduler or driver.
pub trait ReportingSink {
    /// One row per timestep: the mid-price sampled at the end of the pass.
    fn record_mid_price(&mut self, timestep: Timestep, mid: f64) -> Result<(), SimError>;

    /// Route a single orderbook event to the trade / order-side CSVs,
    /// whichever (if any) it belongs in.
    fn record_event(&mut self, event: &OrderbookEvent) -> Result<(), SimError>;

    /// One row per aggressing market order: volume and log-impact.
    fn record_impact(&mut self, impact: &PriceImpactRecord) -> Result<(), SimError>;

    /// Flush all buffered writers (called at the end of a run).
    fn flush(&mut self) -> Result<(), SimError>;
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// CSV-backed [`ReportingSink`], one instance per run. File names are
/// keyed by run number, per the output-rotation contract.
pub struct CsvReportingSink {
    tick_size: f64,
    mid_prices: csv::Writer<fs::File>,
    trades: csv::Writer<fs::File>,
    order_sides: csv::Writer<fs::File>,
    price_impacts: csv::Writer<fs::File>,
}

impl CsvReportingSink {
    /// Open (truncating) the four CSV files for `run` under `output_dir`,
    /// creating the directory if needed.
    pub fn create(output_dir: &Path, run: u32, tick_size: f64) -> Result<Self, SimError> {
        fs::create_dir_all(output_dir)?;
        let writer = |name: &str| -> Result<csv::Writer<fs::File>, SimError> {
            csv::WriterBuilder::new()
                .has_headers(false)
                .from_path(output_dir.join(name))
                .map_err(SimError::Csv)
        };
        info!(run, ?output_dir, "opening reporting sink for run");
        Ok(Self {
            tick_size,
            mid_prices: writer(&format!("apxr_mid_prices{run}.csv"))?,
            trades: writer(&format!("apxr_trades{run}.csv"))?,
            order_sides: writer(&format!("apxr_order_sides{run}.csv"))?,
            price_impacts: writer(&format!("apxr_price_impacts{run}.csv"))?,
        })
    }

    /// Wipe and recreate the output directory — called once, before
    /// the first run of a simulation invocation.
    pub fn reset_output_dir(output_dir: &Path) -> Result<(), SimError> {
        if output_dir.exists() {
            fs::remove_dir_all(output_dir)?;
        }
        fs::create_dir_all(output_dir)?;
        Ok(())
    }
}

impl ReportingSink for CsvReportingSink {
    fn record_mid_price(&mut self, _timestep: Timestep, mid: f64) -> Result<(), SimError> {
        self.mid_prices.serialize((round2(mid),))?;
        Ok(())
    }

    fn record_event(&mut self, event: &OrderbookEvent) -> Result<(), SimError> {
        if matches!(event.kind, EventKind::NewMarketOrder | EventKind::NewLimitOrder) {
            let side_code: u8 = match event.direction {
                Side::Buy => 0,
                Side::Sell => 1,
            };
            self.order_sides.serialize((side_code,))?;
        }
        if event.is_transaction() {
            let price = match event.price {
                OrderPrice::Limit(ticks) => ticks.to_decimal(self.tick_size),
                OrderPrice::Market => {
                    warn!(uid = event.uid, "transactional event carried no trade price");
                    Ticks(0).to_decimal(self.tick_size)
                }
            };
            self.trades.serialize((price,))?;
        }
        Ok(())
    }

    fn record_impact(&mut self, impact: &PriceImpactRecord) -> Result<(), SimError> {
        self.price_impacts.serialize((impact.volume, impact.log_impact()))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SimError> {
        self.mid_prices.flush()?;
        self.trades.flush()?;
        self.order_sides.flush()?;
        self.price_impacts.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::StrategyTag;
    use tempfile::tempdir;

    fn sample_fill_event(uid: u64, direction: Side) -> OrderbookEvent {
        OrderbookEvent {
            uid,
            timestep: 0,
            order_id: 1,
            trader: crate::market::TraderId::new(StrategyTag::Noise, 0),
            kind: EventKind::fill(direction, true),
            volume: 10,
            price: OrderPrice::Limit(Ticks(10_050)),
            direction,
        }
    }

    #[test]
    fn mid_price_is_rounded_to_two_decimals() {
        let dir = tempdir().unwrap();
        let mut sink = CsvReportingSink::create(dir.path(), 0, 0.01).unwrap();
        sink.record_mid_price(0, 100.005).unwrap();
        sink.flush().unwrap();
        let contents = fs::read_to_string(dir.path().join("apxr_mid_prices0.csv")).unwrap();
        assert_eq!(contents.trim(), "100.01");
    }

    #[test]
    fn transactional_events_append_to_trades_csv() {
        let dir = tempdir().unwrap();
        let mut sink = CsvReportingSink::create(dir.path(), 0, 0.01).unwrap();
        sink.record_event(&sample_fill_event(1, Side::Buy)).unwrap();
        sink.record_event(&sample_fill_event(2, Side::Sell)).unwrap();
        sink.flush().unwrap();
        let contents = fs::read_to_string(dir.path().join("apxr_trades0.csv")).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn reset_output_dir_wipes_prior_run_files() {
        let dir = tempdir().unwrap();
        let stale = dir.path().join("stale.csv");
        fs::write(&stale, "leftover").unwrap();
        CsvReportingSink::reset_output_dir(dir.path()).unwrap();
        assert!(!stale.exists());
    }
}
