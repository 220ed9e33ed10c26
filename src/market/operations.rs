//! Public submission API: market orders, limit orders and cancellation.
//!
//! Every function here validates its input before touching any book
//! state — a rejected order leaves no trace in the event stream.

use super::book::{ExecutionReport, ExecutionReportKind, LimitOrderOutcome, MatchOutcome, OrderBook};
use super::error::OrderBookError;
use super::event::{EventKind, OrderbookEvent, PriceImpactRecord};
use super::level::PriceLevel;
use super::types::{Order, OrderId, OrderPrice, Side, Ticks, TraderId, Volume};

fn validate_volume(side: Side, volume: i64) -> Result<Volume, OrderBookError> {
    if volume <= 0 {
        return Err(OrderBookError::NonPositiveVolume { side, volume });
    }
    Ok(volume as Volume)
}

fn validate_price(side: Side, price: f64, tick_size: f64) -> Result<Ticks, OrderBookError> {
    Ticks::from_decimal(price, tick_size).ok_or(OrderBookError::NonPositivePrice {
        side,
        price,
        tick_size,
    })
}

impl OrderBook {
    /// Submit a market buy order: match immediately against the best
    /// available asks, discarding any unfilled residual.
    pub fn buy_market_order(
        &mut self,
        trader: TraderId,
        volume: i64,
        now_nanos: u64,
    ) -> Result<MatchOutcome, OrderBookError> {
        self.market_order(Side::Buy, trader, volume, now_nanos)
    }

    /// Submit a market sell order. See [`Self::buy_market_order`].
    pub fn sell_market_order(
        &mut self,
        trader: TraderId,
        volume: i64,
        now_nanos: u64,
    ) -> Result<MatchOutcome, OrderBookError> {
        self.market_order(Side::Sell, trader, volume, now_nanos)
    }

    fn market_order(
        &mut self,
        side: Side,
        trader: TraderId,
        volume: i64,
        _now_nanos: u64,
    ) -> Result<MatchOutcome, OrderBookError> {
        let volume = validate_volume(side, volume)?;
        let order_id = self.next_order_id();
        let mut outcome = MatchOutcome::default();
        outcome.events.push(self.new_event(
            order_id,
            trader,
            EventKind::NewMarketOrder,
            volume,
            OrderPrice::Market,
            side,
        ));

        let mid_before = self.mid_price();
        let (_, matched) = self.execute_match(side, order_id, trader, volume, None);
        let any_fill = !matched.events.is_empty();
        outcome.events.extend(matched.events);
        outcome.reports.extend(matched.reports);

        if any_fill {
            outcome.impact = Some(PriceImpactRecord {
                timestep: self.timestep(),
                order_id,
                volume,
                mid_before,
                mid_after: self.mid_price(),
            });
        }

        Ok(outcome)
    }

    /// Submit a limit buy order at `price`: match against crossing asks,
    /// then rest any residual on the bid book.
    pub fn buy_limit_order(
        &mut self,
        trader: TraderId,
        volume: i64,
        price: f64,
        now_nanos: u64,
    ) -> Result<LimitOrderOutcome, OrderBookError> {
        self.limit_order(Side::Buy, trader, volume, price, now_nanos)
    }

    /// Submit a limit sell order. See [`Self::buy_limit_order`].
    pub fn sell_limit_order(
        &mut self,
        trader: TraderId,
        volume: i64,
        price: f64,
        now_nanos: u64,
    ) -> Result<LimitOrderOutcome, OrderBookError> {
        self.limit_order(Side::Sell, trader, volume, price, now_nanos)
    }

    fn limit_order(
        &mut self,
        side: Side,
        trader: TraderId,
        volume: i64,
        price: f64,
        now_nanos: u64,
    ) -> Result<LimitOrderOutcome, OrderBookError> {
        let volume = validate_volume(side, volume)?;
        let limit_ticks = validate_price(side, price, self.tick_size())?;
        let order_id = self.next_order_id();
        let mut outcome = MatchOutcome::default();
        outcome.events.push(self.new_event(
            order_id,
            trader,
            EventKind::NewLimitOrder,
            volume,
            OrderPrice::Limit(limit_ticks),
            side,
        ));

        let (remaining, matched) =
            self.execute_match(side, order_id, trader, volume, Some(limit_ticks));
        outcome.events.extend(matched.events);
        outcome.reports.extend(matched.reports);

        let resting = if remaining > 0 {
            let order = Order {
                order_id,
                venue: self.venue().clone(),
                ticker: self.ticker().clone(),
                trader,
                side,
                volume: remaining,
                price: OrderPrice::Limit(limit_ticks),
                acknowledged_at: now_nanos,
            };
            self.side_mut(side)
                .entry(limit_ticks.0)
                .or_insert_with(|| PriceLevel::new(limit_ticks))
                .push_back(order.clone());
            self.track(order_id, side, limit_ticks);
            outcome.reports.push((
                trader,
                ExecutionReport {
                    kind: ExecutionReportKind::Resting,
                    order: order.clone(),
                },
            ));
            Some(order)
        } else {
            None
        };

        Ok(LimitOrderOutcome { resting, outcome })
    }

    /// Cancel a resting order. A no-op (returns `None`) if the order
    /// has already been fully filled, cancelled, or never existed —
    /// all three cases are indistinguishable to the caller.
    pub fn cancel_order(&mut self, order_id: OrderId) -> Option<(OrderbookEvent, (TraderId, ExecutionReport))> {
        let (side, price) = self.locate(order_id)?;
        let map = self.side_mut(side);
        let level = map.get_mut(&price.0)?;
        let order = level.remove(order_id)?;
        if level.is_empty() {
            map.remove(&price.0);
        }
        self.untrack(order_id);

        let event = self.new_event(
            order_id,
            order.trader,
            EventKind::CancelLimitOrder,
            order.volume,
            order.price,
            side,
        );
        let report = (
            order.trader,
            ExecutionReport {
                kind: ExecutionReportKind::Cancelled,
                order,
            },
        );
        Some((event, report))
    }
}
