//! Price-time priority matching: walk the opposite side, consuming
//! resting liquidity until the incoming order is filled, the book runs
//! dry, or (for a limit order) the price no longer crosses.

use super::book::{ExecutionReport, ExecutionReportKind, MatchOutcome, OrderBook};
use super::event::EventKind;
use super::types::{OrderId, OrderPrice, Side, Ticks, TraderId, Volume};

impl OrderBook {
    /// Match an incoming order of `volume` shares against the resting
    /// book on the opposite side. `limit` is `None` for a market order
    /// (match at any price) or `Some(price)` for a limit order (only
    /// match while the touch crosses `price`).
    ///
    /// Returns the unmatched residual (zero for a market order that
    /// fully executes, or whenever the book/price runs out) and the
    /// trail of fill events and execution reports this produced. Both
    /// sides of every match receive an [`ExecutionReport`] — the
    /// resting order because it was just touched while parked in
    /// someone else's mailbox, the incoming order because its owner
    /// must hear about fills the same way regardless of which side of
    /// the trade it ended up on. The one exception is a market
    /// aggressor left with residual volume once the book runs dry: see
    /// the `report_incoming` gate below.
    pub(super) fn execute_match(
        &mut self,
        side: Side,
        order_id: OrderId,
        trader: TraderId,
        mut remaining: Volume,
        limit: Option<Ticks>,
    ) -> (Volume, MatchOutcome) {
        let mut outcome = MatchOutcome::default();

        loop {
            if remaining == 0 {
                break;
            }
            let best_ticks = match side {
                Side::Buy => self.asks_mut().keys().next().copied(),
                Side::Sell => self.bids_mut().keys().next_back().copied(),
            };
            let Some(level_ticks) = best_ticks else {
                break;
            };
            if let Some(limit_ticks) = limit {
                let crosses = match side {
                    Side::Buy => level_ticks <= limit_ticks.0,
                    Side::Sell => level_ticks >= limit_ticks.0,
                };
                if !crosses {
                    break;
                }
            }

            // Snapshot the resting order before mutating its level, then
            // apply the fill in place so `resting` below reflects the
            // pre-match state (needed to compute the reported residual).
            let (resting, resting_full, fill_qty) = {
                let book_side = self.opposite_side_mut(side);
                let level = book_side
                    .get_mut(&level_ticks)
                    .expect("tracked level must exist while non-empty");
                let resting = level
                    .front()
                    .cloned()
                    .expect("non-empty level must have a front order");
                let fill_qty = remaining.min(resting.volume);
                let resting_full = fill_qty == resting.volume;
                if resting_full {
                    level.pop_front();
                } else {
                    level.front_mut().expect("just matched").volume -= fill_qty;
                }
                if level.is_empty() {
                    book_side.remove(&level_ticks);
                }
                (resting, resting_full, fill_qty)
            };

            if resting_full {
                self.untrack(resting.order_id);
            }
            let trade_price = Ticks(level_ticks);
            self.record_trade(trade_price, fill_qty);
            remaining -= fill_qty;
            let incoming_full_this_round = remaining == 0;

            // One public event per match round: direction is the
            // incoming (aggressor) order's side, and full/partial
            // reflects whether the resting order was fully consumed —
            // not the aggressor's own remaining state. A limit order
            // that rests a residual after fully consuming one resting
            // order still produces a single `full_fill_*` event, not a
            // pair.
            outcome.events.push(self.new_event(
                order_id,
                trader,
                EventKind::fill(side, resting_full),
                fill_qty,
                OrderPrice::Limit(trade_price),
                side,
            ));

            let mut reported_resting = resting.clone();
            let resting_kind = if resting_full {
                ExecutionReportKind::FullFill
            } else {
                reported_resting.volume -= fill_qty;
                ExecutionReportKind::PartialFill
            };
            outcome.reports.push((
                resting.trader,
                ExecutionReport {
                    kind: resting_kind,
                    order: reported_resting,
                },
            ));

            // A market aggressor never rests: its owner should hear
            // about a full fill, but a mid-sweep (or final, book-ran-dry)
            // partial state has no resting order behind it to describe.
            // Reporting that phantom partial would hand the owner an
            // `Order` it must track in `outstanding` forever, since no
            // later full-fill or cancel will ever arrive to clear it.
            // Limit orders don't have this problem — their true final
            // state is reported separately once matching finishes (see
            // `operations::limit_order`), so every round's report here
            // is safe to emit.
            let report_incoming = incoming_full_this_round || limit.is_some();
            if report_incoming {
                let incoming_kind = if incoming_full_this_round {
                    ExecutionReportKind::FullFill
                } else {
                    ExecutionReportKind::PartialFill
                };
                let reported_incoming = super::types::Order {
                    order_id,
                    venue: self.venue().clone(),
                    ticker: self.ticker().clone(),
                    trader,
                    side,
                    volume: remaining,
                    price: limit.map(OrderPrice::Limit).unwrap_or(OrderPrice::Market),
                    acknowledged_at: 0,
                };
                outcome.reports.push((
                    trader,
                    ExecutionReport {
                        kind: incoming_kind,
                        order: reported_incoming,
                    },
                ));
            }
        }

        (remaining, outcome)
    }
}
