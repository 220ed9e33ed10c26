//! Order book error types.

use super::types::Side;
use thiserror::Error;

/// Errors that can occur within the [`super::book::OrderBook`].
///
/// These are the only runtime error the matching engine raises: invalid
/// input to a submission. Rejection is always side-effect-free — no
/// order, level or event-stream mutation has happened by the time the
/// caller sees one of these.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OrderBookError {
    /// Volume was zero or negative.
    #[error("rejected: non-positive volume {volume} for {side} order")]
    NonPositiveVolume {
        /// The side of the rejected order
        side: Side,
        /// The (invalid) requested volume
        volume: i64,
    },

    /// Limit price was non-positive once rounded to the tick grid.
    #[error("rejected: non-positive limit price {price} (tick size {tick_size}) for {side} order")]
    NonPositivePrice {
        /// The side of the rejected order
        side: Side,
        /// The requested decimal price
        price: f64,
        /// The configured tick size
        tick_size: f64,
    },
}
