//! Crossing detection logic
//!
//! Determines when an incoming order can trade against a resting price.
//! Comparison is exact on the decimal price; there is no tick rounding.

use types::numeric::Price;
use types::order::{OrderType, Side};

/// Check if a bid and ask can match at given prices
///
/// For a buy order to match with a sell order the bid must be >= the ask.
pub fn can_match(bid_price: Price, ask_price: Price) -> bool {
    bid_price >= ask_price
}

/// Check if an incoming order crosses a resting order's price
///
/// Market orders accept any resting price. A limit buy crosses asks at or
/// below its limit; a limit sell crosses bids at or above it.
pub fn incoming_can_match(
    incoming_side: Side,
    incoming_type: OrderType,
    incoming_price: Price,
    resting_price: Price,
) -> bool {
    match (incoming_type, incoming_side) {
        (OrderType::Market, _) => true,
        (OrderType::Limit, Side::Buy) => can_match(incoming_price, resting_price),
        (OrderType::Limit, Side::Sell) => can_match(resting_price, incoming_price),
    }
}
