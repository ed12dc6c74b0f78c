//! Profit formulas.
//!
//! Missing inputs count as zero and nothing is filtered here. Callers decide
//! what counts as an opportunity. Arithmetic is checked: a result outside the
//! `Decimal` range is `None` rather than a panic.

use rust_decimal::Decimal;

use super::money::Price;

/// Units of one item an NPC sells to a player per day.
///
/// Daily profit is projected as `margin * DAILY_UNIT_LIMIT`. This is a
/// simplifying assumption: it ignores whether the market can absorb that
/// many units at the quoted price.
pub const DAILY_UNIT_LIMIT: u32 = 640;

/// Sale price minus vendor price minus a fixed per-unit fee.
///
/// May be zero or negative. Returns `None` if the result overflows.
pub fn profit_margin(
    sell_price: Option<Price>,
    buy_price: Option<Price>,
    fee: Price,
) -> Option<Price> {
    sell_price
        .unwrap_or_default()
        .checked_sub(buy_price.unwrap_or_default())?
        .checked_sub(fee)
}

/// Projected profit from flipping `daily_limit` units at `margin` each.
///
/// Returns `None` if the product overflows.
pub fn daily_projected_profit(margin: Option<Price>, daily_limit: u32) -> Option<Price> {
    margin
        .unwrap_or_default()
        .checked_mul(Decimal::from(daily_limit))
}
