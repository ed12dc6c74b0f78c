//! Fixed-locale price formatting.
//!
//! Output always uses `,` for thousands and `.` for the decimal point.
//! Localized formatting is out of scope.

use rust_decimal::{Decimal, RoundingStrategy};

/// Render a value with one decimal place and thousands separators.
///
/// `1234.5` renders as `"1,234.5"`, `0` as `"0.0"`.
pub fn format_price(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    let fixed = format!("{:.1}", rounded.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "0"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}
