//! Handler for the `explain` command.

use crate::cli::output;
use crate::domain::{daily_projected_profit, format_price, DAILY_UNIT_LIMIT};
use rust_decimal::Decimal;

/// Print how every figure on the dashboard is derived.
pub fn execute() {
    output::section("Sale price");
    output::note("instant  top of the bazaar sell summary (sell to a buy order now)");
    output::note("order    top of the bazaar buy summary (list a sell order and wait)");
    output::note("Products with no price on the selected side are skipped.");

    output::section("Profit margin");
    output::note("margin = sale price - NPC buy price - fee");
    output::note("Only margins strictly above the configured minimum are shown.");
    output::note("A product sold by several NPCs is listed once per NPC.");

    output::section("Daily profit");
    output::note(&format!(
        "daily = margin x {DAILY_UNIT_LIMIT} (engine.daily_unit_limit)"
    ));
    output::note(&format!(
        "Assumes every NPC allows {DAILY_UNIT_LIMIT} purchases per day and that"
    ));
    output::note("all of them sell at the current price. Treat it as an upper bound.");

    output::section("Example");
    for (label, value) in example(Decimal::from(2)) {
        output::key_value(label, value);
    }
}

/// Worked example rows for a given margin, computed with the engine's formula.
fn example(margin: Decimal) -> Vec<(&'static str, String)> {
    let mut rows = vec![("Margin", format_price(margin))];
    if let Some(daily) = daily_projected_profit(Some(margin), DAILY_UNIT_LIMIT) {
        rows.push(("Daily profit", format_price(daily)));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn example_uses_daily_projection() {
        assert_eq!(
            example(dec!(2)),
            vec![
                ("Margin", "2.0".to_string()),
                ("Daily profit", "1,280.0".to_string()),
            ]
        );
    }

    #[test]
    fn example_omits_daily_profit_out_of_range() {
        let rows = example(Decimal::MAX);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0, "Margin");
    }
}
