//! Monetary types for price and volume representation.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Price represented as a Decimal for precision.
pub type Price = Decimal;

/// Volume represented as a Decimal for precision.
pub type Volume = Decimal;

/// Coerce an arbitrary JSON value into a Decimal.
///
/// Numbers and numeric strings convert; everything else (null, NaN-like
/// strings, objects) becomes zero.
pub fn coerce_decimal(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Decimal::from(i)
            } else if let Some(u) = n.as_u64() {
                Decimal::from(u)
            } else {
                n.as_f64().and_then(Decimal::from_f64).unwrap_or_default()
            }
        }
        Value::String(s) => s.trim().parse::<Decimal>().unwrap_or_default(),
        _ => Decimal::ZERO,
    }
}

/// Serde helper for numeric fields that must never fail to parse.
pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_decimal(&value))
}
