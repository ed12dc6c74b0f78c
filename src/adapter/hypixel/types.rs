//! Bazaar API response types.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::domain::{lenient_decimal, MarketSnapshot, MarketSummary, Price, ProductId, Volume};

#[derive(Debug, Deserialize)]
pub struct BazaarResponse {
    #[serde(default)]
    pub success: bool,
    /// Milliseconds since the epoch.
    #[serde(rename = "lastUpdated", default)]
    pub last_updated: Option<i64>,
    /// A `null` entry stands for a product with no data and is skipped.
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: HashMap<String, Option<RawProduct>>,
}

#[derive(Debug, Deserialize)]
pub struct RawProduct {
    #[serde(default)]
    pub product_id: Option<String>,
    /// Standing buy orders; a seller filling one sells instantly.
    #[serde(default, deserialize_with = "null_as_default")]
    pub sell_summary: Vec<SummaryEntry>,
    /// Standing sell orders; the top entry is the price to undercut.
    #[serde(default, deserialize_with = "null_as_default")]
    pub buy_summary: Vec<SummaryEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quick_status: QuickStatus,
}

#[derive(Debug, Deserialize)]
pub struct SummaryEntry {
    #[serde(rename = "pricePerUnit", default, deserialize_with = "lenient_decimal")]
    pub price_per_unit: Price,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub amount: Volume,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuickStatus {
    #[serde(rename = "sellVolume", default, deserialize_with = "lenient_decimal")]
    pub sell_volume: Volume,
    #[serde(rename = "buyVolume", default, deserialize_with = "lenient_decimal")]
    pub buy_volume: Volume,
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl RawProduct {
    /// Collapse the order book to its top-of-book summary.
    pub fn to_summary(&self) -> MarketSummary {
        MarketSummary {
            top_sell_order_price: self.buy_summary.first().map(|e| e.price_per_unit),
            top_insta_buy_price: self.sell_summary.first().map(|e| e.price_per_unit),
            sell_volume: self.quick_status.sell_volume,
            buy_volume: self.quick_status.buy_volume,
        }
    }
}

impl BazaarResponse {
    /// Convert to a domain snapshot.
    ///
    /// The embedded `product_id` wins over the map key when both exist.
    pub fn into_snapshot(self) -> MarketSnapshot {
        let fetched_at = self
            .last_updated
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .unwrap_or_else(Utc::now);

        let products: BTreeMap<ProductId, MarketSummary> = self
            .products
            .into_iter()
            .filter_map(|(key, raw)| {
                let raw = raw?;
                let summary = raw.to_summary();
                let id = raw.product_id.unwrap_or(key);
                Some((ProductId::from(id), summary))
            })
            .collect();

        MarketSnapshot::new(products, fetched_at)
    }
}
