//! Market snapshot types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::ids::ProductId;
use super::mode::PricingMode;
use super::money::{Price, Volume};

/// Top-of-book summary for one product.
///
/// Prices come from the first-ranked entry on each side of the book.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketSummary {
    /// Best buy-order price: what a seller gets by queueing a sell order.
    pub top_sell_order_price: Option<Price>,
    /// Best sell-summary price: what a seller gets from an instant sale.
    pub top_insta_buy_price: Option<Price>,
    pub sell_volume: Volume,
    pub buy_volume: Volume,
}

impl MarketSummary {
    /// The realizable sale price under the given mode, if the book has one.
    pub fn price_for(&self, mode: PricingMode) -> Option<Price> {
        match mode {
            PricingMode::Instant => self.top_insta_buy_price,
            PricingMode::Order => self.top_sell_order_price,
        }
    }
}

/// A full market snapshot, replaced wholesale every refresh cycle.
///
/// Products iterate in ascending id order so that join order, and with it
/// tie order after ranking, is deterministic.
#[derive(Debug, Clone)]
pub struct MarketSnapshot {
    products: BTreeMap<ProductId, MarketSummary>,
    fetched_at: DateTime<Utc>,
}

impl MarketSnapshot {
    pub fn new(products: BTreeMap<ProductId, MarketSummary>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            products,
            fetched_at,
        }
    }

    /// An empty snapshot, used when the market fetch fails.
    pub fn empty() -> Self {
        Self::new(BTreeMap::new(), Utc::now())
    }

    pub fn get(&self, id: &ProductId) -> Option<&MarketSummary> {
        self.products.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, &MarketSummary)> {
        self.products.iter()
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for MarketSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromIterator<(ProductId, MarketSummary)> for MarketSnapshot {
    fn from_iter<I: IntoIterator<Item = (ProductId, MarketSummary)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect(), Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn summary() -> MarketSummary {
        MarketSummary {
            top_sell_order_price: Some(dec!(8)),
            top_insta_buy_price: Some(dec!(10)),
            sell_volume: dec!(100),
            buy_volume: dec!(200),
        }
    }

    #[test]
    fn price_for_selects_book_side_by_mode() {
        let s = summary();
        assert_eq!(s.price_for(PricingMode::Instant), Some(dec!(10)));
        assert_eq!(s.price_for(PricingMode::Order), Some(dec!(8)));
    }

    #[test]
    fn price_for_missing_side_is_none() {
        let s = MarketSummary {
            top_sell_order_price: None,
            ..summary()
        };
        assert!(s.price_for(PricingMode::Order).is_none());
    }

    #[test]
    fn snapshot_iterates_in_id_order() {
        let snapshot: MarketSnapshot = vec![
            (ProductId::from("ZUCCHINI"), summary()),
            (ProductId::from("APPLE"), summary()),
        ]
        .into_iter()
        .collect();

        let ids: Vec<_> = snapshot.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["APPLE", "ZUCCHINI"]);
        assert_eq!(snapshot.len(), 2);
    }
}
