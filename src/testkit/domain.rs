//! Builders for domain values used across tests.
//!
//! Keeps snapshot and catalog construction out of the test bodies.

use rust_decimal::Decimal;

use crate::domain::{Catalog, MarketSnapshot, MarketSummary, ProductId, VendorOffer};

/// Create a [`ProductId`] from a string.
pub fn product(id: &str) -> ProductId {
    ProductId::from(id)
}

/// A summary with the given top prices and ample volume on both sides.
pub fn summary(insta: Option<Decimal>, order: Option<Decimal>) -> MarketSummary {
    MarketSummary {
        top_sell_order_price: order,
        top_insta_buy_price: insta,
        sell_volume: Decimal::from(1000),
        buy_volume: Decimal::from(1000),
    }
}

/// A snapshot holding the given products.
pub fn market_snapshot(products: &[(&str, MarketSummary)]) -> MarketSnapshot {
    products
        .iter()
        .map(|(id, summary)| (product(id), summary.clone()))
        .collect()
}

/// A catalog with one vendor offer per product and no item metadata.
pub fn catalog(offers: &[(&str, &str, Decimal)]) -> Catalog {
    let mut catalog = Catalog::default();
    for (id, vendor, price) in offers {
        catalog
            .vendors
            .insert(product(id), VendorOffer::new(*vendor, *price).into());
    }
    catalog
}
