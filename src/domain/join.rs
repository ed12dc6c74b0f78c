//! Joining the market snapshot with vendor offers.

use std::collections::HashMap;

use super::catalog::{VendorOffer, VendorOffers};
use super::ids::ProductId;
use super::market::{MarketSnapshot, MarketSummary};

/// One (product, market summary, vendor offer) candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinRow<'a> {
    pub product_id: &'a ProductId,
    pub summary: &'a MarketSummary,
    pub offer: &'a VendorOffer,
}

/// Pair every market product with each of its vendor offers.
///
/// Products without a vendor offer are skipped. A product with N offers
/// yields N rows, in market order then catalog order.
pub fn join<'a>(
    market: &'a MarketSnapshot,
    vendors: &'a HashMap<ProductId, VendorOffers>,
) -> Vec<JoinRow<'a>> {
    market
        .iter()
        .filter_map(|(product_id, summary)| {
            vendors
                .get(product_id)
                .map(|offers| (product_id, summary, offers.as_slice()))
        })
        .flat_map(|(product_id, summary, offers)| {
            offers.iter().map(move |offer| JoinRow {
                product_id,
                summary,
                offer,
            })
        })
        .collect()
}
