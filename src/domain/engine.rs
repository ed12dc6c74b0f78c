//! Opportunity engine.
//!
//! Joins a market snapshot with the catalog, prices every candidate under
//! the selected mode, filters by volume and margin, and ranks the result.
//! Everything here is synchronous and infallible.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::trace;

use super::catalog::Catalog;
use super::join::{join, JoinRow};
use super::market::MarketSnapshot;
use super::mode::PricingMode;
use super::money::{Price, Volume};
use super::opportunity::Opportunity;
use super::profit::DAILY_UNIT_LIMIT;

/// Thresholds and constants applied by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Rows with less instant-sell volume are dropped. Zero disables the gate.
    #[serde(default)]
    pub min_sell_volume: Volume,

    /// Rows with less buy-order volume are dropped. Zero disables the gate.
    #[serde(default)]
    pub min_buy_volume: Volume,

    /// Margins at or below this value are not opportunities.
    #[serde(default)]
    pub min_profit_margin: Price,

    /// Fixed per-unit fee subtracted from every margin.
    #[serde(default)]
    pub fee: Price,

    /// Units per day used for the daily projection.
    #[serde(default = "default_daily_unit_limit")]
    pub daily_unit_limit: u32,

    /// Keep only the best N opportunities after ranking.
    #[serde(default)]
    pub top_n: Option<usize>,
}

const fn default_daily_unit_limit() -> u32 {
    DAILY_UNIT_LIMIT
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_sell_volume: Decimal::ZERO,
            min_buy_volume: Decimal::ZERO,
            min_profit_margin: Decimal::ZERO,
            fee: Decimal::ZERO,
            daily_unit_limit: default_daily_unit_limit(),
            top_n: None,
        }
    }
}

/// The market and catalog snapshots a computation runs against.
///
/// Cloning is cheap. Switching pricing mode reuses the same context, so no
/// data is fetched again.
#[derive(Debug, Clone, Default)]
pub struct SnapshotContext {
    market: Arc<MarketSnapshot>,
    catalog: Arc<Catalog>,
}

impl SnapshotContext {
    pub fn new(market: Arc<MarketSnapshot>, catalog: Arc<Catalog>) -> Self {
        Self { market, catalog }
    }

    pub fn market(&self) -> &MarketSnapshot {
        &self.market
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// A context sharing this catalog with a newer market snapshot.
    #[must_use]
    pub fn with_market(&self, market: Arc<MarketSnapshot>) -> Self {
        Self {
            market,
            catalog: Arc::clone(&self.catalog),
        }
    }

    /// Compute ranked opportunities for this snapshot.
    pub fn opportunities(&self, mode: PricingMode, config: &EngineConfig) -> Vec<Opportunity> {
        compute_opportunities(&self.market, &self.catalog, mode, config)
    }
}

/// Compute the ranked opportunity list.
///
/// The output is sorted by profit margin, highest first. Equal margins keep
/// their join order. Every margin is strictly above
/// `config.min_profit_margin`.
pub fn compute_opportunities(
    market: &MarketSnapshot,
    catalog: &Catalog,
    mode: PricingMode,
    config: &EngineConfig,
) -> Vec<Opportunity> {
    let rows = join(market, &catalog.vendors);
    let candidates = rows.len();

    let mut opportunities: Vec<Opportunity> = rows
        .into_iter()
        .filter_map(|row| evaluate(row, catalog, mode, config))
        .collect();

    // Stable: ties stay in join order.
    opportunities.sort_by(|a, b| b.profit_margin().cmp(&a.profit_margin()));

    if let Some(limit) = config.top_n {
        opportunities.truncate(limit);
    }

    trace!(
        mode = %mode,
        candidates,
        kept = opportunities.len(),
        "Opportunities computed"
    );

    opportunities
}

/// Price, gate and build one join row.
fn evaluate(
    row: JoinRow<'_>,
    catalog: &Catalog,
    mode: PricingMode,
    config: &EngineConfig,
) -> Option<Opportunity> {
    let display_price = row.summary.price_for(mode)?;

    if row.summary.sell_volume < config.min_sell_volume
        || row.summary.buy_volume < config.min_buy_volume
    {
        return None;
    }

    let meta = catalog.item(row.product_id);
    let name = meta.map_or_else(|| row.product_id.to_string(), |m| m.name.clone());

    let opportunity = match Opportunity::builder()
        .product_id(row.product_id.clone())
        .name(name)
        .image(meta.and_then(|m| m.image_path()))
        .display_price(display_price)
        .vendor(row.offer.clone())
        .fee(config.fee)
        .daily_limit(config.daily_unit_limit)
        .build()
    {
        Ok(opportunity) => opportunity,
        Err(error) => {
            trace!(
                product_id = %row.product_id,
                vendor = %row.offer.vendor_name,
                %error,
                "Row dropped"
            );
            return None;
        }
    };

    (opportunity.profit_margin() > config.min_profit_margin).then_some(opportunity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ItemMeta, MarketSummary, ProductId, VendorOffer, VendorOffers};
    use rust_decimal_macros::dec;

    fn summary(insta: Option<Decimal>, order: Option<Decimal>) -> MarketSummary {
        MarketSummary {
            top_sell_order_price: order,
            top_insta_buy_price: insta,
            sell_volume: dec!(1000),
            buy_volume: dec!(1000),
        }
    }

    fn catalog_with(offers: Vec<(&str, VendorOffers)>) -> Catalog {
        let mut catalog = Catalog::default();
        for (id, o) in offers {
            catalog.vendors.insert(ProductId::from(id), o);
        }
        catalog
    }

    #[test]
    fn instant_and_order_modes_price_the_same_snapshot_differently() {
        let market: MarketSnapshot =
            vec![(ProductId::from("P1"), summary(Some(dec!(10)), Some(dec!(8))))]
                .into_iter()
                .collect();
        let catalog = catalog_with(vec![("P1", VendorOffer::new("V", dec!(5)).into())]);
        let config = EngineConfig::default();

        let instant = compute_opportunities(&market, &catalog, PricingMode::Instant, &config);
        let order = compute_opportunities(&market, &catalog, PricingMode::Order, &config);

        assert_eq!(instant[0].profit_margin(), dec!(5));
        assert_eq!(instant[0].display_price(), dec!(10));
        assert_eq!(order[0].profit_margin(), dec!(3));
        assert_eq!(order[0].display_price(), dec!(8));
    }

    #[test]
    fn rows_without_price_for_mode_are_dropped() {
        let market: MarketSnapshot = vec![(ProductId::from("P1"), summary(Some(dec!(10)), None))]
            .into_iter()
            .collect();
        let catalog = catalog_with(vec![("P1", VendorOffer::new("V", dec!(5)).into())]);
        let config = EngineConfig::default();

        assert_eq!(
            compute_opportunities(&market, &catalog, PricingMode::Instant, &config).len(),
            1
        );
        assert!(compute_opportunities(&market, &catalog, PricingMode::Order, &config).is_empty());
    }

    #[test]
    fn zero_margin_is_not_an_opportunity() {
        let market: MarketSnapshot =
            vec![(ProductId::from("P1"), summary(Some(dec!(5)), Some(dec!(5))))]
                .into_iter()
                .collect();
        let catalog = catalog_with(vec![("P1", VendorOffer::new("V", dec!(5)).into())]);

        assert!(compute_opportunities(
            &market,
            &catalog,
            PricingMode::Instant,
            &EngineConfig::default()
        )
        .is_empty());
    }

    #[test]
    fn margin_threshold_is_strict() {
        let market: MarketSnapshot =
            vec![(ProductId::from("P1"), summary(Some(dec!(5.1)), None))]
                .into_iter()
                .collect();
        let catalog = catalog_with(vec![("P1", VendorOffer::new("V", dec!(5)).into())]);
        let config = EngineConfig {
            min_profit_margin: dec!(0.1),
            ..EngineConfig::default()
        };

        assert!(compute_opportunities(&market, &catalog, PricingMode::Instant, &config).is_empty());
    }

    #[test]
    fn volume_gate_drops_thin_markets() {
        let mut thin = summary(Some(dec!(10)), Some(dec!(8)));
        thin.sell_volume = dec!(5);
        let market: MarketSnapshot = vec![(ProductId::from("P1"), thin)].into_iter().collect();
        let catalog = catalog_with(vec![("P1", VendorOffer::new("V", dec!(5)).into())]);

        let gated = EngineConfig {
            min_sell_volume: dec!(10),
            ..EngineConfig::default()
        };
        assert!(compute_opportunities(&market, &catalog, PricingMode::Instant, &gated).is_empty());

        let buy_gated = EngineConfig {
            min_buy_volume: dec!(1001),
            ..EngineConfig::default()
        };
        assert!(
            compute_opportunities(&market, &catalog, PricingMode::Instant, &buy_gated).is_empty()
        );

        assert_eq!(
            compute_opportunities(
                &market,
                &catalog,
                PricingMode::Instant,
                &EngineConfig::default()
            )
            .len(),
            1
        );
    }

    #[test]
    fn metadata_supplies_name_and_image() {
        let market: MarketSnapshot =
            vec![(ProductId::from("P1"), summary(Some(dec!(10)), None))]
                .into_iter()
                .collect();
        let mut catalog = catalog_with(vec![("P1", VendorOffer::new("V", dec!(5)).into())]);
        catalog.items.insert(
            ProductId::from("P1"),
            ItemMeta::new("Pretty Name").with_image("p1.png"),
        );

        let opps = compute_opportunities(
            &market,
            &catalog,
            PricingMode::Instant,
            &EngineConfig::default(),
        );
        assert_eq!(opps[0].name(), "Pretty Name");
        assert_eq!(opps[0].image(), Some("/assets/images/p1.png"));
    }

    #[test]
    fn top_n_truncates_after_ranking() {
        let market: MarketSnapshot = vec![
            (ProductId::from("A"), summary(Some(dec!(6)), None)),
            (ProductId::from("B"), summary(Some(dec!(9)), None)),
            (ProductId::from("C"), summary(Some(dec!(7)), None)),
        ]
        .into_iter()
        .collect();
        let catalog = catalog_with(vec![
            ("A", VendorOffer::new("V", dec!(5)).into()),
            ("B", VendorOffer::new("V", dec!(5)).into()),
            ("C", VendorOffer::new("V", dec!(5)).into()),
        ]);
        let config = EngineConfig {
            top_n: Some(2),
            ..EngineConfig::default()
        };

        let ids: Vec<_> = compute_opportunities(&market, &catalog, PricingMode::Instant, &config)
            .iter()
            .map(|o| o.product_id().to_string())
            .collect();
        assert_eq!(ids, vec!["B", "C"]);
    }

    #[test]
    fn out_of_range_prices_drop_only_their_row() {
        let market: MarketSnapshot = vec![
            (ProductId::from("HUGE"), summary(Some(Decimal::MAX), None)),
            (ProductId::from("P1"), summary(Some(dec!(10)), None)),
        ]
        .into_iter()
        .collect();
        let catalog = catalog_with(vec![
            ("HUGE", VendorOffer::new("V", dec!(5)).into()),
            ("P1", VendorOffer::new("V", Decimal::MIN).into()),
        ]);

        assert!(compute_opportunities(
            &market,
            &catalog,
            PricingMode::Instant,
            &EngineConfig::default()
        )
        .is_empty());

        let catalog = catalog_with(vec![
            ("HUGE", VendorOffer::new("V", dec!(5)).into()),
            ("P1", VendorOffer::new("V", dec!(5)).into()),
        ]);
        let opps = compute_opportunities(
            &market,
            &catalog,
            PricingMode::Instant,
            &EngineConfig::default(),
        );
        assert_eq!(opps.len(), 1);
        assert_eq!(opps[0].product_id().as_str(), "P1");
    }

    #[test]
    fn context_with_market_keeps_catalog() {
        let catalog = Arc::new(catalog_with(vec![(
            "P1",
            VendorOffer::new("V", dec!(5)).into(),
        )]));
        let ctx = SnapshotContext::new(Arc::new(MarketSnapshot::empty()), Arc::clone(&catalog));
        assert!(ctx
            .opportunities(PricingMode::Instant, &EngineConfig::default())
            .is_empty());

        let market: MarketSnapshot =
            vec![(ProductId::from("P1"), summary(Some(dec!(10)), None))]
                .into_iter()
                .collect();
        let next = ctx.with_market(Arc::new(market));
        assert!(Arc::ptr_eq(&catalog, &next.catalog));
        assert_eq!(
            next.opportunities(PricingMode::Instant, &EngineConfig::default())
                .len(),
            1
        );
    }
}
