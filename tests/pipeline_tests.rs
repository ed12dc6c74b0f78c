//! From raw API and catalog documents to a rendered table.

use std::sync::Arc;

use npcflip::adapter::catalog::{FileCatalogSource, ITEM_DATA_FILE, VENDOR_DATA_FILE};
use npcflip::adapter::hypixel::BazaarResponse;
use npcflip::adapter::presenter::{JsonPresenter, TerminalPresenter};
use npcflip::domain::{
    compute_opportunities, Catalog, EngineConfig, PricingMode, SnapshotContext,
};
use npcflip::port::{CatalogSource, Presenter};
use rust_decimal_macros::dec;

const BAZAAR: &str = r#"{
    "success": true,
    "lastUpdated": 1700000000000,
    "products": {
        "ENCHANTED_BREAD": {
            "product_id": "ENCHANTED_BREAD",
            "sell_summary": [{"amount": 10, "pricePerUnit": 65.5, "orders": 1}],
            "buy_summary": [{"amount": 30, "pricePerUnit": 70.1, "orders": 2}],
            "quick_status": {"sellVolume": 5000, "buyVolume": 9000}
        },
        "OAK_LOG": {
            "product_id": "OAK_LOG",
            "sell_summary": [{"amount": 640, "pricePerUnit": 6.2, "orders": 4}],
            "buy_summary": [],
            "quick_status": {"sellVolume": 100000, "buyVolume": 80000}
        },
        "DIAMOND": {
            "product_id": "DIAMOND",
            "sell_summary": [{"amount": 1, "pricePerUnit": 8.0, "orders": 1}],
            "buy_summary": [{"amount": 1, "pricePerUnit": 9.0, "orders": 1}],
            "quick_status": {"sellVolume": 1, "buyVolume": 1}
        }
    }
}"#;

const ITEMS: &str = r#"{"ENCHANTED_BREAD": {"name": "Enchanted Bread", "image": "bread.png"}}"#;
const VENDORS: &str = r#"{
    "ENCHANTED_BREAD": {"npc": "Baker", "island": "Hub", "price": 60},
    "OAK_LOG": {"npc": "Lumber Merchant", "island": "Hub", "price": 5}
}"#;

async fn context() -> SnapshotContext {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(ITEM_DATA_FILE), ITEMS).unwrap();
    std::fs::write(dir.path().join(VENDOR_DATA_FILE), VENDORS).unwrap();
    let catalog = FileCatalogSource::new(dir.path())
        .fetch_catalog()
        .await
        .unwrap();

    let response: BazaarResponse = serde_json::from_str(BAZAAR).unwrap();
    SnapshotContext::new(Arc::new(response.into_snapshot()), Arc::new(catalog))
}

#[tokio::test]
async fn instant_view_ranks_vendor_items() {
    let ctx = context().await;
    let opps = ctx.opportunities(PricingMode::Instant, &EngineConfig::default());

    let ids: Vec<_> = opps.iter().map(|o| o.product_id().to_string()).collect();
    assert_eq!(ids, vec!["ENCHANTED_BREAD", "OAK_LOG"]);
    assert_eq!(opps[0].profit_margin(), dec!(5.5));
    assert_eq!(opps[0].name(), "Enchanted Bread");
    assert_eq!(opps[0].image(), Some("/assets/images/bread.png"));
    assert_eq!(opps[1].profit_margin(), dec!(1.2));
    assert_eq!(opps[1].name(), "OAK_LOG");
}

#[test]
fn out_of_range_prices_are_dropped_not_fatal() {
    let response: BazaarResponse = serde_json::from_str(
        r#"{
            "success": true,
            "products": {
                "P1": {"sell_summary": [{"amount": 1, "pricePerUnit": 1e27}]},
                "P2": {"sell_summary": [{"amount": 1, "pricePerUnit": 10}]},
                "P3": {"sell_summary": [{"amount": 1, "pricePerUnit": 10}]}
            }
        }"#,
    )
    .unwrap();
    let catalog: Catalog = serde_json::from_str(
        r#"{"vendors": {
            "P1": {"npc": "Farm Merchant", "price": 5},
            "P2": {"npc": "Glitched", "price": -7e28},
            "P3": {"npc": "Farm Merchant", "price": 5}
        }}"#,
    )
    .unwrap();

    let opps = compute_opportunities(
        &response.into_snapshot(),
        &catalog,
        PricingMode::Instant,
        &EngineConfig::default(),
    );

    let ids: Vec<_> = opps.iter().map(|o| o.product_id().to_string()).collect();
    assert_eq!(ids, vec!["P3"]);
    assert_eq!(opps[0].daily_projected_profit(), dec!(3200));
}

#[tokio::test]
async fn order_view_drops_products_without_buy_summary() {
    let ctx = context().await;
    let opps = compute_opportunities(
        ctx.market(),
        ctx.catalog(),
        PricingMode::Order,
        &EngineConfig::default(),
    );

    assert_eq!(opps.len(), 1);
    assert_eq!(opps[0].display_price(), dec!(70.1));
    assert_eq!(opps[0].daily_projected_profit(), dec!(6464));
}

#[tokio::test]
async fn volume_gate_applies_to_parsed_quick_status() {
    let ctx = context().await;
    let config = EngineConfig {
        min_buy_volume: dec!(10000),
        ..EngineConfig::default()
    };
    let opps = ctx.opportunities(PricingMode::Instant, &config);
    let ids: Vec<_> = opps.iter().map(|o| o.product_id().to_string()).collect();
    assert_eq!(ids, vec!["OAK_LOG"]);
}

#[tokio::test]
async fn terminal_table_shows_formatted_values() {
    let ctx = context().await;
    let opps = ctx.opportunities(PricingMode::Order, &EngineConfig::default());

    let mut presenter = TerminalPresenter::plain(Vec::new());
    presenter.render(&opps, PricingMode::Order);
    let out = String::from_utf8(presenter.into_inner()).unwrap();

    assert!(out.contains("Enchanted Bread"));
    assert!(out.contains("Baker"));
    assert!(out.contains("70.1"));
    assert!(out.contains("6,464.0"));
}

#[tokio::test]
async fn json_lines_carry_full_list() {
    let ctx = context().await;
    let opps = ctx.opportunities(PricingMode::Instant, &EngineConfig::default());

    let mut presenter = JsonPresenter::new(Vec::new());
    presenter.render(&opps, PricingMode::Instant);
    let out = String::from_utf8(presenter.into_inner()).unwrap();

    let line: serde_json::Value = serde_json::from_str(out.lines().next().unwrap()).unwrap();
    assert_eq!(line["type"], "opportunities");
    assert_eq!(line["payload"]["mode"], "instant");
    assert_eq!(line["payload"]["opportunities"].as_array().unwrap().len(), 2);
}
