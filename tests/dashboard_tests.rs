//! Dashboard refresh cycle and event loop behaviour.

use std::sync::Arc;
use std::time::Duration;

use npcflip::app::{
    App, Command, Dashboard, ModeSwitch, RefreshOutcome, Sources, CATALOG_ERROR, MARKET_ERROR,
};
use npcflip::domain::{MarketSnapshot, PricingMode};
use npcflip::testkit;
use npcflip::testkit::domain::{catalog, market_snapshot, summary};
use npcflip::testkit::presenter::RecordingPresenter;
use npcflip::testkit::source::{ScriptedMarket, StaticCatalog, StaticMarket};
use rust_decimal_macros::dec;
use tokio::sync::{mpsc, watch};

fn p1_market() -> MarketSnapshot {
    market_snapshot(&[("P1", summary(Some(dec!(10)), Some(dec!(8))))])
}

fn p1_catalog() -> StaticCatalog {
    StaticCatalog::new(catalog(&[("P1", "Vendor", dec!(5))]))
}

fn dashboard(
    market: impl npcflip::port::MarketFetcher + 'static,
    catalog: StaticCatalog,
    presenter: RecordingPresenter,
) -> Dashboard<RecordingPresenter> {
    Dashboard::new(
        Sources::new(Arc::new(market), Arc::new(catalog)),
        presenter,
        &testkit::config::dashboard(),
    )
}

/// Poll until `cond` holds or two seconds pass.
async fn wait_for(cond: impl Fn() -> bool) {
    for _ in 0..200 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached in time");
}

#[tokio::test]
async fn toggle_reuses_snapshot() {
    let market = StaticMarket::new(p1_market());
    let calls = market.calls();
    let presenter = RecordingPresenter::default();
    let mut dash = dashboard(market, p1_catalog(), presenter.clone());

    dash.refresh().await;
    assert_eq!(presenter.last_frame().unwrap().margins, vec![dec!(5)]);

    assert_eq!(dash.toggle_mode(), ModeSwitch::Switched(PricingMode::Order));
    assert_eq!(presenter.last_frame().unwrap().margins, vec![dec!(3)]);

    assert_eq!(dash.toggle_mode(), ModeSwitch::Switched(PricingMode::Instant));
    assert_eq!(presenter.last_frame().unwrap().margins, vec![dec!(5)]);

    assert_eq!(calls.get(), 1);
}

#[tokio::test]
async fn failed_fetch_recovers_next_cycle() {
    let market = ScriptedMarket::new(vec![None, Some(p1_market())]);
    let presenter = RecordingPresenter::default();
    let mut dash = dashboard(market, p1_catalog(), presenter.clone());

    assert_eq!(
        dash.refresh().await,
        RefreshOutcome::Degraded { opportunities: 0 }
    );
    assert_eq!(presenter.errors(), vec![MARKET_ERROR.to_string()]);

    assert_eq!(
        dash.refresh().await,
        RefreshOutcome::Applied { opportunities: 1 }
    );
    assert_eq!(presenter.errors().len(), 1);
}

#[tokio::test]
async fn catalog_failure_is_retried() {
    let catalog = StaticCatalog::failing();
    let catalog_calls = catalog.calls();
    let presenter = RecordingPresenter::default();
    let mut dash = dashboard(StaticMarket::new(p1_market()), catalog, presenter.clone());

    assert_eq!(
        dash.refresh().await,
        RefreshOutcome::Degraded { opportunities: 0 }
    );
    assert_eq!(presenter.errors(), vec![CATALOG_ERROR.to_string()]);

    dash.refresh().await;
    assert_eq!(catalog_calls.get(), 2);
}

#[tokio::test]
async fn catalog_is_reused_across_cycles() {
    let catalog = p1_catalog();
    let catalog_calls = catalog.calls();
    let mut dash = dashboard(
        StaticMarket::new(p1_market()),
        catalog,
        RecordingPresenter::default(),
    );

    dash.refresh().await;
    dash.refresh().await;
    dash.refresh().await;

    assert_eq!(catalog_calls.get(), 1);
}

#[tokio::test]
async fn newest_refresh_wins() {
    let presenter = RecordingPresenter::default();
    let mut dash = dashboard(
        ScriptedMarket::new(vec![Some(p1_market()), Some(MarketSnapshot::empty())]),
        p1_catalog(),
        presenter.clone(),
    );

    let older = dash.begin_refresh();
    let older_data = dash.sources().fetch(older.with_catalog).await;
    let newer = dash.begin_refresh();
    let newer_data = dash.sources().fetch(newer.with_catalog).await;

    // The newer, empty snapshot lands first; the older one must not replace it.
    assert_eq!(
        dash.complete_refresh(newer.ticket, newer_data),
        RefreshOutcome::Applied { opportunities: 0 }
    );
    assert_eq!(
        dash.complete_refresh(older.ticket, older_data),
        RefreshOutcome::Stale
    );

    assert!(dash.opportunities().is_empty());
    assert_eq!(presenter.frames().len(), 1);
}

#[tokio::test]
async fn event_loop_handles_commands() {
    let market = StaticMarket::new(p1_market());
    let calls = market.calls();
    let presenter = RecordingPresenter::default();
    let dash = dashboard(market, p1_catalog(), presenter.clone());

    let (command_tx, command_rx) = mpsc::channel(8);
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = tokio::spawn(App::drive(
        dash,
        Duration::from_secs(3600),
        command_rx,
        shutdown_rx,
    ));

    // First tick fires immediately.
    wait_for(|| presenter.frames().len() == 1).await;

    command_tx.send(Command::Toggle).await.unwrap();
    wait_for(|| presenter.frames().len() == 2).await;
    assert_eq!(presenter.last_frame().unwrap().mode, PricingMode::Order);
    assert_eq!(calls.get(), 1);

    command_tx.send(Command::Refresh).await.unwrap();
    wait_for(|| presenter.frames().len() == 3).await;
    assert_eq!(calls.get(), 2);

    command_tx.send(Command::Quit).await.unwrap();
    let dash = handle.await.unwrap();
    assert_eq!(dash.mode(), PricingMode::Order);
    assert_eq!(presenter.loading_balance(), 0);
}

#[tokio::test]
async fn event_loop_stops_on_shutdown() {
    let dash = dashboard(
        StaticMarket::new(p1_market()),
        p1_catalog(),
        RecordingPresenter::default(),
    );

    let (_command_tx, command_rx) = mpsc::channel(8);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = tokio::spawn(App::drive(
        dash,
        Duration::from_secs(3600),
        command_rx,
        shutdown_rx,
    ));

    shutdown_tx.send(true).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(2), handle).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn slow_fetch_skips_overlapping_ticks() {
    let market = StaticMarket::new(p1_market()).with_delay(Duration::from_millis(300));
    let calls = market.calls();
    let presenter = RecordingPresenter::default();
    let dash = dashboard(market, p1_catalog(), presenter.clone());

    let (command_tx, command_rx) = mpsc::channel(8);
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = tokio::spawn(App::drive(
        dash,
        Duration::from_millis(50),
        command_rx,
        shutdown_rx,
    ));

    tokio::time::sleep(Duration::from_millis(700)).await;

    // Many ticks elapsed but fetches never overlapped.
    assert!(calls.get() <= 3, "fetched {} times", calls.get());
    command_tx.send(Command::Quit).await.unwrap();
    handle.await.unwrap();
}
