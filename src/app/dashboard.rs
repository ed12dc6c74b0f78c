//! Dashboard state and refresh cycle.
//!
//! The dashboard owns the retained snapshots, the current pricing mode and
//! the presenter. A refresh replaces the market snapshot wholesale; a mode
//! switch recomputes from the snapshot already held and never fetches.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::config::Config;
use super::sequencer::{RequestSequencer, Ticket};
use crate::domain::{Catalog, EngineConfig, MarketSnapshot, Opportunity, PricingMode, SnapshotContext};
use crate::error::Result;
use crate::port::{CatalogSource, MarketFetcher, Presenter};

/// Banner shown when the market fetch fails.
pub const MARKET_ERROR: &str = "Failed to load Bazaar data. Please try again later.";

/// Banner shown when the catalog fetch fails.
pub const CATALOG_ERROR: &str = "Failed to load item data. Please try again later.";

/// The data providers a dashboard pulls from.
#[derive(Clone)]
pub struct Sources {
    pub market: Arc<dyn MarketFetcher>,
    pub catalog: Arc<dyn CatalogSource>,
}

impl Sources {
    pub fn new(market: Arc<dyn MarketFetcher>, catalog: Arc<dyn CatalogSource>) -> Self {
        Self { market, catalog }
    }

    /// Fetch the market snapshot, and the catalog too when asked, concurrently.
    pub async fn fetch(&self, with_catalog: bool) -> CycleData {
        let catalog = async {
            if with_catalog {
                Some(self.catalog.fetch_catalog().await)
            } else {
                None
            }
        };
        let (catalog, market) = tokio::join!(catalog, self.market.fetch_market());
        CycleData { catalog, market }
    }
}

/// Raw results of one fetch cycle.
pub struct CycleData {
    /// `None` when the catalog was not due for a reload.
    pub catalog: Option<Result<Catalog>>,
    pub market: Result<MarketSnapshot>,
}

/// A refresh that has been issued but not yet applied.
#[derive(Debug, Clone, Copy)]
pub struct PendingRefresh {
    pub ticket: Ticket,
    pub with_catalog: bool,
}

/// What happened to a completed refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Applied and rendered.
    Applied { opportunities: usize },
    /// Applied with at least one source replaced by its fallback.
    Degraded { opportunities: usize },
    /// A newer refresh was issued; this result was dropped.
    Stale,
}

/// What happened to a mode switch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeSwitch {
    Switched(PricingMode),
    Unchanged,
    CoolingDown,
}

pub struct Dashboard<P: Presenter> {
    sources: Sources,
    presenter: P,
    engine: EngineConfig,
    mode: PricingMode,
    context: SnapshotContext,
    sequencer: RequestSequencer,
    pending: Option<Ticket>,
    catalog_loaded_at: Option<Instant>,
    catalog_max_age: Duration,
    toggle_cooldown: Duration,
    last_toggle: Option<Instant>,
}

impl<P: Presenter> Dashboard<P> {
    pub fn new(sources: Sources, presenter: P, config: &Config) -> Self {
        let max_age_secs = u64::from(config.catalog.max_age_days) * 24 * 60 * 60;
        Self {
            sources,
            presenter,
            engine: config.engine.clone(),
            mode: config.dashboard.mode,
            context: SnapshotContext::default(),
            sequencer: RequestSequencer::new(),
            pending: None,
            catalog_loaded_at: None,
            catalog_max_age: Duration::from_secs(max_age_secs),
            toggle_cooldown: config.dashboard.toggle_cooldown(),
            last_toggle: None,
        }
    }

    pub fn mode(&self) -> PricingMode {
        self.mode
    }

    pub fn context(&self) -> &SnapshotContext {
        &self.context
    }

    pub fn sources(&self) -> &Sources {
        &self.sources
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    /// Whether an issued refresh has not been applied yet.
    pub fn in_flight(&self) -> bool {
        self.pending.is_some()
    }

    /// Fetch time of the snapshot currently displayed.
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.context.market().fetched_at()
    }

    /// Opportunities for the retained snapshot under the current mode.
    pub fn opportunities(&self) -> Vec<Opportunity> {
        self.context.opportunities(self.mode, &self.engine)
    }

    /// Run one full refresh cycle in place.
    pub async fn refresh(&mut self) -> RefreshOutcome {
        let pending = self.begin_refresh();
        let data = self.sources.fetch(pending.with_catalog).await;
        self.complete_refresh(pending.ticket, data)
    }

    /// Issue a refresh. Any refresh still in flight becomes stale.
    pub fn begin_refresh(&mut self) -> PendingRefresh {
        let ticket = self.sequencer.issue();
        let with_catalog = self.catalog_due(Instant::now());
        if let Some(previous) = self.pending.replace(ticket) {
            debug!(
                superseded = previous.value(),
                ticket = ticket.value(),
                "Refresh superseded"
            );
        }
        self.presenter.show_loading();
        PendingRefresh {
            ticket,
            with_catalog,
        }
    }

    /// Apply the results of a refresh issued by `begin_refresh`.
    pub fn complete_refresh(&mut self, ticket: Ticket, data: CycleData) -> RefreshOutcome {
        if !self.sequencer.is_latest(ticket) {
            debug!(ticket = ticket.value(), "Discarding stale refresh result");
            return RefreshOutcome::Stale;
        }
        self.pending = None;

        let mut degraded = false;

        let catalog = match data.catalog {
            Some(Ok(catalog)) => {
                self.catalog_loaded_at = Some(Instant::now());
                Some(Arc::new(catalog))
            }
            Some(Err(e)) => {
                warn!(
                    source = self.sources.catalog.source_name(),
                    error = %e,
                    "Catalog fetch failed"
                );
                self.presenter.show_error(CATALOG_ERROR);
                degraded = true;
                None
            }
            None => None,
        };

        let market = match data.market {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(
                    source = self.sources.market.source_name(),
                    error = %e,
                    "Market fetch failed"
                );
                self.presenter.show_error(MARKET_ERROR);
                degraded = true;
                MarketSnapshot::empty()
            }
        };

        let market = Arc::new(market);
        self.context = match catalog {
            Some(catalog) => SnapshotContext::new(market, catalog),
            None => self.context.with_market(market),
        };

        let opportunities = self.render();
        self.presenter.hide_loading();

        info!(
            ticket = ticket.value(),
            mode = %self.mode,
            products = self.context.market().len(),
            opportunities,
            "Dashboard refreshed"
        );

        if degraded {
            RefreshOutcome::Degraded { opportunities }
        } else {
            RefreshOutcome::Applied { opportunities }
        }
    }

    /// Flip the pricing mode, subject to the toggle cooldown.
    pub fn toggle_mode(&mut self) -> ModeSwitch {
        self.switch_mode_at(self.mode.toggled(), Instant::now())
    }

    /// Switch to `mode`, subject to the toggle cooldown.
    pub fn select_mode(&mut self, mode: PricingMode) -> ModeSwitch {
        self.switch_mode_at(mode, Instant::now())
    }

    /// Switch to `mode` as of `now`.
    ///
    /// Recomputes from the retained snapshot; nothing is fetched.
    pub fn switch_mode_at(&mut self, mode: PricingMode, now: Instant) -> ModeSwitch {
        if mode == self.mode {
            return ModeSwitch::Unchanged;
        }
        if let Some(last) = self.last_toggle {
            if now.saturating_duration_since(last) < self.toggle_cooldown {
                debug!(requested = %mode, "Mode switch ignored during cooldown");
                return ModeSwitch::CoolingDown;
            }
        }

        self.mode = mode;
        self.last_toggle = Some(now);
        let opportunities = self.render();
        info!(mode = %mode, opportunities, "Pricing mode switched");
        ModeSwitch::Switched(mode)
    }

    fn render(&mut self) -> usize {
        let opportunities = self.opportunities();
        self.presenter.render(&opportunities, self.mode);
        opportunities.len()
    }

    fn catalog_due(&self, now: Instant) -> bool {
        self.catalog_loaded_at
            .map_or(true, |loaded| now.saturating_duration_since(loaded) >= self.catalog_max_age)
    }
}
