//! In-memory data sources for driving the dashboard in tests.
//!
//! - [`StaticMarket`] - Serves the same snapshot every call, or always fails.
//! - [`ScriptedMarket`] - Pops one scripted result per call.
//! - [`StaticCatalog`] - Serves a fixed catalog, or always fails.
//!
//! Each double exposes a shared call counter so tests can assert how often
//! the dashboard actually fetched.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{Catalog, MarketSnapshot};
use crate::error::{FetchError, Result};
use crate::port::{CatalogSource, MarketFetcher};

/// Shared call counter handed out by the doubles.
#[derive(Debug, Clone, Default)]
pub struct Calls(Arc<AtomicU32>);

impl Calls {
    pub fn get(&self) -> u32 {
        self.0.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// StaticMarket
// ---------------------------------------------------------------------------

pub struct StaticMarket {
    snapshot: Option<MarketSnapshot>,
    delay: Option<Duration>,
    calls: Calls,
}

impl StaticMarket {
    pub fn new(snapshot: MarketSnapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
            delay: None,
            calls: Calls::default(),
        }
    }

    /// A market whose every fetch fails.
    pub fn failing() -> Self {
        Self {
            snapshot: None,
            delay: None,
            calls: Calls::default(),
        }
    }

    /// Sleep for `delay` before answering each fetch.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Calls {
        self.calls.clone()
    }
}

#[async_trait]
impl MarketFetcher for StaticMarket {
    async fn fetch_market(&self) -> Result<MarketSnapshot> {
        self.calls.bump();
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.snapshot
            .clone()
            .ok_or_else(|| FetchError::Unsuccessful.into())
    }

    fn source_name(&self) -> &'static str {
        "static-market"
    }
}

// ---------------------------------------------------------------------------
// ScriptedMarket
// ---------------------------------------------------------------------------

/// Pops the next scripted snapshot per fetch; `None` entries fail.
///
/// Once the script runs out every fetch returns an empty snapshot.
pub struct ScriptedMarket {
    script: Mutex<VecDeque<Option<MarketSnapshot>>>,
    calls: Calls,
}

impl ScriptedMarket {
    pub fn new(script: Vec<Option<MarketSnapshot>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Calls::default(),
        }
    }

    pub fn calls(&self) -> Calls {
        self.calls.clone()
    }
}

#[async_trait]
impl MarketFetcher for ScriptedMarket {
    async fn fetch_market(&self) -> Result<MarketSnapshot> {
        self.calls.bump();
        match self.script.lock().pop_front() {
            Some(Some(snapshot)) => Ok(snapshot),
            Some(None) => Err(FetchError::Unsuccessful.into()),
            None => Ok(MarketSnapshot::empty()),
        }
    }

    fn source_name(&self) -> &'static str {
        "scripted-market"
    }
}

// ---------------------------------------------------------------------------
// StaticCatalog
// ---------------------------------------------------------------------------

pub struct StaticCatalog {
    catalog: Option<Catalog>,
    calls: Calls,
}

impl StaticCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Some(catalog),
            calls: Calls::default(),
        }
    }

    /// A catalog source whose every fetch fails.
    pub fn failing() -> Self {
        Self {
            catalog: None,
            calls: Calls::default(),
        }
    }

    pub fn calls(&self) -> Calls {
        self.calls.clone()
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn fetch_catalog(&self) -> Result<Catalog> {
        self.calls.bump();
        self.catalog.clone().ok_or_else(|| {
            FetchError::Decode {
                source_name: "static-catalog",
                reason: "unavailable".into(),
            }
            .into()
        })
    }

    fn source_name(&self) -> &'static str {
        "static-catalog"
    }
}
