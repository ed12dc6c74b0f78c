//! Freshness-window cache in front of a catalog source.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tracing::{debug, info, warn};

use crate::domain::Catalog;
use crate::error::Result;
use crate::port::{CachedCatalog, CatalogSource, CatalogStore};

/// Serves the stored catalog while it is fresh, otherwise refetches.
///
/// When the refetch fails a stale cached copy is still served; only a
/// failed fetch with nothing cached is an error.
pub struct CachedCatalogSource<S, St> {
    source: S,
    store: St,
    max_age: Duration,
}

impl<S, St> CachedCatalogSource<S, St>
where
    S: CatalogSource,
    St: CatalogStore,
{
    pub fn new(source: S, store: St, max_age: Duration) -> Self {
        Self {
            source,
            store,
            max_age,
        }
    }

    async fn load_cached(&self) -> Option<CachedCatalog> {
        match self.store.load().await {
            Ok(cached) => cached,
            Err(e) => {
                warn!(error = %e, "Catalog cache unreadable, treating as miss");
                None
            }
        }
    }
}

#[async_trait]
impl<S, St> CatalogSource for CachedCatalogSource<S, St>
where
    S: CatalogSource,
    St: CatalogStore,
{
    async fn fetch_catalog(&self) -> Result<Catalog> {
        let now = Utc::now();
        let cached = self.load_cached().await;

        if let Some(entry) = &cached {
            if entry.is_fresh(self.max_age, now) {
                debug!(saved_at = %entry.saved_at, "Using cached catalog");
                return Ok(entry.catalog.clone());
            }
        }

        match self.source.fetch_catalog().await {
            Ok(catalog) => {
                info!(
                    source = self.source.source_name(),
                    items = catalog.items.len(),
                    vendors = catalog.vendors.len(),
                    "Catalog fetched"
                );
                if let Err(e) = self.store.save(&catalog, now).await {
                    warn!(error = %e, "Failed to cache catalog");
                }
                Ok(catalog)
            }
            Err(e) => match cached {
                Some(stale) => {
                    warn!(
                        error = %e,
                        saved_at = %stale.saved_at,
                        "Catalog fetch failed, serving stale cache"
                    );
                    Ok(stale.catalog)
                }
                None => Err(e),
            },
        }
    }

    fn source_name(&self) -> &'static str {
        self.source.source_name()
    }
}
