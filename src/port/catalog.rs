//! Catalog ports: the remote source and the local cache.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::domain::Catalog;
use crate::error::Result;

/// Provider of the static item and vendor catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch both catalog documents.
    async fn fetch_catalog(&self) -> Result<Catalog>;

    /// Provider name for logging/debugging.
    fn source_name(&self) -> &'static str;
}

/// A catalog together with the time it was stored.
#[derive(Debug, Clone)]
pub struct CachedCatalog {
    pub catalog: Catalog,
    pub saved_at: DateTime<Utc>,
}

impl CachedCatalog {
    /// Whether the entry is younger than `max_age` at `now`.
    pub fn is_fresh(&self, max_age: Duration, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.saved_at) < max_age
    }
}

/// Local key-value cache for the catalog.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Load the cached catalog, if one exists.
    async fn load(&self) -> Result<Option<CachedCatalog>>;

    /// Replace the cached catalog.
    async fn save(&self, catalog: &Catalog, saved_at: DateTime<Utc>) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freshness_window() {
        let now = Utc::now();
        let cached = CachedCatalog {
            catalog: Catalog::default(),
            saved_at: now - Duration::days(29),
        };
        assert!(cached.is_fresh(Duration::days(30), now));

        let stale = CachedCatalog {
            saved_at: now - Duration::days(31),
            ..cached
        };
        assert!(!stale.is_fresh(Duration::days(30), now));
    }
}
