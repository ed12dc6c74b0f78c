//! Market data port.

use async_trait::async_trait;

use crate::domain::MarketSnapshot;
use crate::error::Result;

/// Provider of live market snapshots.
#[async_trait]
pub trait MarketFetcher: Send + Sync {
    /// Fetch the current snapshot of every product on the market.
    async fn fetch_market(&self) -> Result<MarketSnapshot>;

    /// Provider name for logging/debugging.
    fn source_name(&self) -> &'static str;
}
