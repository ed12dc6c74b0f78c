//! Bazaar REST API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use super::types::BazaarResponse;
use crate::domain::MarketSnapshot;
use crate::error::{FetchError, Result};
use crate::port::MarketFetcher;

/// Public bazaar endpoint.
pub const DEFAULT_BAZAAR_URL: &str = "https://api.hypixel.net/v2/skyblock/bazaar";

/// HTTP client for the bazaar API.
pub struct BazaarClient {
    client: Client,
    url: String,
}

impl BazaarClient {
    /// Create a client for `url` with a per-request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl MarketFetcher for BazaarClient {
    async fn fetch_market(&self) -> Result<MarketSnapshot> {
        debug!(url = %self.url, "Fetching bazaar snapshot");

        let response: BazaarResponse = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !response.success {
            return Err(FetchError::Unsuccessful.into());
        }

        let snapshot = response.into_snapshot();
        info!(products = snapshot.len(), "Bazaar snapshot fetched");

        Ok(snapshot)
    }

    fn source_name(&self) -> &'static str {
        "bazaar"
    }
}
