//! Catalog documents served over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::{decode_catalog, ITEM_DATA_FILE, VENDOR_DATA_FILE};
use crate::domain::Catalog;
use crate::error::{FetchError, Result};
use crate::port::CatalogSource;

/// Fetches `item_data.json` and `npc_items.json` relative to a base URL.
pub struct HttpCatalogSource {
    client: Client,
    items_url: Url,
    vendors_url: Url,
}

impl HttpCatalogSource {
    /// Create a source rooted at `base`.
    ///
    /// A base without a trailing slash is treated as a directory.
    pub fn new(base: &str, timeout: Duration) -> Result<Self> {
        let base = if base.ends_with('/') {
            Url::parse(base)?
        } else {
            Url::parse(&format!("{base}/"))?
        };

        if base.cannot_be_a_base() {
            return Err(FetchError::InvalidLocation {
                location: base.to_string(),
                reason: "URL cannot be used as a base".into(),
            }
            .into());
        }

        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            items_url: base.join(ITEM_DATA_FILE)?,
            vendors_url: base.join(VENDOR_DATA_FILE)?,
        })
    }

    pub fn items_url(&self) -> &Url {
        &self.items_url
    }

    pub fn vendors_url(&self) -> &Url {
        &self.vendors_url
    }

    async fn get_text(&self, url: &Url) -> Result<String> {
        debug!(url = %url, "Fetching catalog document");
        let text = self
            .client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(text)
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_catalog(&self) -> Result<Catalog> {
        let (items, vendors) = tokio::try_join!(
            self.get_text(&self.items_url),
            self.get_text(&self.vendors_url)
        )?;
        decode_catalog(&items, &vendors)
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}
