//! Catalog documents on the local filesystem.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{decode_catalog, ITEM_DATA_FILE, VENDOR_DATA_FILE};
use crate::domain::Catalog;
use crate::error::Result;
use crate::port::CatalogSource;

/// Reads `item_data.json` and `npc_items.json` from a directory.
pub struct FileCatalogSource {
    dir: PathBuf,
}

impl FileCatalogSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch_catalog(&self) -> Result<Catalog> {
        debug!(dir = %self.dir.display(), "Reading catalog documents");
        let items = tokio::fs::read_to_string(self.dir.join(ITEM_DATA_FILE)).await?;
        let vendors = tokio::fs::read_to_string(self.dir.join(VENDOR_DATA_FILE)).await?;
        decode_catalog(&items, &vendors)
    }

    fn source_name(&self) -> &'static str {
        "file"
    }
}
