//! On-disk catalog cache.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Catalog;
use crate::error::Result;
use crate::port::{CachedCatalog, CatalogStore};

#[derive(Serialize, Deserialize)]
struct CacheFile {
    saved_at: DateTime<Utc>,
    catalog: Catalog,
}

/// Stores the catalog as one JSON file.
pub struct FileCatalogStore {
    path: PathBuf,
}

impl FileCatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<platform cache dir>/npcflip/catalog.json`, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join("npcflip").join("catalog.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogStore for FileCatalogStore {
    async fn load(&self) -> Result<Option<CachedCatalog>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let file: CacheFile = serde_json::from_str(&content)?;
        Ok(Some(CachedCatalog {
            catalog: file.catalog,
            saved_at: file.saved_at,
        }))
    }

    async fn save(&self, catalog: &Catalog, saved_at: DateTime<Utc>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let file = CacheFile {
            saved_at,
            catalog: catalog.clone(),
        };
        tokio::fs::write(&self.path, serde_json::to_vec(&file)?).await?;
        debug!(path = %self.path.display(), "Catalog cached");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ItemMeta, ProductId};

    #[tokio::test]
    async fn missing_file_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCatalogStore::new(dir.path().join("catalog.json"));
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCatalogStore::new(dir.path().join("nested").join("catalog.json"));

        let mut catalog = Catalog::default();
        catalog
            .items
            .insert(ProductId::from("WHEAT"), ItemMeta::new("Wheat"));
        let saved_at = Utc::now();

        store.save(&catalog, saved_at).await.unwrap();
        let cached = store.load().await.unwrap().unwrap();

        assert_eq!(cached.catalog, catalog);
        assert_eq!(cached.saved_at, saved_at);
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{broken").unwrap();

        assert!(FileCatalogStore::new(path).load().await.is_err());
    }
}
