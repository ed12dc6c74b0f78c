//! Catalog adapters: where item metadata and vendor offers come from, and
//! how they are cached between runs.

mod cached;
mod file;
mod http;
mod store;

pub use cached::CachedCatalogSource;
pub use file::FileCatalogSource;
pub use http::HttpCatalogSource;
pub use store::FileCatalogStore;

use std::collections::HashMap;

use crate::domain::{Catalog, ItemMeta, ProductId, VendorOffers};
use crate::error::{FetchError, Result};

/// Item metadata document name.
pub const ITEM_DATA_FILE: &str = "item_data.json";

/// Vendor offer document name.
pub const VENDOR_DATA_FILE: &str = "npc_items.json";

/// Decode both catalog documents.
pub(crate) fn decode_catalog(items_json: &str, vendors_json: &str) -> Result<Catalog> {
    let items: HashMap<ProductId, ItemMeta> =
        serde_json::from_str(items_json).map_err(|e| FetchError::Decode {
            source_name: ITEM_DATA_FILE,
            reason: e.to_string(),
        })?;
    let vendors: HashMap<ProductId, VendorOffers> =
        serde_json::from_str(vendors_json).map_err(|e| FetchError::Decode {
            source_name: VENDOR_DATA_FILE,
            reason: e.to_string(),
        })?;

    Ok(Catalog::new(items, vendors))
}
