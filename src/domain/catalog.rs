//! Static catalog data: item display metadata and NPC vendor offers.
//!
//! The catalog changes rarely. It is loaded once per freshness window and
//! shared read-only across refresh cycles.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::ids::ProductId;
use super::money::{lenient_decimal, Price};

/// Prefix prepended to catalog image names when rendering.
pub const IMAGE_ROOT: &str = "/assets/images/";

/// Display metadata for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMeta {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ItemMeta {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: None,
        }
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Path of the item image under the asset root, if the item has one.
    pub fn image_path(&self) -> Option<String> {
        self.image
            .as_deref()
            .filter(|image| !image.is_empty())
            .map(|image| format!("{IMAGE_ROOT}{image}"))
    }
}

/// A fixed purchase price offered by an NPC vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorOffer {
    #[serde(rename = "npc", default)]
    pub vendor_name: String,
    #[serde(rename = "island", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "price", default, deserialize_with = "lenient_decimal")]
    pub buy_price: Price,
}

impl VendorOffer {
    pub fn new(vendor_name: impl Into<String>, buy_price: Price) -> Self {
        Self {
            vendor_name: vendor_name.into(),
            location: None,
            buy_price,
        }
    }

    #[must_use]
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// One or many vendor offers for the same product.
///
/// The catalog JSON stores a bare object when a single vendor sells the
/// product and an array when several do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VendorOffers {
    One(VendorOffer),
    Many(Vec<VendorOffer>),
}

impl VendorOffers {
    /// Normalize to a slice, preserving catalog order.
    pub fn as_slice(&self) -> &[VendorOffer] {
        match self {
            Self::One(offer) => std::slice::from_ref(offer),
            Self::Many(offers) => offers,
        }
    }
}

impl From<VendorOffer> for VendorOffers {
    fn from(offer: VendorOffer) -> Self {
        Self::One(offer)
    }
}

impl From<Vec<VendorOffer>> for VendorOffers {
    fn from(offers: Vec<VendorOffer>) -> Self {
        Self::Many(offers)
    }
}

/// Item metadata and vendor offers, keyed by product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub items: HashMap<ProductId, ItemMeta>,
    #[serde(default)]
    pub vendors: HashMap<ProductId, VendorOffers>,
}

impl Catalog {
    pub fn new(
        items: HashMap<ProductId, ItemMeta>,
        vendors: HashMap<ProductId, VendorOffers>,
    ) -> Self {
        Self { items, vendors }
    }

    /// Display metadata for a product, if the catalog has any.
    pub fn item(&self, id: &ProductId) -> Option<&ItemMeta> {
        self.items.get(id)
    }

    /// Vendor offers for a product, normalized to a slice.
    pub fn offers(&self, id: &ProductId) -> Option<&[VendorOffer]> {
        self.vendors.get(id).map(VendorOffers::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.vendors.is_empty()
    }
}
