//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! The opportunity engine is pure; everything it talks to goes through one
//! of these seams so the dashboard can be driven by real adapters or by
//! test doubles.
//!
//! # Available Ports
//!
//! - [`MarketFetcher`] - Live market snapshot provider
//! - [`CatalogSource`] - Item metadata and vendor offer provider
//! - [`CatalogStore`] - Local catalog cache with a freshness check
//! - [`Presenter`] - Rendering sink for ranked opportunities

mod catalog;
mod market;
mod presenter;

pub use catalog::{CachedCatalog, CatalogSource, CatalogStore};
pub use market::MarketFetcher;
pub use presenter::Presenter;
