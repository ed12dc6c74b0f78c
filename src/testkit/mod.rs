//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`source`] - In-memory [`MarketFetcher`](crate::port::MarketFetcher) and
//!   [`CatalogSource`](crate::port::CatalogSource) doubles with call counters.
//! - [`presenter`] - A [`Presenter`](crate::port::Presenter) that records
//!   every frame it is asked to show.
//! - [`domain`] - Builders for summaries, snapshots and catalogs.
//! - [`config`] - Canonical test configuration.

pub mod config;
pub mod domain;
pub mod presenter;
pub mod source;
