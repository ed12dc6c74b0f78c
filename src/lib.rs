//! npcflip - NPC vendor to bazaar arbitrage finder.
//!
//! Joins the live SkyBlock bazaar with a static catalog of NPC vendor
//! prices and ranks every product that can be bought from an NPC and sold
//! on the bazaar for more.
//!
//! # Architecture
//!
//! - [`domain`] - Pure types and the opportunity engine: catalog, market
//!   snapshot, pricing mode, profit formulas, ranking, price formatting
//! - [`port`] - Trait seams: market fetcher, catalog source and cache,
//!   presenter
//! - [`adapter`] - Bazaar HTTP client, file/HTTP catalog sources, on-disk
//!   catalog cache, terminal and JSON presenters
//! - [`app`] - Configuration, the dashboard state machine and its event loop
//! - [`cli`] - Command-line entry points
//!
//! # Example
//!
//! ```
//! use npcflip::domain::{compute_opportunities, Catalog, EngineConfig, MarketSnapshot, PricingMode};
//!
//! let market = MarketSnapshot::empty();
//! let catalog = Catalog::default();
//! let ranked = compute_opportunities(&market, &catalog, PricingMode::Order, &EngineConfig::default());
//! assert!(ranked.is_empty());
//! ```

pub mod adapter;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
