//! SkyBlock bazaar integration.

mod client;
mod types;

pub use client::{BazaarClient, DEFAULT_BAZAAR_URL};
pub use types::{BazaarResponse, QuickStatus, RawProduct, SummaryEntry};
