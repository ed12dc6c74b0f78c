//! Exchange-agnostic domain logic: catalog and market types, profit
//! formulas and the opportunity engine.

mod catalog;
mod engine;
mod format;
mod ids;
mod join;
mod market;
mod mode;
mod money;
mod opportunity;
mod profit;

pub use catalog::{Catalog, ItemMeta, VendorOffer, VendorOffers, IMAGE_ROOT};
pub use engine::{compute_opportunities, EngineConfig, SnapshotContext};
pub use format::format_price;
pub use ids::ProductId;
pub use join::{join, JoinRow};
pub use market::{MarketSnapshot, MarketSummary};
pub use mode::PricingMode;
pub use money::{coerce_decimal, lenient_decimal, Price, Volume};
pub use opportunity::{Opportunity, OpportunityBuildError, OpportunityBuilder};
pub use profit::{daily_projected_profit, profit_margin, DAILY_UNIT_LIMIT};
