//! Application layer - configuration, the dashboard and its event loop.

mod command;
mod config;
mod dashboard;
mod orchestrator;
mod sequencer;

pub use command::Command;
pub use config::{CatalogConfig, Config, DashboardConfig, LoggingConfig, MarketConfig};
pub use dashboard::{
    CycleData, Dashboard, ModeSwitch, PendingRefresh, RefreshOutcome, Sources, CATALOG_ERROR,
    MARKET_ERROR,
};
pub use orchestrator::{build_sources, App};
pub use sequencer::{RequestSequencer, Ticket};
