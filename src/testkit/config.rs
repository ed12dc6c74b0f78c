//! Canonical test configuration.

use crate::app::Config;
use crate::domain::PricingMode;

/// Default config starting in instant mode with no toggle cooldown.
pub fn dashboard() -> Config {
    let mut config = Config::default();
    config.dashboard.mode = PricingMode::Instant;
    config.dashboard.toggle_cooldown_ms = 0;
    config
}
