//! Configuration validation command.

use crate::cli::{output, Cli};

/// Validate the configuration without fetching anything.
///
/// Returns `false` when the configuration is unusable.
pub fn execute(cli: &Cli) -> bool {
    output::note(&format!("Checking configuration: {}", cli.config.display()));
    if !cli.config.exists() {
        output::warn("Configuration file not found, using defaults");
    }

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            output::error(&format!("Configuration error: {e}"));
            return false;
        }
    };

    output::ok("Configuration is valid");

    output::section("Market");
    output::key_value("API", &config.market.api_url);
    output::key_value("Poll interval", format!("{}s", config.market.poll_interval_secs));
    output::key_value("Timeout", format!("{}s", config.market.request_timeout_secs));

    output::section("Catalog");
    output::key_value("Location", &config.catalog.location);
    output::key_value(
        "Source",
        if config.catalog.is_remote() { "http" } else { "file" },
    );
    if config.catalog.cache_enabled {
        let path = config
            .catalog
            .cache_path
            .clone()
            .or_else(crate::adapter::catalog::FileCatalogStore::default_path);
        match path {
            Some(path) => output::key_value("Cache", path.display()),
            None => output::key_value("Cache", "unavailable"),
        }
        output::key_value("Max age", format!("{} days", config.catalog.max_age_days));
    } else {
        output::key_value("Cache", "disabled");
    }

    output::section("Engine");
    output::key_value("Min margin", config.engine.min_profit_margin);
    output::key_value("Fee", config.engine.fee);
    output::key_value("Min sell volume", config.engine.min_sell_volume);
    output::key_value("Min buy volume", config.engine.min_buy_volume);
    output::key_value("Daily unit limit", config.engine.daily_unit_limit);
    match config.engine.top_n {
        Some(n) => output::key_value("Top", n),
        None => output::key_value("Top", "all"),
    }

    output::section("Dashboard");
    output::key_value("Mode", config.dashboard.mode);
    output::key_value(
        "Toggle cooldown",
        format!("{}ms", config.dashboard.toggle_cooldown_ms),
    );

    true
}
