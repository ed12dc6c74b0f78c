//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file. Every section is optional and
//! falls back to the defaults below.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::adapter::hypixel::DEFAULT_BAZAAR_URL;
use crate::domain::{EngineConfig, PricingMode};
use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub market: MarketConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Market data source settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Seconds between refresh cycles.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_BAZAAR_URL.to_string()
}

const fn default_poll_interval_secs() -> u64 {
    10
}

const fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            poll_interval_secs: default_poll_interval_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl MarketConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Catalog source and cache settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Directory or http(s) base URL holding `item_data.json` and
    /// `npc_items.json`.
    #[serde(default = "default_catalog_location")]
    pub location: String,
    /// Cache the catalog on disk between runs.
    #[serde(default = "default_true")]
    pub cache_enabled: bool,
    /// Cache file; defaults to the platform cache directory.
    #[serde(default)]
    pub cache_path: Option<PathBuf>,
    /// Days a cached catalog stays fresh.
    #[serde(default = "default_max_age_days")]
    pub max_age_days: u32,
}

fn default_catalog_location() -> String {
    "data".to_string()
}

const fn default_true() -> bool {
    true
}

const fn default_max_age_days() -> u32 {
    30
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            location: default_catalog_location(),
            cache_enabled: default_true(),
            cache_path: None,
            max_age_days: default_max_age_days(),
        }
    }
}

impl CatalogConfig {
    pub fn max_age(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.max_age_days))
    }

    /// Whether `location` points at a remote base URL.
    pub fn is_remote(&self) -> bool {
        self.location.starts_with("http://") || self.location.starts_with("https://")
    }
}

/// Dashboard behaviour.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Pricing mode shown at startup.
    #[serde(default)]
    pub mode: PricingMode,
    /// Minimum gap between accepted mode toggles.
    #[serde(default = "default_toggle_cooldown_ms")]
    pub toggle_cooldown_ms: u64,
}

const fn default_toggle_cooldown_ms() -> u64 {
    3000
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            mode: PricingMode::default(),
            toggle_cooldown_ms: default_toggle_cooldown_ms(),
        }
    }
}

impl DashboardConfig {
    pub fn toggle_cooldown(&self) -> Duration {
        Duration::from_millis(self.toggle_cooldown_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse(&content)
    }

    /// Load `path`, or fall back to defaults when the file does not exist
    /// and `required` is false.
    pub fn load_or_default<P: AsRef<Path>>(path: P, required: bool) -> Result<Self> {
        let path = path.as_ref();
        if !required && !path.exists() {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        Self::load(path)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.market.api_url.is_empty() {
            return Err(ConfigError::MissingField { field: "api_url" }.into());
        }
        if self.catalog.location.is_empty() {
            return Err(ConfigError::MissingField { field: "location" }.into());
        }
        if self.market.poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "poll_interval_secs",
                reason: "must be at least 1 second".into(),
            }
            .into());
        }
        if self.market.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_secs",
                reason: "must be at least 1 second".into(),
            }
            .into());
        }
        non_negative("min_profit_margin", self.engine.min_profit_margin)?;
        non_negative("fee", self.engine.fee)?;
        non_negative("min_sell_volume", self.engine.min_sell_volume)?;
        non_negative("min_buy_volume", self.engine.min_buy_volume)?;
        Ok(())
    }

    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        // stdout belongs to the dashboard.
        match self.logging.format.as_str() {
            "json" => {
                fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
            _ => {
                fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
        }
    }
}

fn non_negative(field: &'static str, value: Decimal) -> Result<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("must not be negative, got {value}"),
        }
        .into());
    }
    Ok(())
}
