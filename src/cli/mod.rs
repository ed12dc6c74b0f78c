//! Command-line interface definitions.

pub mod banner;
pub mod check;
pub mod explain;
pub mod output;
pub mod run;
pub mod scan;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use crate::app::Config;
use crate::domain::PricingMode;
use crate::error::Result;

/// Default configuration file, optional when absent.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// npcflip - NPC vendor to bazaar flip finder.
#[derive(Parser, Debug)]
#[command(name = "npcflip")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the live dashboard (foreground, interactive)
    Run(DashboardArgs),

    /// Fetch once, print the ranked list and exit
    Scan(DashboardArgs),

    /// Validate the configuration file
    Check,

    /// Explain how margins and daily profit are computed
    Explain,
}

/// Overrides shared by `run` and `scan`.
#[derive(Args, Debug, Default)]
pub struct DashboardArgs {
    /// Pricing mode: instant or order
    #[arg(long)]
    pub mode: Option<PricingMode>,

    /// Only show margins strictly above this value
    #[arg(long)]
    pub min_margin: Option<Decimal>,

    /// Per-unit fee subtracted from every margin
    #[arg(long)]
    pub fee: Option<Decimal>,

    /// Seconds between refreshes
    #[arg(long)]
    pub interval: Option<u64>,

    /// Show only the best N opportunities
    #[arg(long)]
    pub top: Option<usize>,

    /// Emit JSON lines instead of a table
    #[arg(long)]
    pub json: bool,

    /// Skip the banner
    #[arg(long)]
    pub no_banner: bool,
}

impl Cli {
    /// Load configuration and apply global overrides.
    ///
    /// A missing file is only an error when a path other than the default
    /// was given explicitly.
    pub fn load_config(&self) -> Result<Config> {
        let required = self.config.as_os_str() != DEFAULT_CONFIG_PATH;
        let mut config = Config::load_or_default(&self.config, required)?;

        if let Some(ref level) = self.log_level {
            config.logging.level = level.clone();
        }
        if self.json_logs {
            config.logging.format = "json".to_string();
        }
        Ok(config)
    }
}

impl DashboardArgs {
    /// Apply overrides and re-validate.
    pub fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(mode) = self.mode {
            config.dashboard.mode = mode;
        }
        if let Some(min_margin) = self.min_margin {
            config.engine.min_profit_margin = min_margin;
        }
        if let Some(fee) = self.fee {
            config.engine.fee = fee;
        }
        if let Some(interval) = self.interval {
            config.market.poll_interval_secs = interval;
        }
        if let Some(top) = self.top {
            config.engine.top_n = Some(top);
        }
        config.validate()
    }
}
