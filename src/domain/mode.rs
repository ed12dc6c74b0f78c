//! Pricing mode selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which market price represents the realizable sale price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingMode {
    /// Sell instantly into the top of the sell summary.
    Instant,
    /// Queue a sell order at the top of the buy summary.
    #[default]
    Order,
}

impl PricingMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Instant => Self::Order,
            Self::Order => Self::Instant,
        }
    }

    /// Short label for headers and logs.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Instant => "instant",
            Self::Order => "order",
        }
    }

    /// Column heading for the sale price under this mode.
    pub const fn price_heading(self) -> &'static str {
        match self {
            Self::Instant => "Insta-Sell Price",
            Self::Order => "Sell Order Price",
        }
    }
}

impl fmt::Display for PricingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PricingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "instant" | "insta-sell" | "insta_sell" => Ok(Self::Instant),
            "order" | "sell-order" | "sell_order" => Ok(Self::Order),
            other => Err(format!(
                "unknown pricing mode '{other}' (expected 'instant' or 'order')"
            )),
        }
    }
}
