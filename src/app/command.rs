//! Interactive dashboard commands.

use crate::domain::PricingMode;

/// A user command read from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Flip between instant and order pricing.
    Toggle,
    /// Switch to a specific pricing mode.
    Select(PricingMode),
    /// Fetch a fresh snapshot now, superseding any fetch in flight.
    Refresh,
    Quit,
}

impl Command {
    /// Parse one input line. Unknown input yields `None`.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "t" | "toggle" | "" => Some(Self::Toggle),
            "i" | "instant" => Some(Self::Select(PricingMode::Instant)),
            "o" | "order" => Some(Self::Select(PricingMode::Order)),
            "r" | "refresh" => Some(Self::Refresh),
            "q" | "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}
