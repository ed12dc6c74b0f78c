//! Terminal table view.

use std::io::{self, IsTerminal, Stdout, Write};
use std::time::Duration;

use chrono::{DateTime, Local};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::warn;

use crate::domain::{format_price, Opportunity, PricingMode};
use crate::port::Presenter;

/// Braille spinner animation frames.
const BRAILLE_SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Tabled)]
struct OpportunityRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Item")]
    name: String,
    #[tabled(rename = "NPC")]
    vendor: String,
    #[tabled(rename = "Island")]
    location: String,
    #[tabled(rename = "Buy Price")]
    buy_price: String,
    #[tabled(rename = "Sell Price")]
    sell_price: String,
    #[tabled(rename = "Profit Margin")]
    margin: String,
    #[tabled(rename = "Daily Profit")]
    daily: String,
}

impl OpportunityRow {
    fn new(rank: usize, opp: &Opportunity) -> Self {
        let vendor = opp.vendor();
        Self {
            rank,
            name: opp.name().to_string(),
            vendor: non_empty_or_na(&vendor.vendor_name),
            location: vendor
                .location
                .as_deref()
                .map_or_else(|| "N/A".to_string(), non_empty_or_na),
            buy_price: format_price(opp.vendor_buy_price()),
            sell_price: format_price(opp.display_price()),
            margin: format_price(opp.profit_margin()),
            daily: format_price(opp.daily_projected_profit()),
        }
    }
}

fn non_empty_or_na(value: &str) -> String {
    if value.is_empty() {
        "N/A".to_string()
    } else {
        value.to_string()
    }
}

/// Renders the ranked list as a table, redrawing the screen on each cycle.
pub struct TerminalPresenter<W: Write + Send = Stdout> {
    out: W,
    color: bool,
    redraw: bool,
    spinner: Option<ProgressBar>,
    banner: Option<String>,
    last_updated: Option<DateTime<Local>>,
}

impl TerminalPresenter<Stdout> {
    /// Presenter on stdout; colors and redraws only when stdout is a terminal.
    pub fn stdout() -> Self {
        let tty = io::stdout().is_terminal();
        Self {
            out: io::stdout(),
            color: tty,
            redraw: tty,
            spinner: None,
            banner: None,
            last_updated: None,
        }
    }
}

impl<W: Write + Send> TerminalPresenter<W> {
    /// Uncolored presenter on any writer.
    pub fn plain(out: W) -> Self {
        Self {
            out,
            color: false,
            redraw: false,
            spinner: None,
            banner: None,
            last_updated: None,
        }
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_frame(&mut self, opportunities: &[Opportunity], mode: PricingMode) -> io::Result<()> {
        if self.redraw {
            write!(self.out, "{CLEAR_SCREEN}")?;
        }

        let view = format!("{} view", mode.price_heading());
        let count = format!("{} opportunities", opportunities.len());
        let updated = self
            .last_updated
            .map(|t| format!("updated {}", t.format("%H:%M:%S")))
            .unwrap_or_default();

        if self.color {
            writeln!(
                self.out,
                "{}  {}  {}  {}",
                "npcflip".bold(),
                view.cyan(),
                count,
                updated.dimmed()
            )?;
        } else {
            writeln!(self.out, "npcflip  {view}  {count}  {updated}")?;
        }

        if let Some(message) = self.banner.take() {
            if self.color {
                writeln!(self.out, "  {} {}", "×".red(), message.red())?;
            } else {
                writeln!(self.out, "  × {message}")?;
            }
        }
        writeln!(self.out)?;

        if opportunities.is_empty() {
            writeln!(self.out, "  No profitable flips right now.")?;
        } else {
            let rows = opportunities
                .iter()
                .enumerate()
                .map(|(i, opp)| OpportunityRow::new(i + 1, opp));
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            for line in table.to_string().lines() {
                writeln!(self.out, "  {line}")?;
            }
        }

        writeln!(self.out)?;
        self.out.flush()
    }
}

impl<W: Write + Send> Presenter for TerminalPresenter<W> {
    fn render(&mut self, opportunities: &[Opportunity], mode: PricingMode) {
        self.last_updated = Some(Local::now());
        if let Err(e) = self.write_frame(opportunities, mode) {
            warn!(error = %e, "Failed to write dashboard frame");
        }
    }

    fn show_loading(&mut self) {
        if !self.color || self.spinner.is_some() {
            return;
        }

        let style = ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(BRAILLE_SPINNER);
        let pb = ProgressBar::new_spinner();
        pb.set_style(style);
        pb.set_message("Refreshing bazaar prices...");
        pb.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(pb);
    }

    fn hide_loading(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }

    fn show_error(&mut self, message: &str) {
        self.banner = Some(message.to_string());
    }
}
