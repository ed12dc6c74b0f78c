//! Presentation port.

use crate::domain::{Opportunity, PricingMode};

/// Sink for the ranked opportunity list and dashboard status.
///
/// Every `render` call carries the complete list; implementations replace
/// whatever they showed before.
pub trait Presenter: Send {
    /// Show the full ranked list computed under `mode`.
    fn render(&mut self, opportunities: &[Opportunity], mode: PricingMode);

    /// A refresh cycle started.
    fn show_loading(&mut self);

    /// The refresh cycle finished, successfully or not.
    fn hide_loading(&mut self);

    /// Show a non-fatal error banner.
    fn show_error(&mut self, message: &str);
}
