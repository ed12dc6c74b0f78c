//! A presenter that records what it was asked to show.

use std::sync::Arc;

use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::domain::{Opportunity, PricingMode};
use crate::port::Presenter;

/// One `render` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub mode: PricingMode,
    pub product_ids: Vec<String>,
    pub margins: Vec<Decimal>,
}

#[derive(Debug, Default)]
struct Recording {
    frames: Vec<Frame>,
    errors: Vec<String>,
    loading_shown: u32,
    loading_hidden: u32,
}

/// Records frames, error banners and loading transitions.
///
/// Clones share one recording, so a test can keep a handle while the
/// dashboard owns the presenter.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    log: Arc<Mutex<Recording>>,
}

impl RecordingPresenter {
    pub fn frames(&self) -> Vec<Frame> {
        self.log.lock().frames.clone()
    }

    pub fn last_frame(&self) -> Option<Frame> {
        self.log.lock().frames.last().cloned()
    }

    pub fn errors(&self) -> Vec<String> {
        self.log.lock().errors.clone()
    }

    /// `show_loading` calls minus `hide_loading` calls.
    pub fn loading_balance(&self) -> i64 {
        let log = self.log.lock();
        i64::from(log.loading_shown) - i64::from(log.loading_hidden)
    }
}

impl Presenter for RecordingPresenter {
    fn render(&mut self, opportunities: &[Opportunity], mode: PricingMode) {
        self.log.lock().frames.push(Frame {
            mode,
            product_ids: opportunities
                .iter()
                .map(|o| o.product_id().to_string())
                .collect(),
            margins: opportunities.iter().map(Opportunity::profit_margin).collect(),
        });
    }

    fn show_loading(&mut self) {
        self.log.lock().loading_shown += 1;
    }

    fn hide_loading(&mut self) {
        self.log.lock().loading_hidden += 1;
    }

    fn show_error(&mut self, message: &str) {
        self.log.lock().errors.push(message.to_string());
    }
}
