//! JSON-lines output for scripting.

use std::io::{self, Stdout, Write};

use chrono::Utc;
use serde_json::json;
use tracing::warn;

use crate::domain::{Opportunity, PricingMode};
use crate::port::Presenter;

/// Emits one `{"type": ..., "payload": ...}` line per event.
pub struct JsonPresenter<W: Write + Send = Stdout> {
    out: W,
}

impl JsonPresenter<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write + Send> JsonPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, kind: &str, payload: serde_json::Value) {
        let line = json!({
            "type": kind,
            "payload": payload,
        });
        if let Err(e) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            warn!(error = %e, "Failed to write JSON line");
        }
    }
}

impl<W: Write + Send> Presenter for JsonPresenter<W> {
    fn render(&mut self, opportunities: &[Opportunity], mode: PricingMode) {
        self.emit(
            "opportunities",
            json!({
                "mode": mode,
                "updated_at": Utc::now(),
                "opportunities": opportunities,
            }),
        );
    }

    fn show_loading(&mut self) {}

    fn hide_loading(&mut self) {}

    fn show_error(&mut self, message: &str) {
        self.emit("error", json!({ "message": message }));
    }
}
