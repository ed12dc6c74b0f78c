//! Presentation adapters.
//!
//! Implements the `port::Presenter` trait for a human terminal view and for
//! machine-readable JSON lines.

mod json;
mod terminal;

pub use json::JsonPresenter;
pub use terminal::TerminalPresenter;
