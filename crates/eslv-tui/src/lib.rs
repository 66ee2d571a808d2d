//! eslv TUI: ratatui application shell around the core event view.

pub mod app;
pub mod commands;
pub mod event;
pub mod markup;
pub mod theme;
pub mod widgets;

pub use app::{App, Session};

use eslv_core::{config::Config, EventIndex, EventView};

/// Run the interactive viewer until the user quits.
///
/// Returns the filter and hidden names the session ended with.
pub fn run(index: EventIndex, view: EventView, config: Config) -> anyhow::Result<Session> {
    tracing::info!(events = index.len(), "starting interactive viewer");
    App::new(index, view, config).run()
}
