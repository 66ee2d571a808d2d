//! Command-line surface and the relaunch-parameter echo.

use clap::Parser;
use eslv_core::{config::Config, EventView, MatchMode};
use eslv_tui::Session;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "eslv",
    version,
    about = "ESL Events Viewer: browse, filter and inspect FreeSWITCH event logs"
)]
pub struct Cli {
    /// Path to the events log file (`-` reads standard input).
    #[arg(short, long, value_name = "PATH", default_value = "events.log")]
    pub file: PathBuf,

    /// Show all event headers, including the normally suppressed ones.
    #[arg(short, long)]
    pub all: bool,

    /// Initial search filter.
    #[arg(value_name = "FILTER", conflicts_with = "search")]
    pub filter: Option<String>,

    /// Initial search filter, as printed on exit.
    #[arg(short, long, value_name = "FILTER")]
    pub search: Option<String>,

    /// Comma-separated event names to hide from the list.
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub hide_events: Vec<String>,

    /// Match the filter as plain text instead of a regular expression.
    #[arg(long)]
    pub plain: bool,

    /// Print the matching events to stdout and exit instead of starting the TUI.
    #[arg(long)]
    pub headless: bool,

    /// Write debug logs to /tmp/eslv-debug.log (tail -f to inspect).
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    pub fn filter_text(&self) -> &str {
        self.search
            .as_deref()
            .or(self.filter.as_deref())
            .unwrap_or_default()
    }

    pub fn match_mode(&self, configured: MatchMode) -> MatchMode {
        if self.plain {
            MatchMode::Plain
        } else {
            configured
        }
    }

    /// The starting view: configured search mode, initial filter and hidden
    /// event names.
    pub fn view(&self, config: &Config) -> EventView {
        let mut view = EventView::new(
            self.match_mode(config.search.mode),
            config.search.options(),
        );
        view.set_filter(self.filter_text());
        view.hide_all(&self.hide_events);
        view
    }
}

/// `params: ...` line that relaunches the viewer in the state it was left
/// in, or `None` when nothing differs from the defaults.
pub fn relaunch_params(session: &Session, show_all: bool) -> Option<String> {
    let mut params = String::new();

    if !session.filter.is_empty() {
        params.push_str(" --search=");
        params.push_str(&quote(&session.filter));
    }
    if !session.hidden.is_empty() {
        params.push_str(" --hide-events=\"");
        params.push_str(&session.hidden.join(","));
        params.push('"');
    }
    if session.mode == MatchMode::Plain {
        params.push_str(" --plain");
    }
    if show_all {
        params.push_str(" --all");
    }

    (!params.is_empty()).then(|| format!("params:{params}"))
}

fn quote(value: &str) -> String {
    if value.contains(char::is_whitespace) || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\\\""))
    } else {
        value.to_string()
    }
}
