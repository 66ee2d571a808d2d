// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use crate::{app::AppState, theme::Theme};
use eslv_core::MatchMode;

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    // Toggle the help popup
    Help,
    // Hide the named event, or the selected one
    Hide(Option<String>),
    // Show every hidden event again
    Restore,
    // Switch the filter between regex and plain text
    Mode(MatchMode),
    Theme(String),
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" | "q!" | "quit!" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "hide" => Ok(Command::Hide((!rest.is_empty()).then(|| rest.to_string()))),
            "restore" => Ok(Command::Restore),
            "mode" => {
                if rest.is_empty() {
                    Err("usage: mode <regex|plain>".to_string())
                } else {
                    rest.parse().map(Command::Mode)
                }
            }
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
pub fn execute_command(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit => s.quit = true,
        Command::Help => s.show_help = !s.show_help,
        Command::Hide(Some(name)) => s.hide(&name),
        Command::Hide(None) => s.hide_selected(),
        Command::Restore => s.restore_all(),
        Command::Mode(mode) => s.set_mode(mode),
        Command::Theme(name) => {
            s.theme = Theme::by_name(&name);
            s.show_selected();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
