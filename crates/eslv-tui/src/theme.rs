//! Colour theme for the eslv TUI.
//!
//! Themes are defined as TOML files. The built-in themes are embedded in the
//! binary via [`include_str!`] so the application works without any files on
//! disk. Each rendering [`Tone`] from the core maps to one theme style.

use config::{Config, File, FileFormat};
use eslv_core::Tone;
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;
use std::str::FromStr;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types: mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    underlined: bool,
    #[serde(default)]
    reversed: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        let flags = [
            (self.bold, Modifier::BOLD),
            (self.dim, Modifier::DIM),
            (self.italic, Modifier::ITALIC),
            (self.underlined, Modifier::UNDERLINED),
            (self.reversed, Modifier::REVERSED),
        ];
        for (on, modifier) in flags {
            if on {
                style = style.add_modifier(modifier);
            }
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawHeader {
    key: RawStyle,
    numeric: RawStyle,
    #[serde(default)]
    plain: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawSearch {
    context: RawStyle,
    emphasis: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    unfocused: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawList {
    selected: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawFilter {
    label: RawStyle,
    note: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTitle {
    text: RawStyle,
    dim: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    header: RawHeader,
    search: RawSearch,
    borders: RawBorders,
    list: RawList,
    filter: RawFilter,
    title: RawTitle,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme. All styles are pre-resolved ratatui [`Style`]
/// values.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub header_key: Style,
    pub numeric: Style,
    pub plain: Style,
    /// Unmatched text on a line that contains a search match.
    pub match_context: Style,
    /// The matched span itself.
    pub emphasis: Style,

    pub border_focused: Style,
    pub border_unfocused: Style,
    pub list_selected: Style,
    pub filter_label: Style,
    /// Filter diagnostics and completion hints.
    pub filter_note: Style,
    pub title: Style,
    pub title_dim: Style,
}

impl Theme {
    /// Load and parse the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// Load and parse the embedded Gruvbox Dark theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str(GRUVBOX_DARK_THEME_SRC)
            .expect("embedded gruvbox dark theme must be valid TOML")
    }

    /// Resolve a built-in theme by name, falling back to the default.
    pub fn by_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Self::load_gruvbox_dark(),
            _ => Self::load_default(),
        }
    }

    /// Parse a theme from a TOML string. Unknown keys are ignored.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            header_key: raw.header.key.into_style(),
            numeric: raw.header.numeric.into_style(),
            plain: raw.header.plain.into_style(),
            match_context: raw.search.context.into_style(),
            emphasis: raw.search.emphasis.into_style(),
            border_focused: raw.borders.focused.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            list_selected: raw.list.selected.into_style(),
            filter_label: raw.filter.label.into_style(),
            filter_note: raw.filter.note.into_style(),
            title: raw.title.text.into_style(),
            title_dim: raw.title.dim.into_style(),
        })
    }

    /// The style for a rendered segment.
    ///
    /// Emphasis is layered over the match context so the matched span keeps
    /// the line's colour.
    pub fn tone_style(&self, tone: Tone) -> Style {
        match tone {
            Tone::HeaderKey => self.header_key,
            Tone::Numeric => self.numeric,
            Tone::Plain => self.plain,
            Tone::MatchContext => self.match_context,
            Tone::Emphasis => self.match_context.patch(self.emphasis),
        }
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.border_focused
        } else {
            self.border_unfocused
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Colour names go through ratatui's own parser (`red`, `dark_gray`,
/// `#rrggbb`, a bare index); `indexed:N` is accepted as well.
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    match s.strip_prefix("indexed:") {
        Some(n) => n.parse().ok().map(Color::Indexed),
        None => Color::from_str(s).ok(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
