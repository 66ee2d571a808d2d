//! Filter bar widget: the `Find:` input at the bottom of the screen.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` deletes the character before the cursor.
//! - `Nav(Left)` / `Nav(Right)` move the cursor.
//! - `FocusNext` (Tab) completes the header key being typed.
//!
//! The text is only applied to the event list when the app shell sees
//! `Enter` or `Escape`; typing alone never rescans.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use eslv_core::{FilterSyntaxError, HeaderKeys, MatchMode};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

const LABEL: &str = "Find: ";
const PLACEHOLDER: &str = "regexp search filter...";
const PLACEHOLDER_PLAIN: &str = "text search filter...";
/// Completion candidates listed in the note before the rest is summarised.
const HINT_LIMIT: usize = 4;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct FilterBarState {
    /// The filter text typed by the user.
    pub input: String,
    /// Byte offset of the cursor within `input`.
    pub cursor: usize,
    /// Completion candidates from the last Tab, cleared on the next edit.
    pub hint: Option<String>,
}

impl FilterBarState {
    pub fn with_text(text: &str) -> Self {
        Self {
            input: text.to_string(),
            cursor: text.len(),
            hint: None,
        }
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
        self.hint = None;
    }

    /// Handle a text-editing event from the app shell.
    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Char(c) => {
                self.hint = None;
                self.input.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                tracing::debug!(input = %self.input, cursor = self.cursor, "filter: char inserted");
            }
            AppEvent::Backspace => {
                self.hint = None;
                if self.cursor > 0 {
                    let prev = self.prev_boundary();
                    self.input.remove(prev);
                    self.cursor = prev;
                    tracing::debug!(input = %self.input, cursor = self.cursor, "filter: backspace");
                }
            }
            AppEvent::Nav(Direction::Left) => self.cursor = self.prev_boundary(),
            AppEvent::Nav(Direction::Right) => {
                if self.cursor < self.input.len() {
                    self.cursor = self.input[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor + i)
                        .unwrap_or(self.input.len());
                }
            }
            _ => {}
        }
    }

    fn prev_boundary(&self) -> usize {
        self.input[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    /// Byte offset where the header-key word under the cursor starts.
    fn word_start(&self) -> usize {
        self.input[..self.cursor]
            .char_indices()
            .rev()
            .find(|(_, c)| !is_key_char(*c))
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0)
    }

    /// Complete the header key before the cursor.
    ///
    /// A single candidate is inserted whole (`"Key: "`); several candidates
    /// extend the word to their longest common prefix and are listed in
    /// [`hint`](Self::hint).
    pub fn complete(&mut self, keys: &HeaderKeys) {
        let start = self.word_start();
        let word = &self.input[start..self.cursor];
        if word.is_empty() {
            self.hint = None;
            return;
        }

        let candidates: Vec<String> = keys.complete(word).collect();
        tracing::debug!(word, candidates = candidates.len(), "filter: completion");

        let replacement = match candidates.as_slice() {
            [] => {
                self.hint = Some(format!("no header key starts with {word}"));
                return;
            }
            [only] => {
                self.hint = None;
                only.clone()
            }
            many => {
                self.hint = Some(summarise(many));
                common_prefix(many).to_string()
            }
        };

        if replacement.len() > word.len() {
            self.input.replace_range(start..self.cursor, &replacement);
            self.cursor = start + replacement.len();
        }
    }
}

fn is_key_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn common_prefix(candidates: &[String]) -> &str {
    let first = candidates[0].as_str();
    let len = candidates[1..].iter().fold(first.len(), |len, other| {
        first[..len]
            .char_indices()
            .zip(other.chars())
            .find(|((_, a), b)| a != b)
            .map(|((i, _), _)| i)
            .unwrap_or(len.min(other.len()))
    });
    &first[..len]
}

fn summarise(candidates: &[String]) -> String {
    let shown: Vec<&str> = candidates
        .iter()
        .take(HINT_LIMIT)
        .map(|c| c.trim_end_matches(": "))
        .collect();
    let rest = candidates.len().saturating_sub(HINT_LIMIT);
    if rest > 0 {
        format!("{} (+{rest})", shown.join(" "))
    } else {
        shown.join(" ")
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct FilterBar<'a> {
    state: &'a FilterBarState,
    mode: MatchMode,
    diagnostic: Option<&'a FilterSyntaxError>,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> FilterBar<'a> {
    pub fn new(
        state: &'a FilterBarState,
        mode: MatchMode,
        diagnostic: Option<&'a FilterSyntaxError>,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { state, mode, diagnostic, focused, theme }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let col = (LABEL.len() + self.state.input[..self.state.cursor].chars().count()) as u16;
        let x = (area.x + 1 + col).min(area.right().saturating_sub(2));
        (x, area.y + 1)
    }

    fn note(&self) -> Option<&str> {
        self.state
            .hint
            .as_deref()
            .or(self.diagnostic.map(|d| d.message.as_str()))
    }
}

impl Widget for FilterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(format!("Filter [{}]", self.mode))
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let note = self.note();
        let note_width = note.map_or(0, |n| n.chars().count() as u16 + 1);
        let chunks = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(note_width)])
            .split(inner);

        let mut spans = vec![Span::styled(LABEL, self.theme.filter_label)];
        if self.state.input.is_empty() && !self.focused {
            let placeholder = match self.mode {
                MatchMode::Regex => PLACEHOLDER,
                MatchMode::Plain => PLACEHOLDER_PLAIN,
            };
            spans.push(Span::styled(
                placeholder,
                Style::default().add_modifier(Modifier::DIM),
            ));
        } else {
            spans.push(Span::raw(self.state.input.as_str()));
        }
        Paragraph::new(Line::from(spans)).render(chunks[0], buf);

        if let Some(note) = note {
            Paragraph::new(Line::from(Span::styled(note, self.theme.filter_note)))
                .right_aligned()
                .render(chunks[1], buf);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
