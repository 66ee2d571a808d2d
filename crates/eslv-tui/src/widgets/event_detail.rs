//! Detail pane: the rendered header and body of the selected event.
//!
//! The lines are produced once per selection by the core renderer through
//! [`SpanMarkup`](crate::markup::SpanMarkup) and cached here, so scrolling
//! never re-runs the matcher.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct EventDetailState {
    /// Pane title, empty when nothing is selected.
    pub title: String,
    pub lines: Vec<Line<'static>>,
    /// First line shown at the top of the pane.
    pub scroll: usize,
    last_height: Cell<usize>,
}

impl Default for EventDetailState {
    fn default() -> Self {
        Self {
            title: String::new(),
            lines: Vec::new(),
            scroll: 0,
            last_height: Cell::new(20),
        }
    }
}

impl EventDetailState {
    /// Show freshly rendered content, scrolled to the top.
    pub fn show(&mut self, title: String, lines: Vec<Line<'static>>) {
        self.title = title;
        self.lines = lines;
        self.scroll = 0;
    }

    pub fn clear(&mut self) {
        self.show(String::new(), Vec::new());
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.last_height.get().max(1))
    }

    pub fn handle(&mut self, event: &AppEvent) {
        let page = self.last_height.get().max(1);
        let max = self.max_scroll();
        self.scroll = match event {
            AppEvent::Nav(Direction::Up) => self.scroll.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => (self.scroll + 1).min(max),
            AppEvent::PageUp => self.scroll.saturating_sub(page),
            AppEvent::PageDown => (self.scroll + page).min(max),
            AppEvent::Home => 0,
            AppEvent::End => max,
            _ => return,
        };
        tracing::debug!(scroll = self.scroll, "detail: scrolled");
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct EventDetail<'a> {
    state: &'a EventDetailState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> EventDetail<'a> {
    pub fn new(state: &'a EventDetailState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }
}

impl Widget for EventDetail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(self.state.title.as_str())
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let height = inner.height as usize;
        self.state.last_height.set(height);

        let total = self.state.lines.len();
        let start = self.state.scroll.min(total);
        let end = (start + height).min(total);

        Paragraph::new(self.state.lines[start..end].to_vec()).render(inner, buf);

        if total > height {
            let mut sb_state = ScrollbarState::new(total)
                .position(start)
                .viewport_content_length(height);
            StatefulWidget::render(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(None)
                    .end_symbol(None),
                area.inner(ratatui::layout::Margin { vertical: 1, horizontal: 0 }),
                buf,
                &mut sb_state,
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(lines: usize, height: usize) -> EventDetailState {
        let mut state = EventDetailState::default();
        state.show(
            "HEARTBEAT #1 [00:00:00]".to_string(),
            (0..lines).map(|i| Line::from(format!("line {i}"))).collect(),
        );
        state.last_height.set(height);
        state
    }

    #[test]
    fn scroll_stops_at_last_page() {
        let mut s = state_with(30, 10);
        s.handle(&AppEvent::End);
        assert_eq!(s.scroll, 20);
        s.handle(&AppEvent::Nav(Direction::Down));
        assert_eq!(s.scroll, 20);
        s.handle(&AppEvent::PageUp);
        assert_eq!(s.scroll, 10);
    }

    #[test]
    fn short_content_does_not_scroll() {
        let mut s = state_with(3, 10);
        s.handle(&AppEvent::PageDown);
        assert_eq!(s.scroll, 0);
    }

    #[test]
    fn show_resets_scroll() {
        let mut s = state_with(30, 10);
        s.handle(&AppEvent::End);
        s.show(String::new(), Vec::new());
        assert_eq!(s.scroll, 0);
        assert!(s.lines.is_empty());
    }
}
