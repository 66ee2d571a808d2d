//! Event list widget: the scrollable list of visible event names on the left.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Move cursor up one row |
//! | `↓` / `j` | Move cursor down one row |
//! | `PageUp` / `Ctrl+u` | Move up one page |
//! | `PageDown` / `Ctrl+d` | Move down one page |
//! | `Home` / `g`, `End` / `G` | Jump to first / last event |
//!
//! `cursor` is a row into the view's visible list, not an index into the
//! event vector; [`EventView::selected`](eslv_core::EventView::selected)
//! does that mapping.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use eslv_core::Event;
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
pub struct EventListState {
    /// Row of the highlighted event.
    pub cursor: usize,
    /// First row shown at the top of the pane.
    pub offset: usize,
    /// Cached from the last render so `handle()` can page correctly.
    last_height: Cell<usize>,
}

impl Default for EventListState {
    fn default() -> Self {
        Self {
            cursor: 0,
            offset: 0,
            last_height: Cell::new(20),
        }
    }
}

impl EventListState {
    fn height(&self) -> usize {
        self.last_height.get().max(1)
    }

    /// Jump back to the first row (after the list was refilled).
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.offset = 0;
    }

    /// Move the cursor for a navigation event over `len` rows.
    ///
    /// Returns true when the cursor moved, so the caller can re-render the
    /// selected event.
    pub fn handle(&mut self, event: &AppEvent, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        let last = len - 1;
        let before = self.cursor;

        self.cursor = match event {
            AppEvent::Nav(Direction::Up) => self.cursor.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => (self.cursor + 1).min(last),
            AppEvent::PageUp => self.cursor.saturating_sub(self.height()),
            AppEvent::PageDown => (self.cursor + self.height()).min(last),
            AppEvent::Home => 0,
            AppEvent::End => last,
            _ => return false,
        };
        self.scroll_to_cursor();

        tracing::debug!(cursor = self.cursor, offset = self.offset, "list: cursor moved");
        self.cursor != before
    }

    fn scroll_to_cursor(&mut self) {
        let height = self.height();
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct EventList<'a> {
    state: &'a EventListState,
    events: &'a [Event],
    visible: &'a [usize],
    title: String,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> EventList<'a> {
    pub fn new(
        state: &'a EventListState,
        events: &'a [Event],
        visible: &'a [usize],
        title: String,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { state, events, visible, title, focused, theme }
    }
}

impl Widget for EventList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(self.title.as_str())
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let height = inner.height as usize;
        self.state.last_height.set(height);

        let total = self.visible.len();
        let start = self.state.offset.min(total);
        let end = (start + height).min(total);

        let lines: Vec<Line> = self.visible[start..end]
            .iter()
            .enumerate()
            .map(|(i, &index)| {
                let line = Line::from(self.events[index].name.as_str());
                if start + i == self.state.cursor {
                    line.style(self.theme.list_selected)
                } else {
                    line
                }
            })
            .collect();

        let text_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let sb_area = Rect {
            x: inner.right().saturating_sub(1),
            width: 1,
            ..inner
        };

        Paragraph::new(lines).render(text_area, buf);

        if total > height {
            let mut sb_state = ScrollbarState::new(total)
                .position(start)
                .viewport_content_length(height);
            StatefulWidget::render(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(None)
                    .end_symbol(None),
                sb_area,
                buf,
                &mut sb_state,
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
