//! Title bar and key-hint strip framing the screen.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Widget,
};

const TITLE: &str = "ESL Events Viewer";

const HINTS: &[(&str, &str)] = &[
    ("^C", "exit"),
    ("^H", "hide event"),
    ("^R", "restore all"),
    ("^F", "search"),
    ("?", "help"),
];

/// Top row: centred application name with the version at the right edge.
pub struct TitleBar<'a> {
    version: &'a str,
    theme: &'a Theme,
}

impl<'a> TitleBar<'a> {
    pub fn new(version: &'a str, theme: &'a Theme) -> Self {
        Self { version, theme }
    }
}

impl Widget for TitleBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(vec![
            Span::styled("-= ", self.theme.title_dim),
            Span::styled(TITLE, self.theme.title.add_modifier(Modifier::BOLD)),
            Span::styled(" =-", self.theme.title_dim),
        ])
        .centered();
        line.render(area, buf);

        if !self.version.is_empty() {
            let version = format!("v{} ", self.version);
            let x = area.right().saturating_sub(version.len() as u16);
            buf.set_string(x, area.y, version, self.theme.title_dim);
        }
    }
}

/// Bottom row: the main key bindings.
pub struct KeyHints<'a> {
    theme: &'a Theme,
}

impl<'a> KeyHints<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for KeyHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::with_capacity(HINTS.len() * 3);
        for (i, (key, action)) in HINTS.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", self.theme.title_dim));
            }
            spans.push(Span::styled(*key, self.theme.title.add_modifier(Modifier::REVERSED)));
            spans.push(Span::styled(format!(" {action}"), self.theme.title));
        }
        Line::from(spans).centered().render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect()
    }

    #[test]
    fn title_shows_name_and_version() {
        let theme = Theme::load_default();
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        TitleBar::new("0.1.0", &theme).render(area, &mut buf);
        let text = row(&buf);
        assert!(text.contains("-= ESL Events Viewer =-"));
        assert!(text.trim_end().ends_with("v0.1.0"));
    }

    #[test]
    fn hints_list_bindings() {
        let theme = Theme::load_default();
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        KeyHints::new(&theme).render(area, &mut buf);
        let text = row(&buf);
        assert!(text.contains("^C exit | ^H hide event"));
    }
}
