//! Help popup: centred floating overlay listing all keybindings.
//!
//! Toggle with `?` or `:help`; close with `?` or `Escape`.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

const BINDINGS: &[(&str, &str)] = &[
    ("q  /  Ctrl+c", "Quit and print relaunch params"),
    ("Tab", "Cycle focus: list → detail → filter"),
    ("/  /  Ctrl+f", "Focus the filter bar"),
    ("Enter / Escape", "Apply filter and return to the list"),
    ("Tab (in filter)", "Complete a header key"),
    ("Escape (in list)", "Clear the filter"),
    ("x  /  Ctrl+h", "Hide events with the selected name"),
    ("Ctrl+r / Ctrl+a", "Restore all hidden events"),
    ("↑ k  /  ↓ j", "Select event or scroll detail"),
    ("PageUp / Ctrl+u", "Page up"),
    ("PageDown / Ctrl+d", "Page down"),
    ("g / G", "First / last"),
    (":", "Command line (q, hide, restore, mode, theme)"),
    ("?", "Toggle this help popup"),
];

pub struct HelpPopup<'a> {
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(72, BINDINGS.len() as u16 + 2, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" eslv keybindings (? to close) ")
            .border_style(self.theme.border_focused.add_modifier(Modifier::BOLD));

        let inner = block.inner(popup);
        block.render(popup, buf);

        let lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(
                        format!("  {:<20}", key),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
