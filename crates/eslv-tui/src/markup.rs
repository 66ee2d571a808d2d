//! Ratatui sink for the core renderer.
//!
//! [`SpanMarkup`] turns rendered segments into styled [`Line`]s for the
//! detail pane. Body text may carry its own newlines and tabs; those are
//! split into lines and expanded here, since ratatui draws neither.

use crate::theme::Theme;
use eslv_core::{Markup, Tone};
use ratatui::text::{Line, Span};
use std::io;

const TAB: &str = "    ";

pub struct SpanMarkup<'t> {
    theme: &'t Theme,
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
}

impl<'t> SpanMarkup<'t> {
    pub fn new(theme: &'t Theme) -> Self {
        Self {
            theme,
            lines: Vec::new(),
            current: Vec::new(),
        }
    }

    pub fn into_lines(mut self) -> Vec<Line<'static>> {
        self.flush_line();
        self.lines
    }

    fn flush_line(&mut self) {
        if !self.current.is_empty() {
            self.lines.push(Line::from(std::mem::take(&mut self.current)));
        }
    }

    fn push(&mut self, tone: Tone, text: &str) {
        if text.is_empty() {
            return;
        }
        let text = text.strip_suffix('\r').unwrap_or(text).replace('\t', TAB);
        self.current
            .push(Span::styled(text, self.theme.tone_style(tone)));
    }
}

impl Markup for SpanMarkup<'_> {
    fn segment(&mut self, tone: Tone, text: &str) -> io::Result<()> {
        let mut parts = text.split('\n');
        if let Some(first) = parts.next() {
            self.push(tone, first);
        }
        for part in parts {
            self.newline()?;
            self.push(tone, part);
        }
        Ok(())
    }

    fn reset(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn newline(&mut self) -> io::Result<()> {
        self.lines.push(Line::from(std::mem::take(&mut self.current)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use eslv_core::{render, Event, Matcher};
    use pretty_assertions::assert_eq;

    fn text(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn body_newlines_become_lines() {
        let theme = Theme::load_default();
        let event = Event {
            name: "BACKGROUND_JOB".to_string(),
            sequence: 1,
            timestamp: DateTime::<Utc>::UNIX_EPOCH,
            header: "Job-UUID: abc\n\tnext\n".to_string(),
            body: "+OK\nsecond\n".to_string(),
        };
        let mut out = SpanMarkup::new(&theme);
        render(&event, &Matcher::All, &mut out).unwrap();
        assert_eq!(
            text(&out.into_lines()),
            ["Job-UUID: abc", "    next", "Content-Length: 11", "+OK", "second"]
        );
    }

    #[test]
    fn tones_map_to_theme_styles() {
        let theme = Theme::load_default();
        let mut out = SpanMarkup::new(&theme);
        out.segment(Tone::HeaderKey, "Key").unwrap();
        out.segment(Tone::Numeric, "1").unwrap();
        let lines = out.into_lines();
        assert_eq!(lines[0].spans[0].style, theme.header_key);
        assert_eq!(lines[0].spans[1].style, theme.numeric);
    }
}
