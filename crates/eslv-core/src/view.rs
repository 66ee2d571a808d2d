//! EventView: which events are visible in the list, and why.
//!
//! The view owns the mutable half of the viewer state: the active matcher,
//! the last filter diagnostic and the set of hidden event names. Events
//! themselves stay in the immutable [`EventIndex`](crate::EventIndex); the
//! view only keeps indices into that slice, in parse order.

use crate::error::{FilterSyntaxError, LookupError};
use crate::search::{MatchMode, Matcher, SearchOptions};
use crate::types::Event;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default)]
pub struct EventView {
    mode: MatchMode,
    options: SearchOptions,
    text: String,
    matcher: Matcher,
    diagnostic: Option<FilterSyntaxError>,
    hidden: BTreeSet<String>,
    visible: Vec<usize>,
}

impl EventView {
    pub fn new(mode: MatchMode, options: SearchOptions) -> Self {
        Self {
            mode,
            options,
            ..Self::default()
        }
    }

    /// Replace the filter text and recompile the matcher.
    ///
    /// An invalid pattern leaves the view unfiltered and returns the
    /// diagnostic, which stays available via [`diagnostic`](Self::diagnostic)
    /// until the next successful compile.
    pub fn set_filter(&mut self, text: &str) -> Option<&FilterSyntaxError> {
        self.text = text.to_string();
        self.recompile();
        self.diagnostic.as_ref()
    }

    /// Switch between plain and regex search, keeping the current text.
    pub fn set_mode(&mut self, mode: MatchMode) -> Option<&FilterSyntaxError> {
        self.mode = mode;
        self.recompile();
        self.diagnostic.as_ref()
    }

    fn recompile(&mut self) {
        let (matcher, diagnostic) = Matcher::compile_or_all(self.mode, &self.text, &self.options);
        tracing::debug!(
            mode = %self.mode,
            filter = %self.text,
            active = matcher.is_active(),
            "filter updated"
        );
        self.matcher = matcher;
        self.diagnostic = diagnostic;
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn filter_text(&self) -> &str {
        &self.text
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn diagnostic(&self) -> Option<&FilterSyntaxError> {
        self.diagnostic.as_ref()
    }

    /// Hide every event with this name. Blank names are ignored.
    pub fn hide(&mut self, name: &str) {
        let name = name.trim();
        if !name.is_empty() {
            tracing::debug!(name, "hiding event name");
            self.hidden.insert(name.to_string());
        }
    }

    pub fn hide_all<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.hide(name.as_ref());
        }
    }

    pub fn restore_all(&mut self) {
        self.hidden.clear();
    }

    pub fn hidden(&self) -> impl Iterator<Item = &str> {
        self.hidden.iter().map(String::as_str)
    }

    pub fn is_hidden(&self, event: &Event) -> bool {
        self.hidden.contains(&event.name)
    }

    /// Rescan `events` and rebuild the visible index list.
    pub fn refresh(&mut self, events: &[Event]) {
        self.visible = events
            .iter()
            .enumerate()
            .filter(|(_, event)| !self.is_hidden(event) && self.matcher.matches(event))
            .map(|(index, _)| index)
            .collect();
        tracing::debug!(visible = self.visible.len(), total = events.len(), "view refreshed");
    }

    /// Indices into the event slice, in display order.
    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    /// The event shown at list `row`.
    pub fn selected<'e>(&self, events: &'e [Event], row: usize) -> Result<&'e Event, LookupError> {
        let err = LookupError {
            row,
            visible: self.visible.len(),
        };
        let index = *self.visible.get(row).ok_or(err)?;
        events.get(index).ok_or(err)
    }

    /// List title: `Total: N`, or `Filtered: n/N` when anything is filtered out.
    pub fn title(&self, total: usize) -> String {
        let shown = self.visible.len();
        if shown < total {
            format!("Filtered: {shown}/{total}")
        } else {
            format!("Total: {shown}")
        }
    }
}

/// Detail pane title: `NAME #seq [time]`.
pub fn detail_title(event: &Event, time_format: &str) -> String {
    format!(
        "{} #{} [{}]",
        event.name,
        event.sequence,
        event.timestamp.format(time_format)
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
