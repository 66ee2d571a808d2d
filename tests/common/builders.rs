//! Test builders: ergonomic constructors for raw records, events and views.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use chrono::{DateTime, Utc};
use eslv_core::{Event, EventView, HeaderPolicy, MatchMode, Normalizer, Record, SearchOptions};

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for raw ESL [`Record`]s, as they appear in the JSON log.
///
/// # Example
///
/// ```rust
/// let line = RecordBuilder::event("CHANNEL_CREATE")
///     .sequence(42)
///     .header("Channel-State", "CS_INIT")
///     .json();
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event(name: &str) -> Self {
        Self::new().header("Event-Name", name)
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.record.insert(key.into(), value.into());
        self
    }

    pub fn sequence(self, sequence: i64) -> Self {
        self.header("Event-Sequence", sequence.to_string())
    }

    pub fn timestamp_micros(self, micros: i64) -> Self {
        self.header("Event-Date-Timestamp", micros.to_string())
    }

    pub fn body(self, body: impl Into<String>) -> Self {
        self.header("_body", body)
    }

    pub fn build(self) -> Record {
        self.record
    }

    /// One line of the event log.
    pub fn json(&self) -> String {
        serde_json::to_string(&self.record).expect("records always serialise")
    }

    /// Normalise under the default suppression policy.
    pub fn normalize(&self) -> Event {
        Normalizer::new(&HeaderPolicy::default()).normalize(&self.record)
    }
}

// ---------------------------------------------------------------------------
// EventBuilder
// ---------------------------------------------------------------------------

/// Builds an [`Event`] directly, bypassing the normalizer. Header lines are
/// joined verbatim, so tests can construct blocks the normalizer never would.
#[derive(Debug, Clone)]
pub struct EventBuilder {
    event: Event,
}

impl EventBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            event: Event {
                name: name.to_string(),
                sequence: 0,
                timestamp: DateTime::<Utc>::UNIX_EPOCH,
                header: String::new(),
                body: String::new(),
            },
        }
    }

    pub fn sequence(mut self, sequence: i64) -> Self {
        self.event.sequence = sequence;
        self
    }

    pub fn line(mut self, line: &str) -> Self {
        self.event.header.push_str(line);
        self.event.header.push('\n');
        self
    }

    pub fn body(mut self, body: &str) -> Self {
        self.event.body = body.to_string();
        self
    }

    pub fn build(self) -> Event {
        self.event
    }
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// A refreshed view over `events` with `filter` applied in `mode`.
pub fn view_with(events: &[Event], mode: MatchMode, filter: &str) -> EventView {
    let mut view = EventView::new(mode, SearchOptions::default());
    view.set_filter(filter);
    view.refresh(events);
    view
}
