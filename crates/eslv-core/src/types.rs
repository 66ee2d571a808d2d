//! Core types for eslv-core.
//!
//! This module defines the normalised [`Event`] and the raw [`Record`] it is
//! built from, plus the well-known ESL header names the normalizer reads.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// One decoded JSON object from the event log: header name → string value.
pub type Record = HashMap<String, String>;

/// Primary event class name.
pub const EVENT_NAME: &str = "Event-Name";
/// Subclass of `CUSTOM` events; overrides [`EVENT_NAME`] when non-empty.
pub const EVENT_SUBCLASS: &str = "Event-Subclass";
/// Monotonic ordinal assigned by the switch.
pub const EVENT_SEQUENCE: &str = "Event-Sequence";
/// Microseconds since the Unix epoch.
pub const EVENT_TIMESTAMP: &str = "Event-Date-Timestamp";
/// Reserved key carrying the event body in the JSON log.
pub const BODY_KEY: &str = "_body";

/// A normalised ESL event. Built once by the
/// [`Normalizer`](crate::Normalizer) and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Event class name (the subclass for `CUSTOM` events).
    pub name: String,
    /// Source sequence number, `0` when absent or unparsable.
    pub sequence: i64,
    /// Creation time, the Unix epoch when absent or unparsable.
    pub timestamp: DateTime<Utc>,
    /// Canonical header block: one `Key: value\n` line per header, keys in
    /// ascending byte order, multi-line values continued with `\n\t`.
    pub header: String,
    /// Raw body payload, empty when the record has none.
    pub body: String,
}

impl Event {
    /// Iterate the header block line by line, without the trailing `\n`.
    pub fn header_lines(&self) -> impl Iterator<Item = &str> {
        self.header.split_terminator('\n')
    }

    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }
}
