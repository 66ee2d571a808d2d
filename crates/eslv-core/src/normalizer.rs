//! Normalizer: turns one raw [`Record`] into an [`Event`].
//!
//! Malformed numeric fields never fail a record: they silently fall back to
//! zero values. The header block is rebuilt in sorted key order so the same
//! record always serialises to the same bytes.

use crate::policy::HeaderPolicy;
use crate::types::{Event, Record, BODY_KEY, EVENT_NAME, EVENT_SEQUENCE, EVENT_SUBCLASS, EVENT_TIMESTAMP};
use chrono::{DateTime, Utc};

/// Builds [`Event`]s under a fixed [`HeaderPolicy`].
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    policy: &'a HeaderPolicy,
}

impl<'a> Normalizer<'a> {
    pub fn new(policy: &'a HeaderPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &'a HeaderPolicy {
        self.policy
    }

    /// Normalise a record. Pure; never fails.
    pub fn normalize(&self, record: &Record) -> Event {
        let name = record
            .get(EVENT_SUBCLASS)
            .filter(|subclass| !subclass.is_empty())
            .or_else(|| record.get(EVENT_NAME))
            .cloned()
            .unwrap_or_default();

        let sequence = record
            .get(EVENT_SEQUENCE)
            .and_then(|raw| raw.parse::<i64>().ok())
            .unwrap_or(0);

        let timestamp = record
            .get(EVENT_TIMESTAMP)
            .and_then(|raw| raw.parse::<i64>().ok())
            .and_then(DateTime::<Utc>::from_timestamp_micros)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        let body = record.get(BODY_KEY).cloned().unwrap_or_default();

        Event {
            name,
            sequence,
            timestamp,
            header: self.header_block(record),
            body,
        }
    }

    /// True when `key` belongs in the header block.
    pub fn is_header(&self, key: &str) -> bool {
        key != BODY_KEY && !self.policy.is_suppressed(key)
    }

    fn header_block(&self, record: &Record) -> String {
        let mut keys: Vec<&String> = record.keys().filter(|key| self.is_header(key)).collect();
        keys.sort_unstable();

        let mut block = String::new();
        for key in keys {
            block.push_str(key);
            block.push_str(": ");
            push_continued(&mut block, record[key.as_str()].trim());
            block.push('\n');
        }
        block
    }
}

/// Append `value`, indenting every continuation line with a tab.
fn push_continued(out: &mut String, value: &str) {
    let mut lines = value.split('\n');
    if let Some(first) = lines.next() {
        out.push_str(first);
    }
    for line in lines {
        out.push_str("\n\t");
        out.push_str(line);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
