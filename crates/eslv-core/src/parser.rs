//! Parser: reads the whole event log into an [`EventIndex`].
//!
//! The input is a stream of independent JSON objects (one per line in
//! practice, but any whitespace between objects is accepted). Parsing is
//! all-or-nothing: the first malformed record aborts the run and nothing
//! parsed so far is returned. Invalid UTF-8 is replaced with U+FFFD and
//! `null` values decode as empty strings; neither is treated as malformed.

use crate::error::ParseError;
use crate::normalizer::Normalizer;
use crate::policy::HeaderPolicy;
use crate::types::{Event, Record};
use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};
use std::ops::Bound;
use std::path::Path;

/// Path that selects standard input instead of a file.
pub const STDIN_PATH: &str = "-";

/// Wire shape of one record before `null` values are flattened.
type RawRecord = HashMap<String, Option<String>>;

// ---------------------------------------------------------------------------
// HeaderKeys
// ---------------------------------------------------------------------------

/// Every distinct displayable header key seen during one parse run, sorted.
///
/// Only used to offer completions in the filter input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderKeys(BTreeSet<String>);

impl HeaderKeys {
    pub fn insert(&mut self, key: &str) {
        if !self.0.contains(key) {
            self.0.insert(key.to_string());
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Completion candidates (`"Key: "`) whose key starts with `prefix`.
    pub fn complete<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = String> + 'a {
        self.0
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |key| key.starts_with(prefix))
            .map(|key| format!("{key}: "))
    }
}

// ---------------------------------------------------------------------------
// EventIndex
// ---------------------------------------------------------------------------

/// All events of one log, in decode order, plus the observed header keys.
#[derive(Debug, Clone, Default)]
pub struct EventIndex {
    events: Vec<Event>,
    header_keys: HeaderKeys,
}

impl EventIndex {
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, index: usize) -> Option<&Event> {
        self.events.get(index)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn header_keys(&self) -> &HeaderKeys {
        &self.header_keys
    }

    pub fn into_parts(self) -> (Vec<Event>, HeaderKeys) {
        (self.events, self.header_keys)
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// One parse run under a fixed [`HeaderPolicy`].
#[derive(Debug, Clone, Copy)]
pub struct Parser<'a> {
    normalizer: Normalizer<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(policy: &'a HeaderPolicy) -> Self {
        Self {
            normalizer: Normalizer::new(policy),
        }
    }

    /// Parse a log file, or standard input when `path` is `-`.
    ///
    /// Files are scanned twice: once to count lines so the event vector can
    /// be allocated up front, then again to decode.
    pub fn parse_path(&self, path: impl AsRef<Path>) -> Result<EventIndex, ParseError> {
        let path = path.as_ref();
        let label = path.display().to_string();

        if path.as_os_str() == STDIN_PATH {
            return self.parse_reader(io::stdin().lock(), 0, &label);
        }

        let io_err = |source| ParseError::Io {
            path: label.clone(),
            source,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let lines = count_lines(&mut file).map_err(io_err)?;
        file.seek(SeekFrom::Start(0)).map_err(io_err)?;
        tracing::debug!(path = %label, lines, "counted event log lines");

        self.parse_reader(file, lines, &label)
    }

    /// Decode every record from `reader`. `capacity` only pre-sizes storage.
    pub fn parse_reader<R: Read>(
        &self,
        reader: R,
        capacity: usize,
        label: &str,
    ) -> Result<EventIndex, ParseError> {
        let mut index = EventIndex {
            events: Vec::with_capacity(capacity),
            header_keys: HeaderKeys::default(),
        };

        let mut bytes = Vec::new();
        BufReader::new(reader)
            .read_to_end(&mut bytes)
            .map_err(|source| ParseError::Io {
                path: label.to_string(),
                source,
            })?;

        let text = String::from_utf8_lossy(&bytes);
        if matches!(text, Cow::Owned(_)) {
            tracing::warn!(path = %label, "event log contains invalid UTF-8, replaced lossily");
        }

        let stream = serde_json::Deserializer::from_str(&text).into_iter::<RawRecord>();

        for raw in stream {
            let raw = raw.map_err(|source| ParseError::Format {
                path: label.to_string(),
                source,
            })?;
            let record: Record = raw
                .into_iter()
                .map(|(key, value)| (key, value.unwrap_or_default()))
                .collect();

            index.events.push(self.normalizer.normalize(&record));
            for key in record.keys().filter(|key| self.normalizer.is_header(key)) {
                index.header_keys.insert(key);
            }
        }

        tracing::info!(
            path = %label,
            events = index.events.len(),
            header_keys = index.header_keys.len(),
            "event log parsed"
        );
        Ok(index)
    }
}

/// Count `\n`-terminated lines (plus a trailing unterminated one).
fn count_lines<R: Read>(reader: R) -> io::Result<usize> {
    let mut reader = BufReader::new(reader);
    let mut count = 0;
    let mut tail = false;
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            break;
        }
        count += buf.iter().filter(|&&b| b == b'\n').count();
        tail = buf.last() != Some(&b'\n');
        let len = buf.len();
        reader.consume(len);
    }
    Ok(count + usize::from(tail))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
