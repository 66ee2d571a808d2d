//! Header suppression policy.
//!
//! A fixed set of internal/transport headers that are hidden from the
//! header block and from completion suggestions. The policy is built once
//! before parsing and passed by reference to the parser and normalizer.

use std::collections::BTreeSet;

/// Reserved header that is always recomputed from the body at render time.
pub const CONTENT_LENGTH: &str = "Content-Length";

/// Headers hidden unless the user asks for all of them.
pub const DEFAULT_SUPPRESSED: &[&str] = &[
    "Core-UUID",
    "Event-Calling-File",
    "Event-Calling-Function",
    "Event-Calling-Line-Number",
    "Event-Date-GMT",
    "Event-Date-Timestamp",
    "FreeSWITCH-Hostname",
    "FreeSWITCH-IPv4",
    "FreeSWITCH-IPv6",
    "FreeSWITCH-Switchname",
    "FreeSWITCH-Version",
];

/// Which header keys are suppressed from display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderPolicy {
    suppressed: BTreeSet<String>,
}

impl Default for HeaderPolicy {
    fn default() -> Self {
        Self::from_keys(DEFAULT_SUPPRESSED.iter().copied())
    }
}

impl HeaderPolicy {
    /// Build a policy from an explicit key list (e.g. the `[headers]` config).
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            suppressed: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// "Show all headers" mode: nothing is suppressed except `Content-Length`.
    pub fn show_all() -> Self {
        Self {
            suppressed: BTreeSet::new(),
        }
    }

    /// Clear the suppression set when `show_all` is true, otherwise keep it.
    pub fn with_show_all(self, show_all: bool) -> Self {
        if show_all {
            Self::show_all()
        } else {
            self
        }
    }

    /// True when the header must not appear in the header block.
    ///
    /// `Content-Length` is always excluded, regardless of the set.
    pub fn is_suppressed(&self, key: &str) -> bool {
        key == CONTENT_LENGTH || self.suppressed.contains(key)
    }

    /// True when the suppression set is empty.
    pub fn shows_all(&self) -> bool {
        self.suppressed.is_empty()
    }

    pub fn suppressed(&self) -> impl Iterator<Item = &str> {
        self.suppressed.iter().map(String::as_str)
    }
}
