//! Error taxonomy for the core.
//!
//! Only [`ParseError`] is fatal to the program. Everything else degrades
//! gracefully and is handed back to the shell to display.

use thiserror::Error;

/// Failure to load the event log. Aborts startup; no partial index is kept.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input could not be opened or read.
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// A record is not a JSON object of string (or `null`) values.
    #[error("{path}: malformed event record: {source}")]
    Format {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// An invalid regular expression typed into the filter.
///
/// `message` is the short form of the syntax error, suitable for a one-line
/// note next to the filter input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid filter `{pattern}`: {message}")]
pub struct FilterSyntaxError {
    pub pattern: String,
    pub message: String,
}

/// The render destination refused a write.
#[derive(Debug, Error)]
#[error("failed to write rendered event")]
pub struct RenderError(#[from] pub std::io::Error);

/// A list row that does not map to a visible event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("row {row} is out of range ({visible} visible events)")]
pub struct LookupError {
    pub row: usize,
    pub visible: usize,
}
