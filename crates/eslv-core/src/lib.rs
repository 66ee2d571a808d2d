//! eslv-core: ESL events viewer core library.
//!
//! Everything with real behaviour lives here; the TUI and the binary only
//! call into these modules with a filter string and a selected row.
//!
//! # Architecture
//!
//! ```text
//! JSON records ──► Parser ──► Normalizer ──► EventIndex
//!                                               │
//!                     filter text ──► Matcher ──┤
//!                                               ▼
//!                                   EventView ──► render ──► Markup sink
//! ```
//!
//! The whole pipeline is synchronous: one parse pass at startup, then one
//! linear rescan of the index per filter change.

pub mod config;
pub mod error;
pub mod normalizer;
pub mod parser;
pub mod policy;
pub mod render;
pub mod search;
pub mod types;
pub mod view;

pub use error::{FilterSyntaxError, LookupError, ParseError, RenderError};
pub use normalizer::Normalizer;
pub use parser::{EventIndex, HeaderKeys, Parser};
pub use policy::HeaderPolicy;
pub use render::{render, AnsiMarkup, Markup, PlainMarkup, Tone};
pub use search::{MatchMode, Matcher, SearchOptions};
pub use types::{Event, Record};
pub use view::EventView;
