//! eslv: ESL Events Viewer
//!
//! Browse, filter and inspect FreeSWITCH event-socket logs (one JSON object
//! per event) in the terminal. The binary is a thin shell over two crates:
//!
//! ```text
//! eslv-core ── parse ──► EventIndex ──► EventView ──► render ──► Markup
//!                                           │
//! eslv-tui  ◄───────────────────────────────┘  (ratatui shell)
//! ```
//!
//! This crate adds the command line ([`cli`]) and the non-interactive
//! output mode ([`headless`]) so integration tests can drive them directly.

pub mod cli;
pub mod headless;
