//! Ratatui widgets for the eslv TUI.

pub mod command_bar;
pub mod event_detail;
pub mod event_list;
pub mod filter_bar;
pub mod help;
pub mod title_bar;
