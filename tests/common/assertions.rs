//! Domain-specific assertion macros for eslv harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that say which
//! eslv invariant was violated.

// ---------------------------------------------------------------------------
// Header block assertions
// ---------------------------------------------------------------------------

/// Assert that an event's header block lists its keys in ascending byte
/// order, ignoring continuation lines.
///
/// ```rust
/// assert_header_sorted!(event);
/// ```
#[macro_export]
macro_rules! assert_header_sorted {
    ($event:expr) => {{
        let event: &eslv_core::Event = &$event;
        let keys: Vec<&str> = event
            .header_lines()
            .filter(|line| !line.starts_with('\t'))
            .map(|line| line.split_once(": ").map_or(line, |(key, _)| key))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        if keys != sorted {
            panic!(
                "assert_header_sorted! failed for {:?}:\n  keys:   {:?}\n  sorted: {:?}",
                event.name, keys, sorted
            );
        }
    }};
}

/// Assert that a header key does not appear in an event's header block.
#[macro_export]
macro_rules! assert_no_header {
    ($event:expr, $key:expr) => {{
        let event: &eslv_core::Event = &$event;
        let prefix = format!("{}: ", $key);
        if let Some(line) = event.header_lines().find(|line| line.starts_with(&prefix)) {
            panic!(
                "assert_no_header! failed: {:?} has suppressed line {:?}",
                event.name, line
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// View assertions
// ---------------------------------------------------------------------------

/// Assert the names of the visible events, in list order.
///
/// ```rust
/// assert_visible_names!(view, events, ["HEARTBEAT", "API"]);
/// ```
#[macro_export]
macro_rules! assert_visible_names {
    ($view:expr, $events:expr, [$($name:expr),* $(,)?]) => {{
        let events: &[eslv_core::Event] = &$events;
        let actual: Vec<&str> = $view
            .visible()
            .iter()
            .map(|&index| events[index].name.as_str())
            .collect();
        let expected: Vec<&str> = vec![$($name),*];
        pretty_assertions::assert_eq!(actual, expected, "visible event names");
    }};
}

// ---------------------------------------------------------------------------
// Output assertions
// ---------------------------------------------------------------------------

/// Assert that text carries no ANSI escape sequences.
#[macro_export]
macro_rules! assert_no_ansi {
    ($text:expr) => {{
        let text: &str = &$text;
        if let Some(pos) = text.find('\x1b') {
            panic!(
                "assert_no_ansi! failed: escape at byte {} in {:?}",
                pos,
                text.get(pos.saturating_sub(20)..(pos + 20).min(text.len()))
                    .unwrap_or(text)
            );
        }
    }};
}
