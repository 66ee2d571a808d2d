//! Semantic application events: crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Keybindings
//!
//! | Key(s)                    | Event             |
//! |---------------------------|-------------------|
//! | `q`, `Ctrl+c`             | `Quit`            |
//! | `Tab`                     | `FocusNext`       |
//! | `/`, `Ctrl+f`             | `FilterFocus`     |
//! | `x`, `Ctrl+h`             | `HideEvent`       |
//! | `Ctrl+r`, `Ctrl+a`        | `RestoreAll`      |
//! | `PageUp`, `Ctrl+u`        | `PageUp`          |
//! | `PageDown`, `Ctrl+d`      | `PageDown`        |
//! | `Home` / `g`              | `Home`            |
//! | `End` / `G`               | `End`             |
//! | `↑` / `k`                 | `Nav(Up)`         |
//! | `↓` / `j`                 | `Nav(Down)`       |
//! | `←` / `h`, `→` / `l`      | `Nav(Left/Right)` |
//! | printable char            | `Char(c)`         |
//! | `Backspace`               | `Backspace`       |
//! | `Enter`                   | `Enter`           |
//! | `Escape`                  | `Escape`          |
//! | terminal resize           | `Resize(w, h)`    |
//!
//! ## Insert mode
//!
//! While the filter bar or the command bar is focused the event loop calls
//! [`to_app_event_insert`] instead: every printable character becomes
//! `Char`, and only `Ctrl` chords, `Escape`, `Enter`, `Tab`, `Backspace`
//! and the arrow keys keep their special meaning.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

/// Cursor direction for list, detail and text-input navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Exit the application.
    Quit,
    /// Move keyboard focus to the next pane; completes a header key while
    /// the filter bar is focused.
    FocusNext,
    /// Transfer focus to the filter bar.
    FilterFocus,
    /// Hide every event with the selected event's name.
    HideEvent,
    /// Show all hidden event names again.
    RestoreAll,
    PageUp,
    PageDown,
    Home,
    End,
    Nav(Direction),
    /// A printable character forwarded to the active text input.
    Char(char),
    Backspace,
    Enter,
    /// Leave the filter bar, or clear the filter from the list.
    Escape,
    Resize(u16, u16),
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] (navigation mode).
///
/// Returns `None` for mouse events, unbound keys and other events with no
/// meaning to the application.
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key(key),
        _ => None,
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] for text-input mode.
pub fn to_app_event_insert(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key_insert(key),
        _ => None,
    }
}

/// `Ctrl` chords shared by both modes.
fn map_ctrl(key: &KeyEvent) -> Option<AppEvent> {
    if key.modifiers != KeyModifiers::CONTROL {
        return None;
    }
    match key.code {
        KeyCode::Char('c') => Some(AppEvent::Quit),
        KeyCode::Char('f') => Some(AppEvent::FilterFocus),
        KeyCode::Char('h') => Some(AppEvent::HideEvent),
        KeyCode::Char('r') | KeyCode::Char('a') => Some(AppEvent::RestoreAll),
        KeyCode::Char('u') => Some(AppEvent::PageUp),
        KeyCode::Char('d') => Some(AppEvent::PageDown),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    if let Some(event) = map_ctrl(&key) {
        return Some(event);
    }

    match key.code {
        Char('q') if key.modifiers == Mod::NONE => Some(AppEvent::Quit),
        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),
        Char('/') if key.modifiers == Mod::NONE => Some(AppEvent::FilterFocus),
        Char('x') if key.modifiers == Mod::NONE => Some(AppEvent::HideEvent),

        PageUp => Some(AppEvent::PageUp),
        PageDown => Some(AppEvent::PageDown),
        Home | Char('g') if key.modifiers == Mod::NONE => Some(AppEvent::Home),
        // 'G' arrives with or without SHIFT depending on the terminal
        End | Char('G') => Some(AppEvent::End),

        Up | Char('k') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Up)),
        Down | Char('j') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Down)),
        Left | Char('h') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Left)),
        Right | Char('l') if key.modifiers == Mod::NONE => {
            Some(AppEvent::Nav(Direction::Right))
        }

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

fn map_key_insert(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    // Ctrl+h is Backspace on many terminals; keep it editing the text here.
    if key.code == Char('h') && key.modifiers == Mod::CONTROL {
        return Some(AppEvent::Backspace);
    }
    if let Some(event) = map_ctrl(&key) {
        return Some(event);
    }

    match key.code {
        Up => Some(AppEvent::Nav(Direction::Up)),
        Down => Some(AppEvent::Nav(Direction::Down)),
        Left => Some(AppEvent::Nav(Direction::Left)),
        Right => Some(AppEvent::Nav(Direction::Right)),
        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn press(code: KeyCode) -> Event {
        key(code, KeyModifiers::NONE)
    }

    fn ctrl(code: KeyCode) -> Event {
        key(code, KeyModifiers::CONTROL)
    }

    #[test]
    fn quit_keys() {
        assert_eq!(to_app_event(press(KeyCode::Char('q'))), Some(AppEvent::Quit));
        assert_eq!(to_app_event(ctrl(KeyCode::Char('c'))), Some(AppEvent::Quit));
    }

    #[test]
    fn filter_focus_keys() {
        assert_eq!(to_app_event(press(KeyCode::Char('/'))), Some(AppEvent::FilterFocus));
        assert_eq!(to_app_event(ctrl(KeyCode::Char('f'))), Some(AppEvent::FilterFocus));
    }

    #[test]
    fn hide_and_restore_keys() {
        assert_eq!(to_app_event(ctrl(KeyCode::Char('h'))), Some(AppEvent::HideEvent));
        assert_eq!(to_app_event(press(KeyCode::Char('x'))), Some(AppEvent::HideEvent));
        assert_eq!(to_app_event(ctrl(KeyCode::Char('r'))), Some(AppEvent::RestoreAll));
        assert_eq!(to_app_event(ctrl(KeyCode::Char('a'))), Some(AppEvent::RestoreAll));
    }

    #[test]
    fn vim_navigation() {
        assert_eq!(to_app_event(press(KeyCode::Char('j'))), Some(AppEvent::Nav(Direction::Down)));
        assert_eq!(to_app_event(press(KeyCode::Char('k'))), Some(AppEvent::Nav(Direction::Up)));
        assert_eq!(to_app_event(press(KeyCode::Char('G'))), Some(AppEvent::End));
        assert_eq!(to_app_event(press(KeyCode::Char('g'))), Some(AppEvent::Home));
    }

    #[test]
    fn insert_mode_forwards_letters() {
        for c in ['q', 'j', 'x', 'G', '/'] {
            assert_eq!(to_app_event_insert(press(KeyCode::Char(c))), Some(AppEvent::Char(c)));
        }
    }

    #[test]
    fn insert_mode_ctrl_h_is_backspace() {
        assert_eq!(to_app_event_insert(ctrl(KeyCode::Char('h'))), Some(AppEvent::Backspace));
        assert_eq!(to_app_event_insert(ctrl(KeyCode::Char('c'))), Some(AppEvent::Quit));
    }

    #[test]
    fn resize_maps_in_both_modes() {
        assert_eq!(to_app_event(Event::Resize(80, 24)), Some(AppEvent::Resize(80, 24)));
        assert_eq!(to_app_event_insert(Event::Resize(1, 2)), Some(AppEvent::Resize(1, 2)));
    }
}
