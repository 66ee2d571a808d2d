//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. All key handling lives on
//! [`AppState`] so it can be exercised without a terminal.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent},
    markup::SpanMarkup,
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        event_detail::{EventDetail, EventDetailState},
        event_list::{EventList, EventListState},
        filter_bar::{FilterBar, FilterBarState},
        help::HelpPopup,
        title_bar::{KeyHints, TitleBar},
    },
};
use crossterm::{
    event::{self as ct_event, Event as CtEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use eslv_core::{
    config::Config, render, view::detail_title, Event, EventIndex, EventView, HeaderKeys,
    MatchMode,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, time::Duration};

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Detail,
    Filter,
    /// Vim-style `:` command line is active.
    Command,
}

/// What the user left the viewer with, so the caller can print relaunch
/// parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub filter: String,
    pub hidden: Vec<String>,
    pub mode: MatchMode,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub events: Vec<Event>,
    pub header_keys: HeaderKeys,
    pub view: EventView,
    pub list: EventListState,
    pub detail: EventDetailState,
    pub filter: FilterBarState,
    pub command_bar: CommandBarState,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub quit: bool,
}

impl AppState {
    /// Build the state for a parsed log. `view` carries the initial filter
    /// and hidden names.
    pub fn new(index: EventIndex, view: EventView, config: Config) -> Self {
        let (events, header_keys) = index.into_parts();
        let theme = Theme::by_name(&config.ui.theme);
        let filter = FilterBarState::with_text(view.filter_text());

        let mut state = Self {
            events,
            header_keys,
            view,
            list: EventListState::default(),
            detail: EventDetailState::default(),
            filter,
            command_bar: CommandBarState::default(),
            focus: Focus::List,
            prev_focus: Focus::List,
            theme,
            config,
            show_help: false,
            quit: false,
        };
        state.refill();
        state
    }

    pub fn session(&self) -> Session {
        Session {
            filter: self.view.filter_text().trim().to_string(),
            hidden: self.view.hidden().map(str::to_string).collect(),
            mode: self.view.mode(),
        }
    }

    /// Rescan the events, jump to the first row and focus the list.
    pub fn refill(&mut self) {
        self.view.refresh(&self.events);
        self.list.reset();
        self.focus = Focus::List;
        self.show_selected();
    }

    /// Re-render the selected event into the detail pane.
    pub fn show_selected(&mut self) {
        let event = match self.view.selected(&self.events, self.list.cursor) {
            Ok(event) => event,
            Err(err) => {
                tracing::debug!(%err, "nothing selected");
                self.detail.clear();
                return;
            }
        };

        let mut markup = SpanMarkup::new(&self.theme);
        if let Err(err) = render(event, self.view.matcher(), &mut markup) {
            tracing::warn!(%err, "failed to render event");
            self.detail.clear();
            return;
        }
        let title = detail_title(event, &self.config.ui.timestamp_format);
        tracing::debug!(%title, row = self.list.cursor, "event selected");
        self.detail.show(title, markup.into_lines());
    }

    /// Compile the filter bar's text and rebuild the list.
    pub fn apply_filter(&mut self) {
        self.filter.hint = None;
        if let Some(err) = self.view.set_filter(&self.filter.input) {
            tracing::debug!(%err, "filter left inactive");
        }
        self.refill();
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
        self.apply_filter();
    }

    pub fn set_mode(&mut self, mode: MatchMode) {
        self.view.set_mode(mode);
        self.refill();
    }

    pub fn hide(&mut self, name: &str) {
        self.view.hide(name);
        self.refill();
    }

    /// Hide every event sharing the selected event's name.
    pub fn hide_selected(&mut self) {
        let name = match self.view.selected(&self.events, self.list.cursor) {
            Ok(event) => event.name.clone(),
            Err(_) => return,
        };
        self.hide(&name);
    }

    pub fn restore_all(&mut self) {
        tracing::debug!("restoring hidden events");
        self.view.restore_all();
        self.refill();
    }

    pub fn handle(&mut self, event: AppEvent) {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            if matches!(event, AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("help popup closed");
                self.show_help = false;
            }
            return;
        }

        match self.focus {
            Focus::Command => self.handle_command(event),
            Focus::Filter => self.handle_filter(event),
            Focus::List | Focus::Detail => self.handle_nav(event),
        }
    }

    fn handle_command(&mut self, event: AppEvent) {
        match event {
            AppEvent::Escape => {
                tracing::debug!("command bar cancelled");
                self.command_bar.clear();
                self.focus = self.prev_focus;
            }
            AppEvent::Enter => match Command::parse(&self.command_bar.input) {
                Ok(cmd) => {
                    tracing::debug!(command = ?cmd, "executing command");
                    self.command_bar.clear();
                    self.focus = self.prev_focus;
                    execute_command(self, cmd);
                }
                Err(msg) if msg.is_empty() => {
                    self.command_bar.clear();
                    self.focus = self.prev_focus;
                }
                Err(msg) => self.command_bar.error = Some(msg),
            },
            AppEvent::Quit => self.quit = true,
            other => self.command_bar.handle(&other),
        }
    }

    fn handle_filter(&mut self, event: AppEvent) {
        match event {
            AppEvent::Enter | AppEvent::Escape => self.apply_filter(),
            AppEvent::FocusNext => self.filter.complete(&self.header_keys),
            AppEvent::Quit => self.quit = true,
            AppEvent::RestoreAll => self.restore_all(),
            other => self.filter.handle(&other),
        }
    }

    fn handle_nav(&mut self, event: AppEvent) {
        match event {
            AppEvent::Char('?') => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }
            AppEvent::Char(':') => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
            }
            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }
            AppEvent::FilterFocus => {
                tracing::debug!("focus -> Filter");
                self.focus = Focus::Filter;
            }
            AppEvent::FocusNext => {
                let next = match self.focus {
                    Focus::List => Focus::Detail,
                    _ => Focus::Filter,
                };
                tracing::debug!(from = ?self.focus, to = ?next, "focus cycle");
                self.focus = next;
            }
            AppEvent::HideEvent => self.hide_selected(),
            AppEvent::RestoreAll => self.restore_all(),

            AppEvent::Escape if self.focus == Focus::List => self.clear_filter(),
            AppEvent::Escape => self.focus = Focus::List,
            AppEvent::Enter if self.focus == Focus::List => self.focus = Focus::Detail,

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other if self.focus == Focus::List => {
                if self.list.handle(&other, self.view.visible().len()) {
                    self.show_selected();
                }
            }
            other => self.detail.handle(&other),
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(index: EventIndex, view: EventView, config: Config) -> Self {
        App {
            state: AppState::new(index, view, config),
        }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<Session> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result.map(|()| self.state.session())
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    CtEvent::Key(key) if key.kind == KeyEventKind::Press => {
                        let raw = CtEvent::Key(key);
                        // Use insert-mode mapping when a text widget is focused
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.state.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.state.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Returns true when the current focus is on a text-input widget, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::Filter | Focus::Command)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: title | body | 3-line filter bar | key hints
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    let horiz = Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([Constraint::Length(state.config.ui.list_width), Constraint::Fill(1)])
        .split(vert[1]);

    frame.render_widget(TitleBar::new(VERSION, &state.theme), vert[0]);
    frame.render_widget(
        EventList::new(
            &state.list,
            &state.events,
            state.view.visible(),
            state.view.title(state.events.len()),
            state.focus == Focus::List,
            &state.theme,
        ),
        horiz[0],
    );
    frame.render_widget(
        EventDetail::new(&state.detail, state.focus == Focus::Detail, &state.theme),
        horiz[1],
    );
    let filter = FilterBar::new(
        &state.filter,
        state.view.mode(),
        state.view.diagnostic(),
        state.focus == Focus::Filter,
        &state.theme,
    );
    let cursor = filter.cursor_position(vert[2]);
    frame.render_widget(filter, vert[2]);
    frame.render_widget(KeyHints::new(&state.theme), vert[3]);

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom().saturating_sub(1), height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
    } else if state.focus == Focus::Filter {
        frame.set_cursor_position(cursor);
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
