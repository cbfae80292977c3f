//! ``src/controller/event_loop.rs``
//! ============================================================================
//! # Event Loop Controller
//!
//! Turns terminal events into [`Action`]s and applies them to the shared
//! [`AppState`]. Key mapping ([`map_key`]) and dispatch ([`apply_action`])
//! are plain functions over state so they can be driven without a terminal.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{Event as TermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use tokio::sync::{Mutex, MutexGuard};
use tokio::time::{self, Interval, MissedTickBehavior};
use tracing::{debug, info, trace};

use crate::controller::actions::Action;
use crate::model::app_state::AppState;
use crate::model::ui_state::{RedrawFlag, UIMode, UIOverlay};

const TICK_INTERVAL: Duration = Duration::from_millis(250);

pub struct EventLoop {
    pub app: Arc<Mutex<AppState>>,
    event_stream: EventStream,
    tick: Interval,
}

impl EventLoop {
    pub fn new(app: Arc<Mutex<AppState>>) -> Self {
        info!("Initializing event loop controller");
        let mut tick = time::interval(TICK_INTERVAL);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            app,
            event_stream: EventStream::new(),
            tick,
        }
    }

    /// Wait for the next terminal event or tick. `None` once the terminal
    /// event stream has closed.
    pub async fn next_action(&mut self) -> Option<Action> {
        tokio::select! {
            event = self.event_stream.next() => match event {
                Some(Ok(event)) => {
                    trace!("Terminal event received: {:?}", event);
                    let action = self.handle_terminal_event(event).await;
                    debug!("Terminal event mapped to action: {:?}", action);
                    Some(action)
                }
                Some(Err(e)) => {
                    debug!("Terminal event error: {e}");
                    Some(Action::NoOp)
                }
                None => {
                    info!("Event loop terminated - no more events");
                    None
                }
            },

            _ = self.tick.tick() => Some(Action::Tick),
        }
    }

    async fn handle_terminal_event(&self, event: TermEvent) -> Action {
        match event {
            TermEvent::Key(key) if key.kind != KeyEventKind::Release => {
                let app: MutexGuard<'_, AppState> = self.app.lock().await;
                map_key(key, app.ui.mode, app.ui.overlay)
            }

            TermEvent::Resize(x, y) => {
                info!("Terminal resize: {}x{}", x, y);
                Action::Resize(x, y)
            }

            _ => {
                trace!("Unhandled terminal event: {:?}", event);
                Action::NoOp
            }
        }
    }

    pub async fn dispatch_action(&self, action: Action) {
        let start_time = Instant::now();
        let mut app: MutexGuard<'_, AppState> = self.app.lock().await;
        apply_action(&mut app, action);
        drop(app);

        let execution_time = start_time.elapsed();
        if execution_time.as_millis() > 10 {
            debug!("Action dispatch took {}ms", execution_time.as_millis());
        }
    }
}

/// Key bindings for the current mode and overlay.
pub fn map_key(key: KeyEvent, mode: UIMode, overlay: UIOverlay) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    if overlay == UIOverlay::Help {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter => Action::CloseOverlay,
            KeyCode::Char('q') => Action::Quit,
            _ => Action::NoOp,
        };
    }

    match mode {
        UIMode::Search => map_search_key(key),
        UIMode::Browse => map_browse_key(key),
    }
}

fn map_search_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => Action::ExitSearch,
        KeyCode::Tab => Action::NextSearchInput,
        KeyCode::Backspace => Action::SearchBackspace,
        KeyCode::Left => Action::SearchCursorLeft,
        KeyCode::Right => Action::SearchCursorRight,
        KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Action::RetargetSearchInput
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Action::SearchInput(c)
        }
        _ => Action::NoOp,
    }
}

fn map_browse_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('s') => Action::ToggleSortDirection,
        KeyCode::Char('f') => Action::CycleSortField,
        KeyCode::Char('/') => Action::EnterSearch,
        KeyCode::Char('c') => Action::ClearSearch,
        KeyCode::Char('r') => Action::ResetView,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Left | KeyCode::PageUp | KeyCode::Char('p') => Action::PrevPage,
        KeyCode::Right | KeyCode::PageDown | KeyCode::Char('n') => Action::NextPage,
        KeyCode::Home => Action::FirstPage,
        KeyCode::End => Action::LastPage,
        KeyCode::Up | KeyCode::Char('k') => Action::MoveSelectionUp,
        KeyCode::Down | KeyCode::Char('j') => Action::MoveSelectionDown,
        KeyCode::Esc => Action::CloseOverlay,
        _ => Action::NoOp,
    }
}

/// Apply one action to the application state.
pub fn apply_action(app: &mut AppState, action: Action) {
    match action {
        Action::ToggleSortDirection | Action::CycleSortField => dispatch_sort_action(app, action),

        Action::EnterSearch
        | Action::ExitSearch
        | Action::SearchInput(_)
        | Action::SearchBackspace
        | Action::SearchCursorLeft
        | Action::SearchCursorRight
        | Action::NextSearchInput
        | Action::RetargetSearchInput
        | Action::ClearSearch => dispatch_search_action(app, action),

        Action::PrevPage | Action::NextPage | Action::FirstPage | Action::LastPage => {
            dispatch_page_action(app, action);
        }

        Action::MoveSelectionUp => {
            let rows = app.page_rows();
            app.ui.select_prev(rows);
            app.ui.request_redraw(RedrawFlag::Main);
        }

        Action::MoveSelectionDown => {
            let rows = app.page_rows();
            app.ui.select_next(rows);
            app.ui.request_redraw(RedrawFlag::Main);
        }

        Action::ResetView => {
            app.reset();
            app.ui.show_info("View reset");
        }

        Action::ToggleHelp => app.ui.toggle_help(),

        Action::CloseOverlay => {
            if app.ui.overlay != UIOverlay::None {
                app.ui.overlay = UIOverlay::None;
                app.ui.request_redraw(RedrawFlag::All);
            } else {
                app.ui.dismiss_notification();
            }
        }

        Action::Tick => {
            app.ui.update_notification();
        }

        Action::Resize(..) | Action::NoOp => app.ui.request_redraw(RedrawFlag::All),

        Action::Quit => {
            info!("Quit action - handled in main loop");
        }
    }
}

fn dispatch_sort_action(app: &mut AppState, action: Action) {
    match action {
        Action::ToggleSortDirection => {
            let direction = app.engine.toggle_sort_direction();
            debug!(%direction, "Sort direction toggled");
        }
        Action::CycleSortField => {
            let field = app.engine.state().sort().field.next();
            app.engine.set_sort_field(field);
            app.ui.show_info(format!("Sorted by {}", field.label()));
        }
        _ => return,
    }
    app.after_page_change();
    app.ui.request_redraw(RedrawFlag::StatusBar);
}

fn dispatch_search_action(app: &mut AppState, action: Action) {
    match action {
        Action::EnterSearch => {
            app.ui.mode = UIMode::Search;
            app.ui.active_input = 0;
            app.sync_input();
        }
        Action::ExitSearch => {
            app.ui.mode = UIMode::Browse;
        }
        Action::SearchInput(c) => {
            app.ui.insert_char(c);
            app.apply_input();
        }
        Action::SearchBackspace => {
            if app.ui.delete_char_before() {
                app.apply_input();
            }
        }
        Action::SearchCursorLeft => app.ui.move_cursor_left(),
        Action::SearchCursorRight => app.ui.move_cursor_right(),
        Action::NextSearchInput => {
            app.ui.focus_next_input();
            app.sync_input();
        }
        Action::RetargetSearchInput => {
            if let Some((from, to)) = app.ui.retarget_active_input()
                && app.engine.change_search_field(from, to)
            {
                app.after_refilter();
            }
        }
        Action::ClearSearch => {
            if app.engine.clear_search() {
                app.after_refilter();
            }
            app.ui.clear_input();
        }
        _ => {}
    }
    app.ui.request_redraw(RedrawFlag::All);
}

fn dispatch_page_action(app: &mut AppState, action: Action) {
    let moved = match action {
        Action::PrevPage => app.engine.prev_page(),
        Action::NextPage => app.engine.next_page(),
        Action::FirstPage => app.engine.first_page(),
        Action::LastPage => app.engine.last_page(),
        _ => false,
    };

    if moved {
        app.ui.selected = Some(0);
        app.after_page_change();
    } else {
        trace!(?action, "Page unchanged");
    }
}
