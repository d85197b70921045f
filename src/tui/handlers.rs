// File: src/tui/handlers.rs
// Handles keyboard input and network events for the TUI.
use crate::render::render_page;
use crate::system::Platform;
use crate::tui::action::{Action, AppEvent};
use crate::tui::state::{AppState, InputMode, Tab};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rust_i18n::t;

pub fn handle_app_event(state: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::Status(s) => state.message = s,
        AppEvent::SnapshotLoaded(snapshot) => state.apply_snapshot(*snapshot),
    }
}

fn copy_selected(state: &mut AppState, platform: &mut dyn Platform) {
    let Some(link) = state.selected_link() else {
        state.message = t!("status_nothing_selected").to_string();
        return;
    };
    match platform.copy_text(&link) {
        Ok(()) => state.acknowledge(format!("{}\n\n{}", t!("status_link_copied"), link)),
        Err(e) => {
            log::warn!("Copy failed: {}", e);
            state.message = t!("status_copy_failed", error = e.to_string()).to_string();
        }
    }
}

fn open_selected(state: &mut AppState, platform: &mut dyn Platform) {
    let Some(link) = state.selected_link() else {
        state.message = t!("status_nothing_selected").to_string();
        return;
    };
    if let Err(e) = platform.open(&link) {
        log::warn!("Open failed: {}", e);
        state.message = t!("status_open_failed", error = e.to_string()).to_string();
    }
}

fn print_view(state: &mut AppState, platform: &mut dyn Platform) {
    let html = render_page(state.view());
    state.message = match platform.print_document(&html) {
        Ok(path) => t!("status_print_sent", path = path.display().to_string()).to_string(),
        Err(e) => {
            log::warn!("Print failed: {}", e);
            t!("status_print_failed", error = e.to_string()).to_string()
        }
    };
}

/// Applies one key press. Returns an action for the network actor, if any.
pub fn handle_key_event(
    key: KeyEvent,
    state: &mut AppState,
    platform: &mut dyn Platform,
) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match state.mode {
        InputMode::Acknowledging => {
            state.dismiss_acknowledgement();
            None
        }
        InputMode::Searching => {
            match key.code {
                KeyCode::Enter => state.commit_search(),
                KeyCode::Esc => state.cancel_search(),
                KeyCode::Backspace => state.delete_char(),
                KeyCode::Left => state.move_cursor_left(),
                KeyCode::Right => state.move_cursor_right(),
                KeyCode::Char(c) => state.enter_char(c),
                _ => {}
            }
            None
        }
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('r') => {
                state.loading = true;
                Some(Action::Reload)
            }
            KeyCode::Tab => {
                state.next_tab();
                None
            }
            KeyCode::Char('/') => {
                state.begin_search();
                None
            }
            KeyCode::Esc => {
                state.cancel_search();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                state.next();
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                state.previous();
                None
            }
            KeyCode::Left if state.tab == Tab::Standards => {
                state.cycle_category(false);
                None
            }
            KeyCode::Right if state.tab == Tab::Standards => {
                state.cycle_category(true);
                None
            }
            KeyCode::Char(c @ '0'..='9') if state.tab == Tab::Standards => {
                state.select_category_index(c as usize - '0' as usize);
                None
            }
            KeyCode::Char('y') => {
                copy_selected(state, platform);
                None
            }
            KeyCode::Char('o') | KeyCode::Enter => {
                open_selected(state, platform);
                None
            }
            KeyCode::Char('p') => {
                print_view(state, platform);
                None
            }
            _ => None,
        },
    }
}
