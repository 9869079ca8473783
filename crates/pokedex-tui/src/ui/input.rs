//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use pokedex_core::Route;

use crate::app::{App, AppState, Direction};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match app.state {
        AppState::ShowingAlert => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                app.dismiss_alert();
            }
            Ok(false)
        }
        AppState::ShowingDetail => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                app.close_details();
            }
            Ok(false)
        }
        AppState::ShowingHelp => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.state = AppState::Normal;
            }
            Ok(false)
        }
        AppState::ConfirmingQuit => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                Ok(true)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
                Ok(false)
            }
            _ => Ok(false),
        },
        AppState::Searching => handle_search_input(app, key),
        AppState::Normal => handle_normal_input(app, key),
        AppState::Quitting => Ok(true),
    }
}

fn handle_normal_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    let on_home = app.router.current() == Route::Home;

    match key.code {
        KeyCode::Char('q') => app.state = AppState::ConfirmingQuit,
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,

        // Views
        KeyCode::Char('1') => navigate(app, Route::Home),
        KeyCode::Char('2') => navigate(app, Route::Team),
        KeyCode::Tab | KeyCode::BackTab => {
            app.status_message = None;
            app.toggle_route();
        }

        // Grid
        KeyCode::Left | KeyCode::Char('h') => app.move_selection(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') => app.move_selection(Direction::Right),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(Direction::Down),
        KeyCode::Enter => app.open_details(),

        // Card actions only apply to the matching view
        KeyCode::Char('a') if on_home => app.card_action(),
        KeyCode::Char('d') | KeyCode::Delete if !on_home => app.card_action(),

        // Filters
        KeyCode::Char('/') if on_home => app.state = AppState::Searching,
        KeyCode::Char('c') if on_home => app.cycle_category(true),
        KeyCode::Char('C') if on_home => app.cycle_category(false),
        KeyCode::Char('x') if on_home => app.clear_category(),
        KeyCode::Esc if on_home => app.clear_search(),

        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('r') => app.render_route(),
        _ => {}
    }
    Ok(false)
}

fn navigate(app: &mut App, route: Route) {
    app.status_message = None;
    app.navigate(route.fragment());
}

fn handle_search_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::Normal;
            app.clear_search();
        }
        KeyCode::Enter => {
            // Keep the query and filter right away
            app.state = AppState::Normal;
            app.apply_filters_now();
        }
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(c) => app.push_search_char(c),
        _ => {}
    }
    Ok(false)
}
