//! Keyboard event handlers.

use crossterm::event::{Event, KeyCode, KeyEvent};
use tui_input::backend::crossterm::EventHandler;

use crate::app::{App, InputMode};

/// Resize step for the shifted keys.
const BIG_STEP: u16 = 10;

/// Handle key events in the main view.
pub fn handle_main_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.quit();
        }
        KeyCode::Char('h') | KeyCode::Left => {
            app.shrink(1);
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.grow(1);
        }
        KeyCode::Char('H') => {
            app.shrink(BIG_STEP);
        }
        KeyCode::Char('L') => {
            app.grow(BIG_STEP);
        }
        KeyCode::Char('0') => {
            app.follow_terminal();
        }
        KeyCode::Char('t') => {
            app.start_input_mode(InputMode::Text);
        }
        KeyCode::Char('e') => {
            app.start_input_mode(InputMode::Ellipsis);
        }
        _ => {}
    }
}

/// Handle key events in input mode.
pub fn handle_input_keys(app: &mut App, key: KeyEvent, event: &Event) {
    match key.code {
        KeyCode::Enter => {
            app.submit_input();
        }
        KeyCode::Esc => {
            app.cancel_input_mode();
        }
        _ => {
            // Pass other keys to tui-input
            app.input.handle_event(event);
        }
    }
}

/// Dispatch key event to appropriate handler based on app state.
pub fn dispatch_key_event(app: &mut App, key: KeyEvent, event: &Event) {
    // Input mode owns every key, including '?'
    if app.is_input_mode() {
        handle_input_keys(app, key, event);
        return;
    }

    // Handle ? key globally for help toggle
    if key.code == KeyCode::Char('?') {
        app.toggle_help();
        return;
    }

    // If help is showing, close it and execute the command
    if app.show_help {
        app.close_help();
        if key.code == KeyCode::Esc {
            return;
        }
    }

    handle_main_keys(app, key);
}
