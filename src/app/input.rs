//! Input mode methods for App.

use tui_input::Input;

use super::{App, InputMode};

impl App {
    /// Start input mode, prefilled with the current value.
    pub fn start_input_mode(&mut self, mode: InputMode) {
        let current = match mode {
            InputMode::Text => self.label.text(),
            InputMode::Ellipsis => self.label.ellipsis(),
        };
        self.input = Input::new(current.to_string());
        self.input_mode = Some(mode);
    }

    /// Cancel input mode without applying.
    pub fn cancel_input_mode(&mut self) {
        self.input_mode = None;
        self.input.reset();
    }

    /// Check if currently in input mode.
    pub fn is_input_mode(&self) -> bool {
        self.input_mode.is_some()
    }

    /// Apply the current input to the label.
    pub fn submit_input(&mut self) {
        let Some(mode) = self.input_mode.take() else {
            return;
        };
        let value = self.input.value().to_string();
        self.input.reset();

        match mode {
            InputMode::Text => self.label.set_text(value),
            InputMode::Ellipsis => self.label.set_ellipsis(value),
        }
    }
}
