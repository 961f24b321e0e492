//! Application state management.

mod input;


use log::info;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use tui_input::Input;

use crate::config::Config;
use crate::label::TruncatedLabel;
use crate::schedule::RunId;
use crate::ui;

/// Narrowest container the user can shrink to.
pub const MIN_WIDTH: u16 = 1;

/// Input mode for text entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Editing the label's source text.
    Text,
    /// Editing the ellipsis glyph.
    Ellipsis,
}

impl InputMode {
    /// Get the placeholder text for this input mode.
    pub fn placeholder(&self) -> &'static str {
        match self {
            InputMode::Text => "Enter text to fit...",
            InputMode::Ellipsis => "Enter ellipsis (empty for none)...",
        }
    }
}

/// Application state.
pub struct App {
    /// The label being fitted.
    pub label: TruncatedLabel,
    /// Requested container width; `None` follows the terminal width.
    pub requested_width: Option<u16>,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Whether the help modal is shown.
    pub show_help: bool,
    /// Current input mode (if any).
    pub input_mode: Option<InputMode>,
    /// Text input buffer.
    pub input: Input,
}

impl App {
    /// Create a new App from the validated configuration.
    pub fn new(config: &Config) -> Self {
        let label = TruncatedLabel::new(config.text.clone())
            .with_ellipsis(config.ellipsis.clone())
            .with_style(Style::default().fg(Color::White))
            .with_options(config.options);
        Self {
            label,
            requested_width: config.width,
            should_quit: false,
            show_help: false,
            input_mode: None,
            input: Input::default(),
        }
    }

    /// Request application quit.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Toggle help modal visibility.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Close help modal.
    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    /// Width the container currently has (or will have at the next layout).
    fn current_width(&self) -> u16 {
        self.requested_width
            .or(self.label.container_width())
            .unwrap_or(MIN_WIDTH)
    }

    /// Shrink the container.
    pub fn shrink(&mut self, amount: u16) {
        let width = self.current_width().saturating_sub(amount).max(MIN_WIDTH);
        self.requested_width = Some(width);
    }

    /// Grow the container. Clamped to the terminal at layout time.
    pub fn grow(&mut self, amount: u16) {
        let width = self.current_width().saturating_add(amount);
        self.requested_width = Some(width);
    }

    /// Let the container follow the terminal width again.
    pub fn follow_terminal(&mut self) {
        self.requested_width = None;
    }

    /// Lay out against the terminal area and report the label's width.
    pub fn layout(&mut self, area: Rect) {
        let inner = ui::label_area(area, self.requested_width);
        self.label.observe_width(inner.width);
    }

    /// Run a pending fit. Returns the id of the published run.
    pub fn on_frame(&mut self) -> Option<RunId> {
        self.label.on_frame()
    }

    /// Stop fitting; called once before the terminal is restored.
    pub fn teardown(&mut self) {
        info!("tearing down label");
        self.label.teardown();
    }
}
