//! Validated runtime configuration.

use std::path::PathBuf;

use log::LevelFilter;

use crate::error::MidtruncError;
use crate::fit::FitOptions;
use crate::logger::{default_log_path, level_for_verbosity};

/// What the binary does once configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Interactive playground.
    Interactive,
    /// Fit once and print the result.
    Print,
}

/// Everything the app needs, checked up front.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub text: String,
    pub ellipsis: String,
    /// Requested container width in cells; `None` follows the terminal.
    pub width: Option<u16>,
    pub options: FitOptions,
    pub mode: Mode,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
}

/// Raw values as parsed from the command line.
#[derive(Debug, Clone, Default)]
pub struct RawConfig {
    pub text: String,
    pub ellipsis: String,
    pub width: Option<u16>,
    pub slack: f64,
    pub max_attempts: usize,
    pub print: bool,
    pub log_file: Option<PathBuf>,
    pub verbose: u8,
}

impl RawConfig {
    /// Validate option values and combinations.
    pub fn validate(self) -> Result<Config, MidtruncError> {
        if self.max_attempts == 0 {
            return Err(MidtruncError::InvalidOption(
                "--max-attempts must be at least 1".to_string(),
            ));
        }
        if !self.slack.is_finite() || self.slack < 0.0 {
            return Err(MidtruncError::InvalidOption(format!(
                "--slack must be a non-negative number, got {}",
                self.slack
            )));
        }
        if self.text.contains('\n') {
            return Err(MidtruncError::InvalidOption(
                "text must be a single line".to_string(),
            ));
        }

        let mode = if self.print {
            if self.width.is_none() {
                return Err(MidtruncError::InvalidOption(
                    "--print requires --width".to_string(),
                ));
            }
            Mode::Print
        } else {
            Mode::Interactive
        };

        Ok(Config {
            text: self.text,
            ellipsis: self.ellipsis,
            width: self.width,
            options: FitOptions {
                slack: self.slack,
                max_attempts: self.max_attempts,
            },
            mode,
            log_file: self.log_file.unwrap_or_else(default_log_path),
            log_level: level_for_verbosity(self.verbose),
        })
    }
}
