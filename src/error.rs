//! Custom error types for midtrunc.

use thiserror::Error;

/// Errors that can occur in midtrunc.
#[derive(Error, Debug)]
pub enum MidtruncError {
    /// Rejected command line option.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// A global logger was already installed.
    #[error("failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
