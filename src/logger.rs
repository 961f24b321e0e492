//! File logging.
//!
//! The terminal belongs to the UI, so log records go to a file.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};

use crate::error::MidtruncError;

/// Default log location: `<temp dir>/midtrunc.log`.
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("midtrunc.log")
}

/// Map the `-v` count to a level filter.
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Build a logger appending to `path`.
pub fn build_logger(
    path: &Path,
    level: LevelFilter,
) -> Result<Box<WriteLogger<File>>, MidtruncError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Off)
        .build();
    Ok(WriteLogger::new(level, config, file))
}

/// Install the global logger. Must be called at most once.
pub fn install_logger(path: &Path, level: LevelFilter) -> Result<(), MidtruncError> {
    let logger = build_logger(path, level)?;
    log::set_max_level(level);
    log::set_boxed_logger(logger)?;
    Ok(())
}
