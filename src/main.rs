//! midtrunc - Middle-ellipsis truncation playground.

mod app;
mod config;
mod error;
mod fit;
mod keys;
mod label;
mod logger;
mod measure;
mod schedule;
mod text;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::info;
use ratatui::layout::Rect;

use app::App;
use config::{Config, Mode, RawConfig};
use fit::{DEFAULT_ELLIPSIS, DEFAULT_MAX_ATTEMPTS, DEFAULT_SLACK};
use label::TruncatedLabel;

/// Fit a single line of text into a width by eliding its middle.
#[derive(Parser, Debug)]
#[command(name = "midtrunc", version, about)]
struct Args {
    /// Text to fit.
    text: String,

    /// Glyph inserted where the middle is cut.
    #[arg(short, long, default_value = DEFAULT_ELLIPSIS)]
    ellipsis: String,

    /// Container width in cells.
    /// Defaults to the terminal width; required with --print.
    #[arg(short, long)]
    width: Option<u16>,

    /// Accept a fitting candidate once less than this many cells are left.
    #[arg(long, default_value_t = DEFAULT_SLACK)]
    slack: f64,

    /// Maximum number of candidates measured per fit.
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: usize,

    /// Fit once, print the result and exit.
    #[arg(long)]
    print: bool,

    /// Log file (defaults to midtrunc.log in the temp directory).
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl From<Args> for RawConfig {
    fn from(args: Args) -> Self {
        Self {
            text: args.text,
            ellipsis: args.ellipsis,
            width: args.width,
            slack: args.slack,
            max_attempts: args.max_attempts,
            print: args.print,
            log_file: args.log_file,
            verbose: args.verbose,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = RawConfig::from(args).validate()?;

    logger::install_logger(&config.log_file, config.log_level).with_context(|| {
        format!("failed to open log file {}", config.log_file.display())
    })?;
    info!("midtrunc starting in {:?} mode", config.mode);

    match config.mode {
        Mode::Print => {
            println!("{}", fit_once(&config));
            Ok(())
        }
        Mode::Interactive => run_tui(App::new(&config)),
    }
}

/// Fit the configured text once against the configured width.
fn fit_once(config: &Config) -> String {
    let mut label = TruncatedLabel::new(config.text.clone())
        .with_ellipsis(config.ellipsis.clone())
        .with_options(config.options);
    label.observe_width(config.width.unwrap_or_default());
    label.on_frame();
    label.teardown();
    label.display().to_string()
}

/// Run the TUI application.
fn run_tui(mut app: App) -> Result<()> {
    let mut terminal = ratatui::init();

    // Cell metrics are fixed once the terminal is in raw mode.
    app.label.fonts_ready();

    let result = run_event_loop(&mut terminal, &mut app);

    app.teardown();
    ratatui::restore();

    result
}

/// Main event loop.
fn run_event_loop(terminal: &mut ratatui::DefaultTerminal, app: &mut App) -> Result<()> {
    loop {
        // Lay out and fit before drawing so the frame shows the new string
        let size = terminal.size().context("failed to query terminal size")?;
        app.layout(Rect::new(0, 0, size.width, size.height));
        app.on_frame();

        terminal.draw(|frame| {
            ui::render(frame, app);
        })?;

        // Block for one event, then drain whatever else is already queued so
        // a burst of resizes collapses into a single fit.
        let mut next = Some(event::read()?);
        while let Some(event) = next.take() {
            if let Event::Key(key) = &event
                && key.kind == KeyEventKind::Press
            {
                keys::dispatch_key_event(app, *key, &event);
            }
            if app.should_quit {
                return Ok(());
            }
            if event::poll(Duration::ZERO)? {
                next = Some(event::read()?);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_args_defaults() {
        let args = parse(&["midtrunc", "report.pdf"]);
        assert_eq!(args.ellipsis, "…");
        assert_eq!(args.slack, DEFAULT_SLACK);
        assert_eq!(args.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert!(!args.print);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_args_requires_text() {
        assert!(Args::try_parse_from(["midtrunc"]).is_err());
    }

    #[test]
    fn test_args_to_config() {
        let args = parse(&[
            "midtrunc",
            "report.pdf",
            "-e",
            "...",
            "-w",
            "8",
            "--print",
            "-vv",
        ]);
        let config = RawConfig::from(args).validate().unwrap();
        assert_eq!(config.mode, Mode::Print);
        assert_eq!(config.ellipsis, "...");
        assert_eq!(config.width, Some(8));
        assert_eq!(config.log_level, log::LevelFilter::Trace);
    }

    #[test]
    fn test_fit_once() {
        let config = RawConfig::from(parse(&[
            "midtrunc",
            "thisisverylooooooongfilename.tsx",
            "--width",
            "14",
            "--print",
        ]))
        .validate()
        .unwrap();
        assert_eq!(fit_once(&config), "thisis…me.tsx");

        let config = RawConfig::from(parse(&["midtrunc", "short", "-w", "14", "--print"]))
            .validate()
            .unwrap();
        assert_eq!(fit_once(&config), "short");
    }
}
