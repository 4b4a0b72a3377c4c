//! City Lights timer
//!
//! A terminal countdown timer: pick a duration and watch the city turn from
//! day to night (and back again on the next run).
//! Run with: citylights [--log-file <PATH>] [-v|--verbose]

mod app;
mod clock;
mod constants;
mod coordinator;
mod crossfade;
mod event;
mod ui;
mod validation;
mod windows;

use std::env;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::event::EventHandler;

/// Command line options.
#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    /// Where to write logs; logging is off without it
    log_file: Option<PathBuf>,
    /// Log at debug level instead of info
    verbose: bool,
}

/// Parses command line arguments.
///
/// Supports:
/// - `--log-file <PATH>` to write logs to a file
/// - `-v` or `--verbose` for debug logs
/// - `-h` or `--help` to show usage
fn parse_args() -> Options {
    match parse_from(env::args().skip(1)) {
        Ok(Some(options)) => options,
        Ok(None) => {
            println!("citylights - a day/night countdown timer");
            println!();
            println!("Usage: citylights [OPTIONS]");
            println!();
            println!("Options:");
            println!("  --log-file <PATH>  Write logs to PATH");
            println!("  -v, --verbose      Log debug details (with --log-file)");
            println!("  -h, --help         Show this help message");
            std::process::exit(0);
        }
        Err(message) => {
            eprintln!("Error: {message}");
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    }
}

/// Parses arguments without the program name. Returns Ok(None) for `--help`.
fn parse_from<I>(args: I) -> Result<Option<Options>, String>
where
    I: IntoIterator<Item = String>,
{
    let mut options = Options::default();
    let mut args_iter = args.into_iter();

    while let Some(arg) = args_iter.next() {
        match arg.as_str() {
            "--log-file" => match args_iter.next() {
                Some(path) => options.log_file = Some(PathBuf::from(path)),
                None => return Err("--log-file requires a PATH argument".to_string()),
            },
            "-v" | "--verbose" => options.verbose = true,
            "-h" | "--help" => return Ok(None),
            other => return Err(format!("Unknown argument '{other}'")),
        }
    }

    Ok(Some(options))
}

/// Installs a file-backed tracing subscriber when a log file was requested.
///
/// The terminal belongs to the UI, so nothing is ever logged to stdout/stderr.
fn init_logging(options: &Options) -> Result<()> {
    let Some(path) = &options.log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let level = if options.verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("citylights={level}")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

/// Entry point for the application.
#[tokio::main]
async fn main() -> Result<()> {
    let options = parse_args();
    init_logging(&options)?;
    info!("Starting citylights v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the terminal
    let terminal = ratatui::init();

    let app = App::new();
    let result = run_app(terminal, app).await;

    // Restore the terminal to its original state
    ratatui::restore();

    info!("Exiting");
    result
}

/// Main application loop.
///
/// This function runs the TUI event loop:
/// 1. Take a snapshot of the scene
/// 2. Draw it
/// 3. Handle user input (or time out so the next frame animates)
/// 4. Repeat until the user quits
async fn run_app(mut terminal: ratatui::DefaultTerminal, mut app: App) -> Result<()> {
    let event_handler = EventHandler::new();

    loop {
        app.sync()?;

        terminal
            .draw(|frame| ui::draw(frame, &app))
            .context("Failed to draw UI")?;

        if let Some(action) = event_handler.next().context("Failed to read input")? {
            if app.handle_event(action)? {
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_arguments() {
        assert_eq!(parse_from(args(&[])), Ok(Some(Options::default())));
    }

    #[test]
    fn test_log_file_and_verbose() {
        let options = parse_from(args(&["--log-file", "run.log", "-v"]))
            .unwrap()
            .unwrap();
        assert_eq!(options.log_file, Some(PathBuf::from("run.log")));
        assert!(options.verbose);
    }

    #[test]
    fn test_help() {
        assert_eq!(parse_from(args(&["--help"])), Ok(None));
        assert_eq!(parse_from(args(&["-h"])), Ok(None));
    }

    #[test]
    fn test_errors() {
        assert!(parse_from(args(&["--log-file"])).is_err());
        assert!(parse_from(args(&["--nope"])).is_err());
    }
}
