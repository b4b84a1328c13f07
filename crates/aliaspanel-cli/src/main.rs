//! Command line front end for the aliaspanel cheat sheet.
//!
//! Reads the alias files named by `$ALIASFILES`, or every `~/*_aliases` file
//! when it is unset, and tiles their sections across the terminal until `q`
//! is pressed.
//!
//! # Usage
//!
//! ```bash
//! # Show every ~/*_aliases file
//! aliaspanel
//!
//! # Wider spacing, with a debug log written to ./aliaspanel.log
//! aliaspanel --margin 4 --debug
//!
//! # Explicit alias files
//! ALIASFILES=~/.bash_aliases:~/.git_aliases aliaspanel
//! ```

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use aliaspanel::{
  display, parser,
  terminal::{TerminalEvents, TerminalScreen},
  Config, DEFAULT_MARGIN,
};
use clap::Parser;
use console::style;
use tracing::{debug, info};
use tracing_appender::{
  non_blocking::WorkerGuard,
  rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::EnvFilter;

pub mod error;

use crate::error::*;

/// Prefix for warning messages
static WARNING_PREFIX: &str = "⚠️ ";
/// Prefix for error messages
static ERROR_PREFIX: &str = "✗ ";

/// File the debug log is written to, in the working directory.
static LOG_FILE: &str = "aliaspanel.log";

/// Command line interface configuration and argument parsing
#[derive(Parser, Debug)]
#[command(name = "aliaspanel", author, version, about = "Show your shell aliases as a tiled cheat sheet in the terminal")]
pub struct Cli {
  /// Spacing in cells between panels and around the window edges
  #[arg(short, long, default_value_t = DEFAULT_MARGIN)]
  margin: u16,

  /// Write a debug log to aliaspanel.log in the working directory
  #[arg(short, long)]
  debug: bool,
}

/// Installs a file-backed subscriber when `debug` is set.
///
/// The returned guard flushes the log on drop and must live until exit.
/// `RUST_LOG` overrides the default `debug` level.
fn setup_logging(debug: bool) -> Option<WorkerGuard> {
  if !debug {
    return None;
  }

  let appender = match RollingFileAppender::builder()
    .rotation(Rotation::NEVER)
    .filename_prefix(LOG_FILE)
    .build(".")
  {
    Ok(appender) => appender,
    Err(e) => {
      eprintln!("{} Logging disabled, could not open {LOG_FILE}: {e}", style(WARNING_PREFIX).yellow());
      return None;
    },
  };
  let (writer, guard) = tracing_appender::non_blocking(appender);

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(writer)
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .with_target(true)
    .init();

  Some(guard)
}

/// Loads the sections and runs one display session.
async fn run(cli: Cli) -> Result<()> {
  let config = Config::from_env()?.with_margin(cli.margin);
  debug!("Alias files: {:?}", config.alias_files);

  let sections = parser::parse_files(&config.alias_files)?;
  info!("Loaded {} sections", sections.len());

  let screen = TerminalScreen::acquire()?;
  display::run(screen, TerminalEvents, sections, config.margin).await?;
  Ok(())
}

/// Entry point for the aliaspanel CLI
///
/// Errors are printed with a colored prefix and the process exits with
/// status 1. The log guard is dropped first so buffered lines reach the file.
#[tokio::main]
async fn main() {
  let cli = Cli::parse();
  let guard = setup_logging(cli.debug);

  if let Err(e) = run(cli).await {
    eprintln!("{} {e}", style(ERROR_PREFIX).red());
    drop(guard);
    std::process::exit(1);
  }
}
