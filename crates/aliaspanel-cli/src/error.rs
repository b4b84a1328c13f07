//! Error types for the aliaspanel command line tool.

use aliaspanel::error::PanelError;
use thiserror::Error;

/// Error type alias used for the CLI.
pub type Result<T> = core::result::Result<T, CliError>;

/// Errors surfaced to the user before the process exits.
#[derive(Error, Debug)]
pub enum CliError {
  /// Loading, laying out or displaying the panels failed
  #[error(transparent)]
  Panel(#[from] PanelError),

  /// Standard I/O failed outside the library
  #[error(transparent)]
  Io(#[from] std::io::Error),
}
