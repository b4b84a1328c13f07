//! Error types for the aliaspanel library.
//!
//! Two failure classes matter to callers:
//! - [`PanelError::InvalidArgument`] is a contract violation by the caller of a
//!   shaping or drawing primitive (negative sizes or positions). It is never
//!   caused by alias file contents.
//! - [`PanelError::SurfaceInit`] means the terminal could not be put into a
//!   drawable state. It is fatal: no layout is attempted.
//!
//! # Examples
//!
//! ```
//! use aliaspanel::{error::PanelError, shape::truncate};
//!
//! match truncate("hello", -1) {
//!   Err(PanelError::InvalidArgument(reason)) => println!("bad call: {reason}"),
//!   other => panic!("unexpected: {other:?}"),
//! }
//! ```

use std::{io, path::PathBuf};

use thiserror::Error;

/// Error type alias used for the [`aliaspanel`](crate) crate.
pub type Result<T> = core::result::Result<T, PanelError>;

/// Errors that can occur while loading, laying out or displaying panels.
#[derive(Error, Debug)]
pub enum PanelError {
  /// A shaping or drawing primitive received a negative size or position.
  ///
  /// The string describes which argument was rejected.
  #[error("Invalid argument: {0}")]
  InvalidArgument(String),

  /// The terminal could not be switched into raw, alternate-screen mode.
  #[error("Failed to acquire the terminal surface: {0}")]
  SurfaceInit(#[source] io::Error),

  /// An alias file could not be opened or read.
  #[error("Failed to read alias file {}: {source}", path.display())]
  Read {
    /// The file that failed
    path:   PathBuf,
    /// The underlying I/O failure
    source: io::Error,
  },

  /// Terminal I/O failed after the surface was acquired.
  #[error(transparent)]
  Io(#[from] io::Error),

  /// Alias file discovery could not run.
  #[error("{0}")]
  Config(String),

  /// The alias file discovery pattern was malformed.
  #[error(transparent)]
  Glob(#[from] glob::PatternError),

  /// The input-polling task panicked or was aborted.
  #[error(transparent)]
  Task(#[from] tokio::task::JoinError),
}

impl PanelError {
  /// Shorthand for building an [`PanelError::InvalidArgument`].
  pub(crate) fn invalid(reason: impl Into<String>) -> Self { Self::InvalidArgument(reason.into()) }
}
