//! Terminal cheat sheet for shell aliases.
//!
//! `aliaspanel` reads alias definitions grouped into labelled sections and tiles
//! them across the terminal as boxed panels, re-flowing the layout whenever the
//! window is resized. It provides:
//!
//! - Alias file ingestion with section headers and cross-file merging
//! - Text shaping: measuring, truncating and wrapping text into fixed boxes
//! - A greedy column packer that fits panels into the current viewport
//! - Box drawing onto an abstract cell surface
//! - A display controller driving a crossterm terminal
//!
//! # Getting Started
//!
//! ```no_run
//! use aliaspanel::{
//!   display,
//!   parser,
//!   terminal::{TerminalEvents, TerminalScreen},
//!   Config,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let config = Config::from_env()?.with_margin(2);
//!   let sections = parser::parse_files(&config.alias_files)?;
//!
//!   let screen = TerminalScreen::acquire()?;
//!   display::run(screen, TerminalEvents, sections, config.margin).await?;
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`section`]: Aliases, sections and the ordered section collection
//! - [`parser`]: Alias file parsing and merging
//! - [`shape`]: Text measurement, truncation and wrapping
//! - [`layout`]: Column count selection and greedy panel packing
//! - [`render`]: Frames, labels and section panels drawn onto a [`surface::Surface`]
//! - [`surface`]: The cell surface capability and an in-memory implementation
//! - [`terminal`]: The crossterm-backed surface and event source
//! - [`display`]: The resize-driven display controller

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  collections::BTreeMap,
  env,
  path::{Path, PathBuf},
};

use lazy_static::lazy_static;
use ratatui::style::{Color, Style};
use regex::Regex;
use tracing::{debug, error, info, trace, warn};
#[cfg(test)]
use {tempfile::tempdir, tracing_test::traced_test};

pub mod display;
pub mod error;
pub mod layout;
pub mod parser;
pub mod render;
pub mod section;
pub mod shape;
pub mod surface;
pub mod terminal;

use crate::{error::*, section::*, surface::*};

/// Environment variable holding an explicit list of alias files.
pub const ALIAS_FILES_VAR: &str = "ALIASFILES";

/// Glob matched against the home directory when [`ALIAS_FILES_VAR`] is unset.
pub const HOME_ALIAS_PATTERN: &str = "*_aliases";

/// Margin between panels and the viewport edges when none is given.
pub const DEFAULT_MARGIN: u16 = 2;

/// Runtime configuration for a panel session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  /// Spacing in cells between panels and the viewport edges
  pub margin:      u16,
  /// Files to read alias definitions from, in merge order
  pub alias_files: Vec<PathBuf>,
}

impl Default for Config {
  fn default() -> Self { Self { margin: DEFAULT_MARGIN, alias_files: Vec::new() } }
}

impl Config {
  /// Builds a configuration whose alias files are discovered from the environment.
  ///
  /// `$ALIASFILES` takes precedence and is split like `$PATH`. Otherwise every
  /// file in the home directory matching `*_aliases` is used, dot-files
  /// included, in path order.
  ///
  /// # Errors
  ///
  /// Returns [`PanelError::Config`] when `$ALIASFILES` is unset and no home
  /// directory can be determined.
  pub fn from_env() -> Result<Self> {
    let alias_files = match env::var_os(ALIAS_FILES_VAR) {
      Some(paths) if !paths.is_empty() => {
        let files: Vec<PathBuf> = env::split_paths(&paths).collect();
        debug!("Using {} alias files from ${ALIAS_FILES_VAR}", files.len());
        files
      },
      _ => {
        let home = dirs::home_dir()
          .ok_or_else(|| PanelError::Config("Could not determine the home directory".into()))?;
        Self::home_alias_files(&home)?
      },
    };
    Ok(Self { alias_files, ..Self::default() })
  }

  /// Lists the `*_aliases` files directly inside `dir`, sorted by path.
  pub fn home_alias_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = dir.join(HOME_ALIAS_PATTERN);
    let mut files: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())?
      .filter_map(|entry| match entry {
        Ok(path) if path.is_file() => Some(path),
        Ok(_) => None,
        Err(e) => {
          warn!("Skipping unreadable alias file candidate: {e}");
          None
        },
      })
      .collect();
    files.sort();
    debug!("Found {} alias files in {}", files.len(), dir.display());
    Ok(files)
  }

  /// Sets the panel margin.
  pub fn with_margin(mut self, margin: u16) -> Self {
    self.margin = margin;
    self
  }

  /// Replaces the list of alias files.
  pub fn with_alias_files(mut self, files: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
    self.alias_files = files.into_iter().map(Into::into).collect();
    self
  }
}

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use aliaspanel::prelude::*;
///
/// fn count(sections: &Sections) -> Result<usize, PanelError> { Ok(sections.len()) }
/// ```
pub mod prelude {
  pub use crate::{
    error::PanelError,
    section::{Alias, Section, Sections},
    surface::{EventSource, Screen, Surface},
  };
}
