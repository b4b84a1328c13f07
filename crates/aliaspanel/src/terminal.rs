//! The real terminal, driven through crossterm.
//!
//! [`TerminalScreen`] keeps two ratatui [`Buffer`]s: the cells drawn for the
//! frame being built and the cells last written to the terminal. Presenting
//! writes only the difference. [`TerminalEvents`] turns crossterm's blocking
//! event reader into [`SurfaceEvent`]s.

use std::io::{self, Stdout};

use crossterm::{
  cursor,
  event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
  execute,
  terminal::{self as term, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
  backend::{Backend, CrosstermBackend},
  buffer::Buffer,
  layout::Rect,
};

use super::*;

/// A [`Screen`] on the process's controlling terminal.
///
/// Acquiring it switches the terminal to raw mode on the alternate screen;
/// [`Screen::release`] switches back. Dropping an unreleased screen, for
/// example while unwinding from a panic, switches back as well.
pub struct TerminalScreen {
  /// Output side of the terminal
  backend:  CrosstermBackend<Stdout>,
  /// Cells of the frame being drawn
  current:  Buffer,
  /// Cells the terminal is believed to show
  previous: Buffer,
  /// Whether the terminal is still in raw mode on the alternate screen
  acquired: bool,
}

impl TerminalScreen {
  /// Takes over the terminal.
  ///
  /// # Errors
  ///
  /// [`PanelError::SurfaceInit`] if the size cannot be read or the terminal
  /// cannot be switched to raw mode on the alternate screen.
  pub fn acquire() -> Result<Self> { Self::init().map_err(PanelError::SurfaceInit) }

  /// Raw-mode and alternate-screen setup.
  fn init() -> io::Result<Self> {
    let (width, height) = term::size()?;
    term::enable_raw_mode()?;

    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, cursor::Hide) {
      // Leave the shell usable if the screen switch fails halfway.
      let _ = term::disable_raw_mode();
      return Err(e);
    }

    let area = Rect::new(0, 0, width, height);
    info!("Acquired terminal surface of {width}x{height}");
    Ok(Self {
      backend:  CrosstermBackend::new(stdout),
      current:  Buffer::empty(area),
      previous: Buffer::empty(area),
      acquired: true,
    })
  }

  /// Leaves raw mode and the alternate screen, once.
  fn restore(&mut self) -> io::Result<()> {
    if !self.acquired {
      return Ok(());
    }
    self.acquired = false;
    term::disable_raw_mode()?;
    execute!(self.backend, LeaveAlternateScreen, cursor::Show)
  }
}

impl Drop for TerminalScreen {
  fn drop(&mut self) {
    if self.acquired {
      warn!("Terminal surface dropped without release, restoring");
      if let Err(e) = self.restore() {
        error!("Failed to restore terminal: {e}");
      }
    }
  }
}

impl Surface for TerminalScreen {
  fn size(&self) -> Viewport { Viewport::new(self.current.area.width, self.current.area.height) }

  fn set_cell(&mut self, x: u16, y: u16, glyph: char, style: Style) {
    if let Some(cell) = self.current.cell_mut((x, y)) {
      cell.set_char(glyph).set_style(style);
    }
  }
}

impl Screen for TerminalScreen {
  fn present(&mut self) -> Result<()> {
    let updates = self.previous.diff(&self.current);
    trace!("Presenting {} changed cells", updates.len());
    self.backend.draw(updates.into_iter())?;
    Backend::flush(&mut self.backend)?;
    self.previous = self.current.clone();
    Ok(())
  }

  fn clear(&mut self) { self.current.reset(); }

  fn resync(&mut self) -> Result<()> {
    self.backend.clear()?;
    self.previous = Buffer::empty(self.current.area);
    Ok(())
  }

  fn resize(&mut self, viewport: Viewport) -> Result<()> {
    let area = Rect::new(0, 0, viewport.width, viewport.height);
    self.current.resize(area);
    self.previous.resize(area);
    Ok(())
  }

  fn release(mut self) -> Result<()> {
    self.restore()?;
    info!("Released terminal surface");
    Ok(())
  }
}

/// Blocking key and resize events from the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
  fn next_event(&mut self) -> Result<Option<SurfaceEvent>> {
    let event = match event::read()? {
      Event::Key(key) if key.kind == KeyEventKind::Press => translate_key(key),
      Event::Resize(width, height) => SurfaceEvent::Resize(Viewport::new(width, height)),
      _ => SurfaceEvent::Other,
    };
    Ok(Some(event))
  }
}

/// Maps a key press to a [`SurfaceEvent`]. Ctrl-L is the redraw key.
pub fn translate_key(key: KeyEvent) -> SurfaceEvent {
  match key.code {
    KeyCode::Char('l' | 'L') if key.modifiers.contains(KeyModifiers::CONTROL) => SurfaceEvent::Redraw,
    KeyCode::Char(c) => SurfaceEvent::Key(c),
    _ => SurfaceEvent::Other,
  }
}
