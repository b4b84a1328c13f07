//! The cell surface capability that panels are drawn onto.
//!
//! Rendering never talks to the terminal directly. It only needs to know the
//! [`Viewport`] and to place one glyph per cell, which is what [`Surface`]
//! offers. [`Screen`] adds the lifecycle operations the display controller
//! needs, and [`EventSource`] supplies key and resize events.
//!
//! [`GridSurface`] and [`ScriptedEvents`] are in-memory implementations used
//! for headless rendering and tests; [`crate::terminal`] has the real ones.

use std::collections::VecDeque;

use super::*;

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Viewport {
  /// Columns
  pub width:  u16,
  /// Rows
  pub height: u16,
}

impl Viewport {
  /// Creates a viewport of `width` x `height` cells.
  pub const fn new(width: u16, height: u16) -> Self { Self { width, height } }
}

/// Something glyphs can be placed on, one per cell.
pub trait Surface {
  /// Current dimensions.
  fn size(&self) -> Viewport;

  /// Places `glyph` at column `x`, row `y`. Cells outside [`Surface::size`] are ignored.
  fn set_cell(&mut self, x: u16, y: u16, glyph: char, style: Style);
}

/// A [`Surface`] with an owned lifecycle: buffered output, clearing and teardown.
pub trait Screen: Surface {
  /// Flushes buffered cells to the display.
  fn present(&mut self) -> Result<()>;

  /// Blanks every cell. Takes effect on the next [`Screen::present`].
  fn clear(&mut self);

  /// Forgets what the display is believed to show so the next
  /// [`Screen::present`] repaints every cell.
  fn resync(&mut self) -> Result<()>;

  /// Adopts new dimensions after the window was resized.
  fn resize(&mut self, viewport: Viewport) -> Result<()>;

  /// Gives the display back, restoring whatever state it was in before.
  fn release(self) -> Result<()>
  where Self: Sized;
}

/// Events the display controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
  /// A printable key was pressed
  Key(char),
  /// The redraw key (Ctrl-L) was pressed
  Redraw,
  /// The window changed size
  Resize(Viewport),
  /// Anything else, ignored
  Other,
}

/// A blocking stream of [`SurfaceEvent`]s.
pub trait EventSource {
  /// Waits for the next event. `Ok(None)` means no more events will arrive.
  fn next_event(&mut self) -> Result<Option<SurfaceEvent>>;
}

/// One cell of a [`GridSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
  /// Glyph shown in the cell
  pub glyph: char,
  /// Style the glyph was drawn with
  pub style: Style,
}

impl Default for GridCell {
  fn default() -> Self { Self { glyph: ' ', style: Style::default() } }
}

/// An in-memory [`Screen`].
///
/// Cells are written straight into a grid; presenting only counts frames.
#[derive(Debug, Clone)]
pub struct GridSurface {
  /// Current dimensions
  viewport: Viewport,
  /// Row-major cells
  cells:    Vec<GridCell>,
  /// Number of completed [`Screen::present`] calls
  presents: usize,
  /// Number of [`Screen::resync`] calls
  resyncs:  usize,
}

impl GridSurface {
  /// Creates a blank grid.
  pub fn new(viewport: Viewport) -> Self {
    Self {
      viewport,
      cells: vec![GridCell::default(); usize::from(viewport.width) * usize::from(viewport.height)],
      presents: 0,
      resyncs: 0,
    }
  }

  /// Index of `(x, y)` in `cells`, if inside the grid.
  fn index(&self, x: u16, y: u16) -> Option<usize> {
    (x < self.viewport.width && y < self.viewport.height)
      .then(|| usize::from(y) * usize::from(self.viewport.width) + usize::from(x))
  }

  /// The cell at `(x, y)`.
  pub fn cell(&self, x: u16, y: u16) -> Option<&GridCell> { self.index(x, y).map(|i| &self.cells[i]) }

  /// Row `y` as a string, trailing blanks included.
  pub fn row(&self, y: u16) -> String {
    (0..self.viewport.width).filter_map(|x| self.cell(x, y)).map(|cell| cell.glyph).collect()
  }

  /// All rows joined with newlines, trailing blanks trimmed.
  pub fn contents(&self) -> String {
    (0..self.viewport.height).map(|y| self.row(y).trim_end().to_string()).collect::<Vec<_>>().join("\n")
  }

  /// Whether every cell is blank.
  pub fn is_blank(&self) -> bool { self.cells.iter().all(|cell| cell.glyph == ' ') }

  /// Number of frames presented so far.
  pub fn presents(&self) -> usize { self.presents }

  /// Number of resyncs requested so far.
  pub fn resyncs(&self) -> usize { self.resyncs }
}

impl Surface for GridSurface {
  fn size(&self) -> Viewport { self.viewport }

  fn set_cell(&mut self, x: u16, y: u16, glyph: char, style: Style) {
    if let Some(i) = self.index(x, y) {
      self.cells[i] = GridCell { glyph, style };
    }
  }
}

impl Screen for GridSurface {
  fn present(&mut self) -> Result<()> {
    self.presents += 1;
    Ok(())
  }

  fn clear(&mut self) { self.cells.fill(GridCell::default()); }

  fn resync(&mut self) -> Result<()> {
    self.resyncs += 1;
    Ok(())
  }

  fn resize(&mut self, viewport: Viewport) -> Result<()> {
    *self = Self { presents: self.presents, resyncs: self.resyncs, ..Self::new(viewport) };
    Ok(())
  }

  fn release(self) -> Result<()> {
    debug!("Released grid surface after {} frames", self.presents);
    Ok(())
  }
}

/// An [`EventSource`] that replays a fixed list of events, then ends.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEvents(VecDeque<SurfaceEvent>);

impl ScriptedEvents {
  /// Creates a source that yields `events` in order.
  pub fn new(events: impl IntoIterator<Item = SurfaceEvent>) -> Self {
    Self(events.into_iter().collect())
  }

  /// Events not yet consumed.
  pub fn remaining(&self) -> usize { self.0.len() }
}

impl EventSource for ScriptedEvents {
  fn next_event(&mut self) -> Result<Option<SurfaceEvent>> { Ok(self.0.pop_front()) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_grid_clips_out_of_bounds() {
    let mut grid = GridSurface::new(Viewport::new(3, 2));
    grid.set_cell(0, 0, 'a', Style::default());
    grid.set_cell(3, 0, 'b', Style::default());
    grid.set_cell(0, 2, 'c', Style::default());
    assert_eq!(grid.row(0), "a  ");
    assert_eq!(grid.contents(), "a\n");
  }

  #[test]
  fn test_grid_clear_and_resize() {
    let mut grid = GridSurface::new(Viewport::new(4, 4));
    grid.set_cell(1, 1, 'x', Style::default().fg(Color::Red));
    assert_eq!(grid.cell(1, 1).unwrap().style.fg, Some(Color::Red));
    grid.clear();
    assert!(grid.is_blank());

    grid.present().unwrap();
    grid.resize(Viewport::new(6, 2)).unwrap();
    assert_eq!(grid.size(), Viewport::new(6, 2));
    assert_eq!(grid.row(1), "      ");
    assert_eq!(grid.presents(), 1);
  }

  #[test]
  fn test_scripted_events_end() {
    let mut events = ScriptedEvents::new([SurfaceEvent::Key('x'), SurfaceEvent::Redraw]);
    assert_eq!(events.next_event().unwrap(), Some(SurfaceEvent::Key('x')));
    assert_eq!(events.remaining(), 1);
    assert_eq!(events.next_event().unwrap(), Some(SurfaceEvent::Redraw));
    assert_eq!(events.next_event().unwrap(), None);
  }
}
