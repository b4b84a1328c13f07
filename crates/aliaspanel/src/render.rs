//! Drawing panels onto a [`Surface`].
//!
//! Every function here is a pure mapping from position, size and content to
//! [`Surface::set_cell`] calls. Nothing is remembered between calls; a full
//! frame is produced by [`draw_screen`], which packs the sections and draws
//! each placed panel.

use unicode_width::UnicodeWidthChar;

use super::*;
use crate::{
  layout::{pack, Block, Layout, Placement, MIN_COLUMN_WIDTH},
  shape::{required_height, truncate, wrap_to_box},
};

/// Style for panel borders and alias text.
pub const FRAME_STYLE: Style = Style::new().fg(Color::White);

/// Style for panel labels.
pub const LABEL_STYLE: Style = Style::new().fg(Color::Red);

/// Hint shown in the top-right corner of every drawn frame.
pub const HELP_MESSAGE: &str = "Press [Q]uit to exit";

/// Border glyphs.
const HORIZONTAL: char = '─';
const VERTICAL: char = '│';
const TOP_LEFT: char = '┌';
const TOP_RIGHT: char = '┐';
const BOTTOM_LEFT: char = '└';
const BOTTOM_RIGHT: char = '┘';

/// Sets one cell, silently skipping coordinates the surface cannot address.
fn put(surface: &mut impl Surface, x: i32, y: i32, glyph: char, style: Style) {
  if let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) {
    surface.set_cell(x, y, glyph, style);
  }
}

/// Rejects negative geometry.
fn check_non_negative(values: &[(&str, i32)]) -> Result<()> {
  match values.iter().find(|(_, value)| *value < 0) {
    Some((name, value)) => Err(PanelError::invalid(format!("{name} cannot be negative ({value})"))),
    None => Ok(()),
  }
}

/// Writes `text` left to right from `(x, y)`, advancing by each character's display width.
///
/// Zero-width characters take one cell and are shown as a blank. Returns the
/// column after the last character.
pub fn emit_str(surface: &mut impl Surface, x: i32, y: i32, style: Style, text: &str) -> i32 {
  let mut x = x;
  for c in text.chars() {
    let (glyph, width) = match c.width() {
      Some(width) if width > 0 => (c, width),
      _ => (' ', 1),
    };
    put(surface, x, y, glyph, style);
    x += i32::try_from(width).unwrap_or(1);
  }
  x
}

/// Draws a `width` x `height` border with its top-left corner at `(x, y)`.
///
/// The interior is left untouched.
///
/// # Errors
///
/// [`PanelError::InvalidArgument`] if any argument is negative.
pub fn draw_frame(
  surface: &mut impl Surface,
  x: i32,
  y: i32,
  width: i32,
  height: i32,
  style: Style,
) -> Result<()> {
  check_non_negative(&[("x", x), ("y", y), ("width", width), ("height", height)])?;
  if width == 0 || height == 0 {
    return Ok(());
  }

  let (right, bottom) = (x + width - 1, y + height - 1);
  for col in x..=right {
    put(surface, col, y, HORIZONTAL, style);
    put(surface, col, bottom, HORIZONTAL, style);
  }
  for row in y + 1..bottom {
    put(surface, x, row, VERTICAL, style);
    put(surface, right, row, VERTICAL, style);
  }
  put(surface, x, y, TOP_LEFT, style);
  put(surface, right, y, TOP_RIGHT, style);
  put(surface, x, bottom, BOTTOM_LEFT, style);
  put(surface, right, bottom, BOTTOM_RIGHT, style);
  Ok(())
}

/// Draws `[label]` centred on row `y` within the `width` cells starting at `x`.
///
/// The label is truncated to `width - 4` characters, leaving room for the
/// brackets and at least one cell of padding on each side. Odd leftover space
/// puts the extra cell on the right.
///
/// # Errors
///
/// [`PanelError::InvalidArgument`] if `x` or `y` is negative or `width` is below 4.
pub fn draw_label(surface: &mut impl Surface, x: i32, y: i32, width: i32, label: &str) -> Result<()> {
  check_non_negative(&[("x", x), ("y", y)])?;
  let label = format!("[{}]", truncate(label, width - 4)?);
  let label_len = i32::try_from(label.chars().count()).unwrap_or(width);
  let padding = (width - label_len) / 2;
  emit_str(surface, x + padding, y, LABEL_STYLE, &label);
  Ok(())
}

/// Draws a full panel for `section`: frame, label, then one wrapped entry per alias.
///
/// Aliases are drawn in name order. As soon as the next alias would reach the
/// bottom border, it and every alias after it are left out. Returns how many
/// aliases were drawn.
///
/// # Errors
///
/// [`PanelError::InvalidArgument`] if any argument is negative or the panel is
/// too narrow for a label. Nothing is drawn in that case.
pub fn draw_section(
  surface: &mut impl Surface,
  x: i32,
  y: i32,
  width: i32,
  height: i32,
  section: &Section,
) -> Result<usize> {
  check_non_negative(&[("x", x), ("y", y), ("width", width), ("height", height)])?;
  if width < MIN_COLUMN_WIDTH {
    return Err(PanelError::invalid(format!("panel width {width} leaves no room for a label")));
  }
  draw_frame(surface, x, y, width, height, FRAME_STYLE)?;
  draw_label(surface, x, y, width, &section.label)?;

  let body_x = x + 1;
  let body_width = width - 2;
  let measure_width = usize::try_from(body_width).unwrap_or(1).max(1);
  let mut body_y = y + 1;
  let mut drawn = 0;

  for alias in section.iter() {
    let text = alias.display_line();
    let rows = i32::try_from(required_height(measure_width, &text)).unwrap_or(i32::MAX - body_y);
    if body_y + rows - y >= height {
      trace!("Section <{}> is full, {} aliases hidden", section.label, section.len() - drawn);
      break;
    }

    match wrap_to_box(&text, body_width, rows) {
      Ok(lines) =>
        for (row, line) in (body_y..).zip(lines) {
          emit_str(surface, body_x, row, FRAME_STYLE, &line);
        },
      Err(e) => error!("draw_section: Could not wrap alias {} ({e})", alias.name),
    }
    body_y += rows;
    drawn += 1;
  }

  Ok(drawn)
}

/// Draws the panel for each placement. Returns how many panels were drawn.
///
/// A placement that cannot be drawn, because its section is unknown or its
/// geometry is rejected, is logged and skipped; the others are still drawn.
pub fn draw_placements(surface: &mut impl Surface, sections: &Sections, placements: &[Placement]) -> usize {
  let mut drawn = 0;
  for placement in placements {
    let Some(section) = sections.get(&placement.label) else {
      error!("draw_placements: No section named <{}>", placement.label);
      continue;
    };
    match draw_section(surface, placement.x, placement.y, placement.width, placement.height, section) {
      Ok(_) => drawn += 1,
      Err(e) => error!("draw_placements: Failed to draw section <{}> ({e})", placement.label),
    }
  }
  drawn
}

/// Draws a complete frame for `sections` on `surface`.
///
/// The sections are packed for the surface's current size and each placed
/// panel is drawn. A panel that fails to draw is logged and skipped; the rest
/// of the frame is still drawn. When the surface is below the minimum size
/// nothing at all is drawn. Returns the layout that was used.
pub fn draw_screen(surface: &mut impl Surface, sections: &Sections, margin: u16) -> Layout {
  let viewport = surface.size();
  let layout = pack(&Block::from_sections(sections), viewport, margin);
  if layout.columns == 0 {
    return layout;
  }

  let hint_len = i32::try_from(HELP_MESSAGE.chars().count()).unwrap_or(0);
  emit_str(surface, i32::from(viewport.width) - hint_len, 0, FRAME_STYLE, HELP_MESSAGE);

  draw_placements(surface, sections, &layout.placements);

  if !layout.dropped.is_empty() {
    warn!("{} sections did not fit: {:?}", layout.dropped.len(), layout.dropped);
  }
  debug!(
    "Drew {} panels in {} columns of width {} for {}x{}",
    layout.placements.len(),
    layout.columns,
    layout.column_width,
    viewport.width,
    viewport.height
  );
  layout
}
