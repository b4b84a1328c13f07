//! Column selection and greedy panel packing.
//!
//! The viewport is split into equal-width columns. Panels are taken in label
//! order and stacked top to bottom in the leftmost column until the next one
//! does not fit, then packing moves on to the next column. There is no
//! backtracking: a column that has been left is never revisited, so the result
//! is a best-effort fill rather than an optimal one. A panel that fits in no
//! column holds up every panel after it. Panels that find no room are reported
//! in [`Layout::dropped`] rather than paged or scrolled.

use super::*;
use crate::shape::required_height;

/// Narrowest viewport that is drawn at all.
pub const MIN_WINDOW_WIDTH: i32 = 10;
/// Shortest viewport that is drawn at all.
pub const MIN_WINDOW_HEIGHT: i32 = 10;
/// Preferred minimum panel width when choosing a column count.
pub const MIN_PANEL_WIDTH: i32 = 40;
/// Preferred maximum panel width when choosing a column count.
pub const MAX_PANEL_WIDTH: i32 = 50;
/// Gutter assumed by [`choose_column_count`], independent of the actual margin.
pub const ASSUMED_GUTTER: i32 = 2;
/// Narrowest column that still holds a frame and a label.
pub const MIN_COLUMN_WIDTH: i32 = 4;

/// Rows taken by a panel's top and bottom border.
const FRAME_ROWS: i32 = 2;

/// Rows at the bottom of the viewport a column's cursor may not reach.
const CURSOR_RESERVE: i32 = 2;

/// A section prepared for packing: its label and one text run per alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
  /// Label of the section this block was built from
  pub label: String,
  /// `name: command` text per alias, in name order
  pub lines: Vec<String>,
}

impl Block {
  /// Builds the block for `section`.
  pub fn from_section(section: &Section) -> Self {
    Self { label: section.label.clone(), lines: section.iter().map(Alias::display_line).collect() }
  }

  /// Blocks for every section, in label order.
  pub fn from_sections(sections: &Sections) -> Vec<Self> {
    sections.iter().map(Self::from_section).collect()
  }

  /// Rows needed for the body when wrapped at `body_width`, each line measured on its own.
  pub fn body_height(&self, body_width: usize) -> usize {
    self.lines.iter().map(|line| required_height(body_width, line)).sum()
  }

  /// Rows needed for the whole panel, frame included, in a column `column_width` wide.
  ///
  /// `column_width` must be at least 3 so the body has a positive width.
  pub fn panel_height(&self, column_width: i32) -> i32 {
    let body_width = usize::try_from(column_width - FRAME_ROWS).unwrap_or(1).max(1);
    i32::try_from(self.body_height(body_width)).unwrap_or(i32::MAX - FRAME_ROWS) + FRAME_ROWS
  }
}

/// Where one panel goes for the current frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
  /// Label of the placed section
  pub label:  String,
  /// Column of the top-left corner
  pub x:      i32,
  /// Row of the top-left corner
  pub y:      i32,
  /// Width in cells, border included
  pub width:  i32,
  /// Height in cells, border included
  pub height: i32,
}

/// Result of one packing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
  /// Number of columns the viewport was split into, 0 if nothing could be drawn
  pub columns:      i32,
  /// Width of every column
  pub column_width: i32,
  /// Panels to draw, in label order
  pub placements:   Vec<Placement>,
  /// Labels that did not fit anywhere this frame, in label order
  pub dropped:      Vec<String>,
}

impl Layout {
  /// A layout that places nothing and drops every block.
  fn nothing(blocks: &[Block]) -> Self {
    Self { dropped: blocks.iter().map(|b| b.label.clone()).collect(), ..Self::default() }
  }

  /// Whether nothing is drawn.
  pub fn is_empty(&self) -> bool { self.placements.is_empty() }
}

/// Picks how many columns a `viewport_width` wide window gets.
///
/// Both the minimum and maximum panel widths are tried against the available
/// space (the viewport less one gutter) and the denser of the two wins. A
/// window too narrow for either still gets a single column.
///
/// ```
/// use aliaspanel::layout::choose_column_count;
///
/// assert_eq!(choose_column_count(100, 40, 50), 2);
/// assert_eq!(choose_column_count(30, 40, 50), 1);
/// ```
pub fn choose_column_count(viewport_width: i32, min_width: i32, max_width: i32) -> i32 {
  let available = viewport_width - ASSUMED_GUTTER;
  let low = available / (min_width + ASSUMED_GUTTER);
  let high = available / (max_width + ASSUMED_GUTTER);
  low.max(high).max(1)
}

/// Width of each of `columns` equal columns separated and surrounded by `margin`.
///
/// ```
/// use aliaspanel::layout::column_width;
///
/// assert_eq!(column_width(100, 2, 2), 47);
/// ```
pub fn column_width(viewport_width: i32, columns: i32, margin: i32) -> i32 {
  (viewport_width - (columns + 1) * margin) / columns
}

/// Packs `blocks` into the columns of `viewport`.
///
/// Blocks are visited in the given order with a single cursor shared by all
/// columns. Each column starts `margin` rows down; a block is placed while the
/// column's cursor stays below `height - 2` after it, otherwise the column is
/// closed and the block is tried at the top of the next column. Whatever is
/// left when the columns run out is dropped, including a block too tall for
/// any column and everything behind it.
pub fn pack(blocks: &[Block], viewport: Viewport, margin: u16) -> Layout {
  let (width, height) = (i32::from(viewport.width), i32::from(viewport.height));
  let margin = i32::from(margin);

  if width < MIN_WINDOW_WIDTH || height < MIN_WINDOW_HEIGHT {
    debug!("Viewport {width}x{height} is below the minimum, nothing to draw");
    return Layout::nothing(blocks);
  }

  let columns = choose_column_count(width, MIN_PANEL_WIDTH, MAX_PANEL_WIDTH);
  let panel_width = column_width(width, columns, margin);
  if panel_width < MIN_COLUMN_WIDTH {
    debug!("Column width {panel_width} is too narrow for panels, nothing to draw");
    return Layout::nothing(blocks);
  }

  let cursor_limit = height - CURSOR_RESERVE;
  let mut layout = Layout { columns, column_width: panel_width, ..Layout::default() };
  let mut pending = blocks.iter().peekable();

  for column in 0..columns {
    let x = margin + (panel_width + margin) * column;
    let mut y = margin;

    while let Some(&block) = pending.peek() {
      let panel_height = block.panel_height(panel_width);
      if y + panel_height < cursor_limit {
        trace!("Placing <{}> at ({x}, {y}), {panel_width}x{panel_height}", block.label);
        layout.placements.push(Placement {
          label: block.label.clone(),
          x,
          y,
          width: panel_width,
          height: panel_height,
        });
        y += panel_height;
        pending.next();
      } else {
        trace!("Column {column} is full at row {y}, <{}> needs {panel_height} rows", block.label);
        break;
      }
    }
  }

  layout.dropped.extend(pending.map(|block| block.label.clone()));
  layout
}
