//! Text measurement, truncation and wrapping.
//!
//! Lengths here are counted in characters. Geometry arguments are signed so
//! that a negative size computed by a caller surfaces as
//! [`PanelError::InvalidArgument`] instead of wrapping around.

use super::*;

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Width of [`ELLIPSIS`] in characters.
const ELLIPSIS_LEN: usize = 3;

/// Number of lines `text` occupies when broken into lines of `width` characters.
///
/// `width` must be at least 1.
///
/// # Examples
///
/// ```
/// use aliaspanel::shape::required_height;
///
/// assert_eq!(required_height(10, &"a".repeat(25)), 3);
/// assert_eq!(required_height(10, ""), 0);
/// ```
pub fn required_height(width: usize, text: &str) -> usize {
  debug_assert!(width > 0, "required_height needs a positive width");
  text.chars().count().div_ceil(width)
}

/// Converts a signed size into a `usize`, rejecting negatives.
fn non_negative(value: i32, what: &str) -> Result<usize> {
  usize::try_from(value).map_err(|_| PanelError::invalid(format!("{what} cannot be negative ({value})")))
}

/// Shortens `text` to at most `max_width` characters.
///
/// Text that already fits is returned unchanged. Otherwise the result is
/// exactly `max_width` characters long and ends in [`ELLIPSIS`], unless
/// `max_width` is below 3, in which case the first `max_width` characters are
/// returned without a marker.
///
/// # Errors
///
/// [`PanelError::InvalidArgument`] if `max_width` is negative.
///
/// # Examples
///
/// ```
/// use aliaspanel::shape::truncate;
///
/// assert_eq!(truncate("hello world", 8).unwrap(), "hello...");
/// assert_eq!(truncate("hello", 8).unwrap(), "hello");
/// assert_eq!(truncate("hello", 2).unwrap(), "he");
/// ```
pub fn truncate(text: &str, max_width: i32) -> Result<String> {
  let max_width = non_negative(max_width, "max width")?;
  if text.chars().count() <= max_width {
    return Ok(text.to_string());
  }
  if max_width < ELLIPSIS_LEN {
    return Ok(text.chars().take(max_width).collect());
  }

  let mut shortened: String = text.chars().take(max_width - ELLIPSIS_LEN).collect();
  shortened.push_str(ELLIPSIS);
  Ok(shortened)
}

/// Breaks `text` into lines of `width` characters that fit a `width` x `height` box.
///
/// The text is first truncated to `width * height` characters, so overflowing
/// text ends in an ellipsis on the last line. The final line may be shorter
/// than `width`; no empty lines are ever produced.
///
/// # Errors
///
/// [`PanelError::InvalidArgument`] if `width` or `height` is negative.
///
/// # Examples
///
/// ```
/// use aliaspanel::shape::wrap_to_box;
///
/// assert_eq!(wrap_to_box("abcdefg", 3, 5).unwrap(), vec!["abc", "def", "g"]);
/// assert_eq!(wrap_to_box("abcdefghij", 3, 2).unwrap(), vec!["abc", "..."]);
/// ```
pub fn wrap_to_box(text: &str, width: i32, height: i32) -> Result<Vec<String>> {
  let columns = non_negative(width, "width")?;
  let rows = non_negative(height, "height")?;
  if columns == 0 || rows == 0 {
    return Ok(Vec::new());
  }

  let capacity = i32::try_from(columns.saturating_mul(rows)).unwrap_or(i32::MAX);
  let fitted: Vec<char> = truncate(text, capacity)?.chars().collect();
  Ok(fitted.chunks(columns).map(|line| line.iter().collect()).collect())
}
