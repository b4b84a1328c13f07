use super::*;

#[test]
fn test_worked_examples() -> TestResult<()> {
  assert_eq!(truncate("hello world", 8)?, "hello...");
  assert_eq!(required_height(10, &"a".repeat(25)), 3);
  Ok(())
}

#[test]
fn test_wrap_fits_box() -> TestResult<()> {
  let text = "gco: git checkout --ignore-other-worktrees";
  for width in 1..12 {
    for height in 1..6 {
      let lines = wrap_to_box(text, width, height)?;
      assert!(lines.len() <= height as usize);
      assert!(lines.iter().all(|line| line.chars().count() <= width as usize));
    }
  }
  Ok(())
}

#[test]
fn test_column_geometry() {
  assert_eq!(choose_column_count(100, MIN_PANEL_WIDTH, MAX_PANEL_WIDTH), 2);
  assert_eq!(column_width(100, 2, 2), 47);
  for width in 0..300 {
    assert!(choose_column_count(width, MIN_PANEL_WIDTH, MAX_PANEL_WIDTH) >= 1);
  }
}

#[test]
fn test_negative_geometry_is_invalid() {
  assert!(matches!(truncate("abc", -1), Err(PanelError::InvalidArgument(_))));
  assert!(matches!(wrap_to_box("abc", 3, -1), Err(PanelError::InvalidArgument(_))));
  assert!(matches!(wrap_to_box("abc", -3, 1), Err(PanelError::InvalidArgument(_))));
}
