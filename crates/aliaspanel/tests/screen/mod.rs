use super::*;

fn sample_sections() -> (TempDir, Sections) {
  let (dir, paths) = alias_files(&[("git_aliases", GIT_ALIASES), ("more_aliases", MORE_ALIASES)]);
  let sections = parser::parse_files(&paths).unwrap();
  (dir, sections)
}

fn lettered_sections(count: u8, aliases: usize) -> Sections {
  (0..count)
    .map(|i| {
      let label = char::from(b'A' + i).to_string();
      (0..aliases).fold(Section::new(label), |section, n| {
        section.with_alias(Alias::new(format!("a{n}"), "echo"))
      })
    })
    .collect()
}

#[traced_test]
#[test]
fn test_parsed_files_drawn_in_two_columns() {
  let (_dir, sections) = sample_sections();
  let mut surface = GridSurface::new(Viewport::new(100, 20));
  let layout = draw_screen(&mut surface, &sections, 2);

  assert_eq!(layout.columns, 2);
  assert_eq!(layout.column_width, 47);
  let origins: Vec<_> = layout.placements.iter().map(|p| (p.label.as_str(), p.x, p.y)).collect();
  assert_eq!(origins, vec![("Aliases", 2, 2), ("Git", 2, 5)]);

  assert!(surface.row(0).ends_with(HELP_MESSAGE));
  assert!(surface.row(2).contains("[Aliases]"));
  assert!(surface.row(3).starts_with("  │ll: ls -alF"));
  assert!(surface.row(5).contains("[Git]"));
  assert!(surface.row(6).starts_with("  │gd: git diff"));
  assert!(surface.row(7).starts_with("  │gs: git status --short"));
  assert!(surface.row(8).starts_with("  └"));
}

#[traced_test]
#[test]
fn test_overflow_is_dropped_not_scrolled() {
  // one column of width 26, cursor limit 8: each panel is 4 rows tall
  let sections = lettered_sections(3, 2);
  let mut surface = GridSurface::new(Viewport::new(30, 10));
  let layout = draw_screen(&mut surface, &sections, 2);

  assert_eq!(layout.columns, 1);
  assert_eq!(layout.placements.len(), 1);
  assert_eq!(layout.dropped, vec!["B".to_string(), "C".to_string()]);
  for y in 6..10 {
    assert_eq!(surface.row(y).trim(), "", "row {y}");
  }
}

#[test]
fn test_narrow_window_is_empty_frame() {
  let (_dir, sections) = sample_sections();
  let mut surface = GridSurface::new(Viewport::new(5, 40));
  let layout = draw_screen(&mut surface, &sections, 2);
  assert!(layout.is_empty());
  assert!(surface.is_blank());
}

#[traced_test]
#[test]
fn test_display_reflows_on_resize() -> TestResult<()> {
  let sections = lettered_sections(4, 3);
  let mut display = Display::new(GridSurface::new(Viewport::new(50, 12)), sections, 2);

  // 5-row panels in one column: only A keeps the cursor below row 10
  let narrow = display.layout()?;
  assert_eq!(narrow.placements.len(), 1);

  display.handle_event(SurfaceEvent::Resize(Viewport::new(200, 12)))?;
  let wide = display.layout()?;
  assert_eq!(wide.columns, 4);
  assert_eq!(wide.placements.len(), 4);
  assert!(wide.dropped.is_empty());
  assert!(wide.placements.iter().all(|p| p.y == 2));
  Ok(())
}

#[traced_test]
#[tokio::test]
async fn test_session_runs_until_quit() -> TestResult<()> {
  let (_dir, sections) = sample_sections();
  let events = ScriptedEvents::new([
    SurfaceEvent::Key('j'),
    SurfaceEvent::Resize(Viewport::new(9, 9)),
    SurfaceEvent::Resize(Viewport::new(120, 40)),
    SurfaceEvent::Key('q'),
  ]);
  display::run(GridSurface::new(Viewport::new(80, 24)), events, sections, 2).await?;
  Ok(())
}

#[test]
fn test_quit_state_is_terminal() -> TestResult<()> {
  let mut display = Display::new(GridSurface::new(Viewport::new(80, 24)), Sections::new(), 2);
  assert_eq!(display.handle_event(SurfaceEvent::Key('Q'))?, DisplayState::Draining);
  assert_eq!(display.handle_event(SurfaceEvent::Key('x'))?, DisplayState::Draining);
  Ok(())
}
