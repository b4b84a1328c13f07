use super::*;

#[traced_test]
#[test]
fn test_parse_files_merges_in_order() -> TestResult<()> {
  let (_dir, paths) = alias_files(&[("git_aliases", GIT_ALIASES), ("more_aliases", MORE_ALIASES)]);
  let sections = parser::parse_files(&paths)?;

  assert_eq!(sections.labels().collect::<Vec<_>>(), vec!["Aliases", "Git"]);

  let git = sections.get("Git").unwrap();
  let names: Vec<_> = git.iter().map(|alias| alias.name.as_str()).collect();
  assert_eq!(names, vec!["gd", "gs"]);
  assert_eq!(git.aliases["gs"].command, "git status --short");
  assert_eq!(git.aliases["gd"].description.as_deref(), Some("show unstaged changes"));

  assert_eq!(sections.get("Aliases").unwrap().aliases["ll"].command, "ls -alF");
  Ok(())
}

#[test]
fn test_parse_files_later_file_wins() -> TestResult<()> {
  let (_dir, paths) = alias_files(&[("more_aliases", MORE_ALIASES), ("git_aliases", GIT_ALIASES)]);
  let sections = parser::parse_files(&paths)?;
  assert_eq!(sections.get("Git").unwrap().aliases["gs"].command, "git status");
  Ok(())
}

#[test]
fn test_parse_files_missing_file() {
  let (dir, mut paths) = alias_files(&[("git_aliases", GIT_ALIASES)]);
  let missing = dir.path().join("missing_aliases");
  paths.push(missing.clone());

  match parser::parse_files(&paths) {
    Err(PanelError::Read { path, .. }) => assert_eq!(path, missing),
    other => panic!("expected a read error, got {other:?}"),
  }
}

#[test]
fn test_parse_files_nothing_usable() -> TestResult<()> {
  let (_dir, paths) = alias_files(&[("empty_aliases", "# SECTION: Nothing\nexport A=b\n")]);
  assert!(parser::parse_files(&paths)?.is_empty());
  assert!(parser::parse_files(&[])?.is_empty());
  Ok(())
}

#[test]
fn test_home_discovery_feeds_parser() -> TestResult<()> {
  let (dir, _) = alias_files(&[
    (".bash_aliases", "alias ll='ls -alF'\n"),
    ("git_aliases", GIT_ALIASES),
    ("README", "alias nope='no'\n"),
  ]);
  let config = Config::default().with_alias_files(Config::home_alias_files(dir.path())?);
  assert_eq!(config.alias_files.len(), 2);

  let sections = parser::parse_files(&config.alias_files)?;
  assert_eq!(sections.labels().collect::<Vec<_>>(), vec!["Aliases", "Git"]);
  assert!(sections.get("Aliases").unwrap().aliases.get("nope").is_none());
  Ok(())
}
