//! Alias file parsing.
//!
//! Alias files are ordinary shell scripts. Two kinds of lines are recognised:
//!
//! ```text
//! # SECTION: Git
//! alias gs='git status'          # short status
//! alias gp="git push"
//! ```
//!
//! A `# SECTION: <label>` comment opens (or re-opens) a section, and every
//! `alias` line that follows is added to it. Aliases that appear before any
//! section header are collected under [`DEFAULT_SECTION`]. Everything else in
//! the file is ignored.

use std::fs;

use super::*;

/// Label used for aliases that precede any section header.
pub const DEFAULT_SECTION: &str = "Aliases";

lazy_static! {
  /// `# SECTION: <label>` header.
  static ref SECTION_HEADER: Regex =
    Regex::new(r"#\s*SECTION:\s*(?P<label>[a-zA-Z0-9 ]+[^\s])").expect("valid section pattern");
  /// Alias definition followed by a `#` comment.
  static ref COMMENTED_ALIAS: Regex =
    Regex::new(r#"alias (?P<name>[_a-zA-Z0-9]+)=['"](?P<command>.+)['"][^#]*#(?P<comment>.+)$"#)
      .expect("valid commented alias pattern");
  /// Bare alias definition.
  static ref ALIAS: Regex = Regex::new(r#"alias (?P<name>[_a-zA-Z0-9]+)=['"](?P<command>.+)['"]$"#)
    .expect("valid alias pattern");
}

/// Parses a single line into an [`Alias`], if it is an alias definition.
///
/// The commented form is tried first, so a trailing `# ...` becomes the
/// description rather than part of the command.
///
/// # Examples
///
/// ```
/// use aliaspanel::parser::parse_alias;
///
/// let alias = parse_alias("alias gs='git status' # short").unwrap();
/// assert_eq!(alias.command, "git status");
/// assert_eq!(alias.description.as_deref(), Some("short"));
/// assert!(parse_alias("export PATH=/bin").is_none());
/// ```
pub fn parse_alias(line: &str) -> Option<Alias> {
  if let Some(caps) = COMMENTED_ALIAS.captures(line) {
    let alias = Alias::new(&caps["name"], &caps["command"])
      .with_description(caps["comment"].trim().to_string());
    trace!("parse_alias: {}-{}-{:?}", alias.name, alias.command, alias.description);
    return Some(alias);
  }
  if let Some(caps) = ALIAS.captures(line) {
    let alias = Alias::new(&caps["name"], &caps["command"]);
    trace!("parse_alias: {}-{}", alias.name, alias.command);
    return Some(alias);
  }
  debug!("parse_alias: Skipping {line}");
  None
}

/// Extracts the label from a `# SECTION:` header line.
pub fn parse_section_header(line: &str) -> Option<&str> {
  SECTION_HEADER.captures(line).and_then(|caps| caps.name("label")).map(|m| m.as_str())
}

/// Parses the contents of one alias file.
///
/// A header naming a section already seen in the same file continues that
/// section. The returned collection may contain empty sections; pruning is
/// left to [`parse_files`].
pub fn parse_str(content: &str) -> Sections {
  let mut sections = Sections::new();
  let mut current: Option<String> = None;

  for line in content.lines() {
    if let Some(label) = parse_section_header(line) {
      if sections.get(label).is_some() {
        info!("parse_str: Found existing section <{label}>");
      } else {
        info!("parse_str: Found new section <{label}>");
        sections.insert(Section::new(label));
      }
      current = Some(label.to_string());
      continue;
    }

    let label = current.get_or_insert_with(|| {
      sections.insert(Section::new(DEFAULT_SECTION));
      DEFAULT_SECTION.to_string()
    });
    if let (Some(alias), Some(section)) = (parse_alias(line), sections.get_mut(label)) {
      section.insert(alias);
    }
  }

  sections
}

/// Reads and parses one alias file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Sections> {
  let path = path.as_ref();
  debug!("Parsing alias file {}", path.display());
  let content =
    fs::read_to_string(path).map_err(|source| PanelError::Read { path: path.to_path_buf(), source })?;
  Ok(parse_str(&content))
}

/// Parses every file in order and merges the results.
///
/// Sections with the same label are combined across files, with aliases from
/// later files replacing same-named aliases from earlier ones. Sections left
/// without any alias are removed.
pub fn parse_files(files: &[PathBuf]) -> Result<Sections> {
  let mut sections = Sections::new();
  for file in files {
    sections.merge(parse_file(file)?);
  }
  sections.prune_empty();
  debug!("Parsed {} sections from {} files", sections.len(), files.len());
  Ok(sections)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_alias_quotes() {
    let single = parse_alias("alias ll='ls -alF'").unwrap();
    assert_eq!(single, Alias::new("ll", "ls -alF"));

    let double = parse_alias(r#"alias gp="git push origin HEAD""#).unwrap();
    assert_eq!(double.command, "git push origin HEAD");
    assert!(double.description.is_none());
  }

  #[test]
  fn test_parse_alias_with_comment() {
    let alias = parse_alias("alias la='ls -A'   #   show hidden  ").unwrap();
    assert_eq!(alias.name, "la");
    assert_eq!(alias.command, "ls -A");
    assert_eq!(alias.description.as_deref(), Some("show hidden"));
  }

  #[test]
  fn test_parse_alias_rejects_other_lines() {
    assert!(parse_alias("").is_none());
    assert!(parse_alias("export EDITOR=vim").is_none());
    assert!(parse_alias("alias bad-name='x'").is_none());
    assert!(parse_alias("alias unquoted=ls").is_none());
  }

  #[traced_test]
  #[test]
  fn test_unrecognised_lines_logged_at_debug() {
    assert!(parse_alias("export EDITOR=vim").is_none());
    logs_assert(|lines: &[&str]| match lines.iter().find(|line| line.contains("Skipping export EDITOR=vim")) {
      Some(line) if line.contains("DEBUG") => Ok(()),
      Some(line) => Err(format!("skipped line logged at the wrong level: {line}")),
      None => Err("skipped line was not logged".to_string()),
    });
  }

  #[test]
  fn test_parse_section_header() {
    assert_eq!(parse_section_header("# SECTION: Git"), Some("Git"));
    assert_eq!(parse_section_header("#SECTION:Package Management  "), Some("Package Management"));
    assert_eq!(parse_section_header("# just a comment"), None);
  }

  #[traced_test]
  #[test]
  fn test_parse_str_groups_and_orphans() {
    let content = "\
alias orphan='echo hi'
# SECTION: Git
alias gs='git status'
# SECTION: Nav
alias ..='cd ..'
alias up='cd ..'
# SECTION: Git
alias gp='git push'
";
    let sections = parse_str(content);

    assert_eq!(sections.labels().collect::<Vec<_>>(), vec![DEFAULT_SECTION, "Git", "Nav"]);
    assert_eq!(sections.get(DEFAULT_SECTION).unwrap().len(), 1);
    assert_eq!(sections.get("Git").unwrap().len(), 2);
    // `..` is not a valid alias name
    assert_eq!(sections.get("Nav").unwrap().len(), 1);
    assert!(logs_contain("Found existing section <Git>"));
  }

  #[test]
  fn test_parse_str_leading_blank_line_creates_default_section() {
    let sections = parse_str("\n# SECTION: Git\nalias gs='git status'\n");
    assert!(sections.get(DEFAULT_SECTION).unwrap().is_empty());
  }

  #[traced_test]
  #[test]
  fn test_parse_files_merges_and_prunes() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("a_aliases");
    let second = dir.path().join("b_aliases");
    fs::write(&first, "\n# SECTION: Git\nalias gs='git status'\nalias gd='git diff'\n").unwrap();
    fs::write(&second, "# SECTION: Git\nalias gs='git status -sb'\n# SECTION: Empty\n").unwrap();

    let sections = parse_files(&[first, second]).unwrap();

    assert_eq!(sections.labels().collect::<Vec<_>>(), vec!["Git"]);
    let git = sections.get("Git").unwrap();
    assert_eq!(git.aliases["gs"].command, "git status -sb");
    assert_eq!(git.aliases["gd"].command, "git diff");
    assert!(logs_contain("Deleting empty section"));
  }

  #[test]
  fn test_parse_file_missing() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope_aliases");
    match parse_file(&missing) {
      Err(PanelError::Read { path, .. }) => assert_eq!(path, missing),
      other => panic!("expected read error, got {other:?}"),
    }
  }
}
