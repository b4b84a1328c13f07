//! Aliases and the sections that group them.
//!
//! Both levels are stored in [`BTreeMap`]s so that every consumer iterates
//! sections by label and aliases by name in lexicographic order. Rendering
//! output is therefore reproducible regardless of file order or hashing.

use super::*;

/// A single shell alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
  /// Name the alias is invoked by, never empty
  pub name:        String,
  /// Command the alias expands to
  pub command:     String,
  /// Trailing comment from the definition line, if any
  pub description: Option<String>,
}

impl Alias {
  /// Creates an alias without a description.
  pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
    Self { name: name.into(), command: command.into(), description: None }
  }

  /// Attaches a description.
  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }

  /// The text shown for this alias inside a panel, `name: command`.
  pub fn display_line(&self) -> String { format!("{}: {}", self.name, self.command) }
}

/// A labelled group of aliases, shown as one panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
  /// Panel label, never empty
  pub label:   String,
  /// Aliases keyed (and ordered) by name
  pub aliases: BTreeMap<String, Alias>,
}

impl Section {
  /// Creates an empty section.
  pub fn new(label: impl Into<String>) -> Self {
    Self { label: label.into(), aliases: BTreeMap::new() }
  }

  /// Inserts an alias, replacing any alias with the same name.
  ///
  /// Returns the replaced alias.
  pub fn insert(&mut self, alias: Alias) -> Option<Alias> {
    self.aliases.insert(alias.name.clone(), alias)
  }

  /// Builder form of [`Section::insert`].
  pub fn with_alias(mut self, alias: Alias) -> Self {
    self.insert(alias);
    self
  }

  /// Folds `other` into this section. Aliases from `other` win on name clashes.
  pub fn merge(&mut self, other: Section) {
    for (name, alias) in other.aliases {
      if self.aliases.contains_key(&name) {
        info!("Redefined alias found: {name}");
      }
      self.aliases.insert(name, alias);
    }
  }

  /// Aliases in name order.
  pub fn iter(&self) -> impl Iterator<Item = &Alias> { self.aliases.values() }

  /// Number of aliases.
  pub fn len(&self) -> usize { self.aliases.len() }

  /// Whether the section has no aliases.
  pub fn is_empty(&self) -> bool { self.aliases.is_empty() }
}

/// The full collection of sections, keyed (and ordered) by label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections(BTreeMap<String, Section>);

impl Sections {
  /// Creates an empty collection.
  pub fn new() -> Self { Self::default() }

  /// Adds a section, merging it into an existing section with the same label.
  pub fn insert(&mut self, section: Section) {
    match self.0.get_mut(&section.label) {
      Some(existing) => existing.merge(section),
      None => {
        self.0.insert(section.label.clone(), section);
      },
    }
  }

  /// Merges every section of `other` into this collection.
  ///
  /// Sections with matching labels are combined; aliases from `other` replace
  /// same-named aliases already present.
  pub fn merge(&mut self, other: Sections) {
    for section in other.0.into_values() {
      self.insert(section);
    }
  }

  /// Drops every section without aliases.
  pub fn prune_empty(&mut self) {
    self.0.retain(|label, section| {
      if section.is_empty() {
        info!("Deleting empty section {label}");
      }
      !section.is_empty()
    });
  }

  /// Looks up a section by label.
  pub fn get(&self, label: &str) -> Option<&Section> { self.0.get(label) }

  /// Mutable lookup by label.
  pub fn get_mut(&mut self, label: &str) -> Option<&mut Section> { self.0.get_mut(label) }

  /// Sections in label order.
  pub fn iter(&self) -> impl Iterator<Item = &Section> { self.0.values() }

  /// Section labels in order.
  pub fn labels(&self) -> impl Iterator<Item = &str> { self.0.keys().map(String::as_str) }

  /// Number of sections.
  pub fn len(&self) -> usize { self.0.len() }

  /// Whether there are no sections.
  pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl FromIterator<Section> for Sections {
  fn from_iter<I: IntoIterator<Item = Section>>(iter: I) -> Self {
    let mut sections = Self::new();
    for section in iter {
      sections.insert(section);
    }
    sections
  }
}
