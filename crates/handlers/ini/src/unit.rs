use crate::parser::Sections;
use crate::section::Section;
use anymod_resolver::{Unit, UnitIdentity};
use std::any::Any;
use std::ops::Index;

/// Configuration unit: ordered sections of string fields.
///
/// A `[DEFAULT]` section, when present, is listed like any other and its fields are
/// already merged into every other section.
#[derive(Debug)]
pub struct ConfigUnit {
    identity: UnitIdentity,
    sections: Option<Sections>,
}

impl ConfigUnit {
    pub(crate) const fn new(identity: UnitIdentity) -> Self {
        Self { identity, sections: None }
    }

    pub(crate) fn fill(&mut self, sections: Sections) {
        self.sections = Some(sections);
    }

    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.as_ref()?.get(name)
    }

    /// Shorthand for `section(section)?.get(key)`.
    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?.get(key)
    }

    #[must_use]
    pub fn contains_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().flatten().map(|(name, section)| (name.as_str(), section))
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections().map(|(name, _)| name)
    }

    /// Number of sections; zero when not populated.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.as_ref().map_or(0, Sections::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Index<&str> for ConfigUnit {
    type Output = Section;

    /// # Panics
    /// When the section is absent; use [`ConfigUnit::section`] to probe.
    fn index(&self, name: &str) -> &Section {
        self.section(name).unwrap_or_else(|| panic!("no section '{name}'"))
    }
}

impl Unit for ConfigUnit {
    fn identity(&self) -> &UnitIdentity {
        &self.identity
    }

    fn is_populated(&self) -> bool {
        self.sections.is_some()
    }

    fn clear(&mut self) {
        self.sections = None;
    }

    fn summary(&self) -> String {
        match &self.sections {
            Some(sections) => {
                let fields: usize = sections.values().map(Section::len).sum();
                format!("config, {} sections, {fields} fields", sections.len())
            }
            None => "config, not populated".to_owned(),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
