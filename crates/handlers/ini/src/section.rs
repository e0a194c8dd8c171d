use indexmap::IndexMap;
use std::ops::Index;

/// Read-only view of one `[section]`: field name to string value.
///
/// Field names are stored lowercased; lookups are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    fields: IndexMap<String, String>,
}

impl Section {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(&key.to_ascii_lowercase()).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(&key.to_ascii_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn insert(&mut self, key: String, value: String) {
        self.fields.insert(key, value);
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut String> {
        self.fields.get_mut(key)
    }

    /// Adds the fields of `defaults` this section does not define itself.
    pub(crate) fn inherit(&mut self, defaults: &Self) {
        for (key, value) in &defaults.fields {
            self.fields.entry(key.clone()).or_insert_with(|| value.clone());
        }
    }
}

impl Index<&str> for Section {
    type Output = str;

    /// # Panics
    /// When the field is absent; use [`Section::get`] to probe.
    fn index(&self, key: &str) -> &str {
        self.get(key).unwrap_or_else(|| panic!("no field '{key}' in section"))
    }
}

impl<'a> IntoIterator for &'a Section {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
