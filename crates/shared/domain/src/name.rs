use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;

/// A dot separated logical unit name such as `settings` or `assets.logo`.
///
/// Every segment starts with an ASCII letter or `_` and continues with ASCII
/// alphanumerics, `_` or `-`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogicalName(String);

impl LogicalName {
    /// Validates a logical name, returning `None` when it is malformed.
    #[must_use]
    pub fn new(raw: &str) -> Option<Self> {
        raw.split('.').all(is_segment).then(|| Self(raw.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name segments in order (`assets.logo` -> `["assets", "logo"]`).
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// The last segment (`assets.logo` -> `logo`).
    #[must_use]
    pub fn leaf(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Relative file stem without extension (`assets.logo` -> `assets/logo`).
    #[must_use]
    pub fn relative_path(&self) -> PathBuf {
        self.segments().collect()
    }
}

fn is_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

impl fmt::Display for LogicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LogicalName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for LogicalName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for LogicalName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid unit name '{raw}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn accepts_dotted_identifiers() {
        let name = LogicalName::new("assets.logo_v2").unwrap();
        assert_eq!(name.segments().collect::<Vec<_>>(), ["assets", "logo_v2"]);
        assert_eq!(name.leaf(), "logo_v2");
        assert_eq!(name.relative_path(), Path::new("assets").join("logo_v2"));
    }

    #[test]
    fn rejects_malformed_names() {
        for raw in ["", ".", "a.", ".a", "a..b", "1abc", "a/b", "a b", "ä"] {
            assert!(LogicalName::new(raw).is_none(), "{raw:?} must be rejected");
        }
    }
}
