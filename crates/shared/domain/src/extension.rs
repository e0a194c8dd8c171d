use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;

/// A normalized file extension key.
///
/// The convention is fixed for the whole process: a leading dot followed by one
/// lowercase segment of ASCII letters, digits, `_` or `-`. Both `"JSON"` and `".json"`
/// normalize to `.json`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Extension(String);

impl Extension {
    /// Normalizes a raw extension, returning `None` when it cannot be a file suffix.
    #[must_use]
    pub fn new(raw: &str) -> Option<Self> {
        let body = raw.strip_prefix('.').unwrap_or(raw);
        let valid = !body.is_empty()
            && body.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

        valid.then(|| Self(format!(".{}", body.to_ascii_lowercase())))
    }

    /// Extracts and normalizes the last extension of a path (`a/b.tar.GZ` -> `.gz`).
    #[must_use]
    pub fn of_path(path: &Path) -> Option<Self> {
        path.extension().and_then(|ext| ext.to_str()).and_then(Self::new)
    }

    /// The extension including its leading dot.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Extension {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Extension {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Extension {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid file extension '{raw}'")))
    }
}

/// Priority class of an extension binding.
///
/// `Protected` covers the extensions the resolver handles natively; everything else
/// is `Open` for third-party registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Protected,
    Open,
}

impl Tier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Protected => "protected",
            Self::Open => "open",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
