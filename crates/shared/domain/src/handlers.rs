use crate::constants::{IMAGE, INI, JSON};
use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Represents a set of reference format handlers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct HandlerSet: u8 {
        const INI = 1 << 0;
        const JSON = 1 << 1;
        const IMAGE = 1 << 2;

        const ALL = Self::INI.bits() | Self::JSON.bits() | Self::IMAGE.bits();
    }
}

impl HandlerSet {
    /// Stable names of the handlers in this set, in declaration order.
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        [(Self::INI, INI), (Self::JSON, JSON), (Self::IMAGE, IMAGE)]
            .into_iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
            .collect()
    }
}

impl Default for HandlerSet {
    fn default() -> Self {
        Self::ALL
    }
}

impl From<&str> for HandlerSet {
    fn from(s: &str) -> Self {
        match s.trim() {
            INI | "config" => Self::INI,
            JSON => Self::JSON,
            IMAGE => Self::IMAGE,
            "all" | "*" => Self::ALL,
            _ => Self::empty(),
        }
    }
}

impl Serialize for HandlerSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.names().serialize(serializer)
    }
}

/// Accepts either a list (`["ini", "json"]`) or one comma separated string (`"ini,json"`).
impl<'de> Deserialize<'de> for HandlerSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Joined(String),
            List(Vec<String>),
        }

        let names = match Repr::deserialize(deserializer)? {
            Repr::Joined(joined) => joined.split(',').map(str::to_owned).collect(),
            Repr::List(list) => list,
        };

        names
            .iter()
            .filter(|name| !name.trim().is_empty())
            .map(|name| {
                let set = Self::from(name.as_str());
                if set.is_empty() {
                    Err(serde::de::Error::custom(format!("unknown handler '{name}'")))
                } else {
                    Ok(set)
                }
            })
            .collect()
    }
}
