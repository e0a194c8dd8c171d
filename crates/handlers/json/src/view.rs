use serde_json::{Map, Value};
use std::fmt;

/// Shape of a JSON document, decided when it is accessed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JsonView<'a> {
    Object(&'a Map<String, Value>),
    Array(&'a [Value]),
    Scalar(&'a Value),
}

impl<'a> JsonView<'a> {
    #[must_use]
    pub const fn of(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => Self::Object(map),
            Value::Array(items) => Self::Array(items.as_slice()),
            scalar => Self::Scalar(scalar),
        }
    }

    /// `object`, `array`, `string`, `number`, `bool` or `null`.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Object(_) => "object",
            Self::Array(_) => "array",
            Self::Scalar(Value::String(_)) => "string",
            Self::Scalar(Value::Number(_)) => "number",
            Self::Scalar(Value::Bool(_)) => "bool",
            Self::Scalar(_) => "null",
        }
    }

    #[must_use]
    pub const fn is_collection(&self) -> bool {
        !matches!(self, Self::Scalar(_))
    }
}

impl fmt::Display for JsonView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(map) => write!(f, "object, {} keys", map.len()),
            Self::Array(items) => write!(f, "array, {} elements", items.len()),
            Self::Scalar(_) => f.write_str(self.kind()),
        }
    }
}

/// Accessor for [`JsonUnit`](crate::JsonUnit) operations: an object key or an array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key<'a> {
    Name(&'a str),
    Position(usize),
}

impl<'a> From<&'a str> for Key<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a String> for Key<'a> {
    fn from(name: &'a String) -> Self {
        Self::Name(name)
    }
}

impl From<usize> for Key<'_> {
    fn from(position: usize) -> Self {
        Self::Position(position)
    }
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "'{name}'"),
            Self::Position(position) => write!(f, "[{position}]"),
        }
    }
}

/// Item yielded by [`JsonUnit::iter`](crate::JsonUnit::iter): keys for objects, elements
/// for arrays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Item<'a> {
    Key(&'a str),
    Element(&'a Value),
}

impl<'a> Item<'a> {
    #[must_use]
    pub const fn as_key(&self) -> Option<&'a str> {
        match self {
            Self::Key(key) => Some(key),
            Self::Element(_) => None,
        }
    }

    #[must_use]
    pub const fn as_element(&self) -> Option<&'a Value> {
        match self {
            Self::Element(value) => Some(value),
            Self::Key(_) => None,
        }
    }
}
