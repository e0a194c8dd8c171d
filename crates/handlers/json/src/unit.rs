use crate::error::JsonError;
use crate::view::{Item, JsonView, Key};
use anymod_resolver::{Unit, UnitIdentity};
use serde_json::Value;
use std::any::Any;

/// A JSON document whose shape (object, array or scalar) is decided at access time.
///
/// Collection operations on a scalar document, key operations on an array and index
/// operations on an object fail with [`JsonError::TypeMismatch`]. Mutations stay in
/// memory.
#[derive(Debug)]
pub struct JsonUnit {
    identity: UnitIdentity,
    value: Option<Value>,
}

impl JsonUnit {
    pub(crate) const fn new(identity: UnitIdentity) -> Self {
        Self { identity, value: None }
    }

    pub(crate) fn fill(&mut self, value: Value) {
        self.value = Some(value);
    }

    /// The raw document.
    ///
    /// # Errors
    /// [`JsonError::NotPopulated`] before `populate`.
    pub fn value(&self) -> Result<&Value, JsonError> {
        self.value.as_ref().ok_or_else(JsonError::not_populated)
    }

    /// # Errors
    /// [`JsonError::NotPopulated`] before `populate`.
    pub fn view(&self) -> Result<JsonView<'_>, JsonError> {
        self.value().map(JsonView::of)
    }

    /// The document itself when it is a scalar.
    ///
    /// # Errors
    /// [`JsonError::TypeMismatch`] for objects and arrays.
    pub fn scalar(&self) -> Result<&Value, JsonError> {
        match self.view()? {
            JsonView::Scalar(value) => Ok(value),
            view => Err(JsonError::mismatch("scalar", view.kind())),
        }
    }

    /// Number of keys or elements.
    ///
    /// # Errors
    /// [`JsonError::TypeMismatch`] for scalars.
    pub fn len(&self) -> Result<usize, JsonError> {
        match self.view()? {
            JsonView::Object(map) => Ok(map.len()),
            JsonView::Array(items) => Ok(items.len()),
            view @ JsonView::Scalar(_) => Err(JsonError::mismatch("len", view.kind())),
        }
    }

    /// # Errors
    /// As [`JsonUnit::len`].
    pub fn is_empty(&self) -> Result<bool, JsonError> {
        self.len().map(|len| len == 0)
    }

    /// Value under an object key or at an array index.
    ///
    /// # Errors
    /// [`JsonError::KeyNotFound`], [`JsonError::IndexOutOfRange`] or
    /// [`JsonError::TypeMismatch`] when the key kind does not fit the document.
    pub fn get<'k>(&self, key: impl Into<Key<'k>>) -> Result<&Value, JsonError> {
        match (self.view()?, key.into()) {
            (JsonView::Object(map), Key::Name(name)) => {
                map.get(name).ok_or_else(|| JsonError::missing_key(name))
            }
            (JsonView::Array(items), Key::Position(index)) => {
                items.get(index).ok_or_else(|| JsonError::out_of_range(index, items.len()))
            }
            (view, key) => Err(JsonError::mismatch(&format!("get {key}"), view.kind())),
        }
    }

    /// `true` when `get` would succeed.
    #[must_use]
    pub fn contains<'k>(&self, key: impl Into<Key<'k>>) -> bool {
        self.get(key).is_ok()
    }

    /// Stores `value` under a key or at an existing index, returning what was there.
    ///
    /// Object keys are created when missing; array indices must already exist.
    ///
    /// # Errors
    /// [`JsonError::IndexOutOfRange`] or [`JsonError::TypeMismatch`].
    pub fn set<'k>(
        &mut self,
        key: impl Into<Key<'k>>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, JsonError> {
        let value = value.into();
        match (self.value_mut()?, key.into()) {
            (Value::Object(map), Key::Name(name)) => Ok(map.insert(name.to_owned(), value)),
            (Value::Array(items), Key::Position(index)) => {
                let len = items.len();
                let slot = items.get_mut(index).ok_or_else(|| JsonError::out_of_range(index, len))?;
                Ok(Some(std::mem::replace(slot, value)))
            }
            (doc, key) => Err(JsonError::mismatch(&format!("set {key}"), JsonView::of(doc).kind())),
        }
    }

    /// Removes and returns a key or an element; later elements shift down.
    ///
    /// # Errors
    /// [`JsonError::KeyNotFound`], [`JsonError::IndexOutOfRange`] or
    /// [`JsonError::TypeMismatch`].
    pub fn delete<'k>(&mut self, key: impl Into<Key<'k>>) -> Result<Value, JsonError> {
        match (self.value_mut()?, key.into()) {
            (Value::Object(map), Key::Name(name)) => {
                map.shift_remove(name).ok_or_else(|| JsonError::missing_key(name))
            }
            (Value::Array(items), Key::Position(index)) if index < items.len() => Ok(items.remove(index)),
            (Value::Array(items), Key::Position(index)) => Err(JsonError::out_of_range(index, items.len())),
            (doc, key) => Err(JsonError::mismatch(&format!("delete {key}"), JsonView::of(doc).kind())),
        }
    }

    /// Inserts into an array; positions past the end append.
    ///
    /// # Errors
    /// [`JsonError::TypeMismatch`] unless the document is an array.
    pub fn insert(&mut self, position: usize, value: impl Into<Value>) -> Result<(), JsonError> {
        match self.value_mut()? {
            Value::Array(items) => {
                items.insert(position.min(items.len()), value.into());
                Ok(())
            }
            doc => Err(JsonError::mismatch("insert", JsonView::of(doc).kind())),
        }
    }

    /// Object keys in document order.
    ///
    /// # Errors
    /// [`JsonError::TypeMismatch`] unless the document is an object.
    pub fn keys(&self) -> Result<impl Iterator<Item = &str>, JsonError> {
        match self.view()? {
            JsonView::Object(map) => Ok(map.keys().map(String::as_str)),
            view => Err(JsonError::mismatch("keys", view.kind())),
        }
    }

    /// Array elements in order.
    ///
    /// # Errors
    /// [`JsonError::TypeMismatch`] unless the document is an array.
    pub fn elements(&self) -> Result<impl Iterator<Item = &Value>, JsonError> {
        match self.view()? {
            JsonView::Array(items) => Ok(items.iter()),
            view => Err(JsonError::mismatch("elements", view.kind())),
        }
    }

    /// Keys of an object or elements of an array.
    ///
    /// # Errors
    /// [`JsonError::TypeMismatch`] for scalars.
    pub fn iter(&self) -> Result<Box<dyn Iterator<Item = Item<'_>> + '_>, JsonError> {
        match self.view()? {
            JsonView::Object(map) => Ok(Box::new(map.keys().map(|k| Item::Key(k.as_str())))),
            JsonView::Array(items) => Ok(Box::new(items.iter().map(Item::Element))),
            view @ JsonView::Scalar(_) => Err(JsonError::mismatch("iter", view.kind())),
        }
    }

    fn value_mut(&mut self) -> Result<&mut Value, JsonError> {
        self.value.as_mut().ok_or_else(JsonError::not_populated)
    }
}

impl Unit for JsonUnit {
    fn identity(&self) -> &UnitIdentity {
        &self.identity
    }

    fn is_populated(&self) -> bool {
        self.value.is_some()
    }

    fn clear(&mut self) {
        self.value = None;
    }

    fn summary(&self) -> String {
        self.view().map_or_else(|_| "json, not populated".to_owned(), |view| format!("json {view}"))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
