//! Formats the resolver understands without any registration.

use crate::error::ResolveError;
use crate::handler::{Handler, HandlerType};
use crate::unit::{Unit, UnitIdentity};
use anymod_domain::{Extension, LogicalName};
use indexmap::IndexMap;
use std::any::Any;
use std::fs;
use std::path::{Path, PathBuf};

/// Built-in extension table. Its keys form the registry's reserved set.
#[derive(Debug, Clone)]
pub struct NativeTable {
    entries: IndexMap<Extension, HandlerType>,
}

impl NativeTable {
    /// A table without any native format.
    #[must_use]
    pub fn empty() -> Self {
        Self { entries: IndexMap::new() }
    }

    /// Binds `extension` to `handler`, returning the handler it replaced.
    ///
    /// # Errors
    /// [`ResolveError::InvalidExtension`] when `extension` cannot be normalized.
    pub fn insert(
        &mut self,
        extension: &str,
        handler: HandlerType,
    ) -> Result<Option<HandlerType>, ResolveError> {
        let ext = Extension::new(extension).ok_or_else(|| ResolveError::invalid_extension(extension))?;
        Ok(self.entries.insert(ext, handler))
    }

    #[must_use]
    pub fn get(&self, extension: &Extension) -> Option<HandlerType> {
        self.entries.get(extension).copied()
    }

    #[must_use]
    pub fn contains(&self, extension: &Extension) -> bool {
        self.entries.contains_key(extension)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Extension> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Extension, HandlerType)> {
        self.entries.iter().map(|(ext, handler)| (ext, *handler))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for NativeTable {
    fn default() -> Self {
        let mut entries = IndexMap::new();
        for (handler, extensions) in [
            (HandlerType::of::<TextHandler>(), TextHandler::EXTENSIONS),
            (HandlerType::of::<BytesHandler>(), BytesHandler::EXTENSIONS),
        ] {
            for ext in extensions.iter().filter_map(|raw| Extension::new(raw)) {
                entries.insert(ext, handler);
            }
        }
        Self { entries }
    }
}

/// UTF-8 text file.
#[derive(Debug)]
pub struct TextUnit {
    identity: UnitIdentity,
    text: Option<String>,
}

impl TextUnit {
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.as_deref().unwrap_or_default().lines()
    }
}

impl Unit for TextUnit {
    fn identity(&self) -> &UnitIdentity {
        &self.identity
    }

    fn is_populated(&self) -> bool {
        self.text.is_some()
    }

    fn clear(&mut self) {
        self.text = None;
    }

    fn summary(&self) -> String {
        match &self.text {
            Some(text) => format!("text, {} lines, {} bytes", text.lines().count(), text.len()),
            None => "text, not populated".to_owned(),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[derive(Debug)]
pub struct TextHandler {
    path: PathBuf,
}

impl Handler for TextHandler {
    type Unit = TextUnit;
    const EXTENSIONS: &'static [&'static str] = &[".txt"];

    fn new(_name: &LogicalName, path: &Path) -> Self {
        Self { path: path.to_path_buf() }
    }

    fn allocate(&self, name: &str) -> Result<TextUnit, ResolveError> {
        Ok(TextUnit { identity: UnitIdentity::allocate(name, &self.path)?, text: None })
    }

    fn populate(&self, unit: &mut TextUnit) -> Result<(), ResolveError> {
        let text = fs::read_to_string(&self.path).map_err(|e| ResolveError::content(e, &self.path))?;
        unit.text = Some(text);
        Ok(())
    }
}

/// Opaque binary file.
#[derive(Debug)]
pub struct BytesUnit {
    identity: UnitIdentity,
    bytes: Option<Vec<u8>>,
}

impl BytesUnit {
    #[must_use]
    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }
}

impl Unit for BytesUnit {
    fn identity(&self) -> &UnitIdentity {
        &self.identity
    }

    fn is_populated(&self) -> bool {
        self.bytes.is_some()
    }

    fn clear(&mut self) {
        self.bytes = None;
    }

    fn summary(&self) -> String {
        self.bytes
            .as_ref()
            .map_or_else(|| "bytes, not populated".to_owned(), |b| format!("bytes, {} bytes", b.len()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[derive(Debug)]
pub struct BytesHandler {
    path: PathBuf,
}

impl Handler for BytesHandler {
    type Unit = BytesUnit;
    const EXTENSIONS: &'static [&'static str] = &[".bin"];

    fn new(_name: &LogicalName, path: &Path) -> Self {
        Self { path: path.to_path_buf() }
    }

    fn allocate(&self, name: &str) -> Result<BytesUnit, ResolveError> {
        Ok(BytesUnit { identity: UnitIdentity::allocate(name, &self.path)?, bytes: None })
    }

    fn populate(&self, unit: &mut BytesUnit) -> Result<(), ResolveError> {
        let bytes = fs::read(&self.path).map_err(|e| ResolveError::content(e, &self.path))?;
        unit.bytes = Some(bytes);
        Ok(())
    }
}
