use crate::unit::JsonUnit;
use anymod_domain::LogicalName;
use anymod_resolver::{Handler, ResolveError, UnitIdentity};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads `.json` files into a [`JsonUnit`].
#[derive(Debug)]
pub struct JsonHandler {
    path: PathBuf,
}

impl Handler for JsonHandler {
    type Unit = JsonUnit;
    const EXTENSIONS: &'static [&'static str] = &[".json"];

    fn new(_name: &LogicalName, path: &Path) -> Self {
        Self { path: path.to_path_buf() }
    }

    fn allocate(&self, name: &str) -> Result<JsonUnit, ResolveError> {
        Ok(JsonUnit::new(UnitIdentity::allocate(name, &self.path)?))
    }

    fn populate(&self, unit: &mut JsonUnit) -> Result<(), ResolveError> {
        let bytes = fs::read(&self.path).map_err(|e| ResolveError::content(e, &self.path))?;
        let value: Value =
            serde_json::from_slice(&bytes).map_err(|e| ResolveError::content(e, &self.path))?;

        debug!(path = %self.path.display(), bytes = bytes.len(), "Parsed JSON document");
        unit.fill(value);
        Ok(())
    }
}
