use crate::parser::parse;
use crate::unit::ConfigUnit;
use anymod_domain::LogicalName;
use anymod_resolver::{Handler, ResolveError, UnitIdentity};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads `.ini` / `.cfg` files into a [`ConfigUnit`].
#[derive(Debug)]
pub struct IniHandler {
    path: PathBuf,
}

impl Handler for IniHandler {
    type Unit = ConfigUnit;
    const EXTENSIONS: &'static [&'static str] = &[".ini", ".cfg"];

    fn new(_name: &LogicalName, path: &Path) -> Self {
        Self { path: path.to_path_buf() }
    }

    fn allocate(&self, name: &str) -> Result<ConfigUnit, ResolveError> {
        Ok(ConfigUnit::new(UnitIdentity::allocate(name, &self.path)?))
    }

    fn populate(&self, unit: &mut ConfigUnit) -> Result<(), ResolveError> {
        let text = fs::read_to_string(&self.path).map_err(|e| ResolveError::content(e, &self.path))?;
        let sections = parse(&text).map_err(|e| ResolveError::content(e, &self.path))?;

        debug!(path = %self.path.display(), sections = sections.len(), "Parsed configuration");
        unit.fill(sections);
        Ok(())
    }
}
