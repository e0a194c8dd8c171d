#![allow(dead_code)]

use anymod_resolver::{Handler, LogicalName, ResolveError, Unit, UnitIdentity};
use std::any::Any;
use std::fs;
use std::path::{Path, PathBuf};

/// Text unit tagged with the handler flavour that produced it.
#[derive(Debug)]
pub struct Tagged {
    identity: UnitIdentity,
    pub flavour: u8,
    pub text: Option<String>,
}

impl Unit for Tagged {
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
        format!("tagged #{}", self.flavour)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Distinct handler types, one per `N`.
#[derive(Debug)]
pub struct TaggedHandler<const N: u8> {
    path: PathBuf,
}

pub type Alpha = TaggedHandler<1>;
pub type Beta = TaggedHandler<2>;

impl<const N: u8> Handler for TaggedHandler<N> {
    type Unit = Tagged;
    const EXTENSIONS: &'static [&'static str] = &[".tag"];

    fn new(_name: &LogicalName, path: &Path) -> Self {
        Self { path: path.to_path_buf() }
    }

    fn allocate(&self, name: &str) -> Result<Tagged, ResolveError> {
        Ok(Tagged { identity: UnitIdentity::allocate(name, &self.path)?, flavour: N, text: None })
    }

    fn populate(&self, unit: &mut Tagged) -> Result<(), ResolveError> {
        let text = fs::read_to_string(&self.path).map_err(|e| ResolveError::content(e, &self.path))?;
        unit.text = Some(text.trim().to_owned());
        Ok(())
    }
}

pub fn write(root: &Path, relative: &str, body: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, body).unwrap();
    path
}
