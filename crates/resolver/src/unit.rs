use crate::error::ResolveError;
use crate::handler::HandlerType;
use anymod_domain::LogicalName;
use parking_lot::{MappedRwLockReadGuard, MappedRwLockWriteGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::any::Any;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name and absolute origin of a unit, fixed at allocation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnitIdentity {
    pub name: LogicalName,
    pub origin: PathBuf,
}

impl UnitIdentity {
    /// Validates `name` and anchors `origin` to the working directory.
    ///
    /// Performs no file I/O; the origin is not required to exist yet.
    ///
    /// # Errors
    /// [`ResolveError::InvalidName`] when `name` is not a dotted identifier.
    pub fn allocate(name: &str, origin: &Path) -> Result<Self, ResolveError> {
        let name = LogicalName::new(name).ok_or_else(|| ResolveError::invalid_name(name))?;
        let origin = std::path::absolute(origin).unwrap_or_else(|_| origin.to_path_buf());

        Ok(Self { name, origin })
    }
}

impl fmt::Display for UnitIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.origin.display())
    }
}

/// In-memory representation produced by a [`Handler`](crate::Handler).
///
/// The shape of the content is entirely up to the handler; callers reach it through
/// [`Module::read`] / [`Module::write`], which downcast via [`Unit::as_any`].
pub trait Unit: Any + Send + Sync + fmt::Debug {
    fn identity(&self) -> &UnitIdentity;

    /// `true` once `populate` has filled the content.
    fn is_populated(&self) -> bool;

    /// Drops the content, keeping the identity.
    fn clear(&mut self);

    /// One-line human readable description of the content.
    fn summary(&self) -> String;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A resolved unit shared between every caller that asked for the same name.
///
/// The content sits behind a lock so a [`reload`](Module::reload) refreshes it in place
/// while outstanding `Arc<Module>` handles stay valid.
#[derive(Debug)]
pub struct Module {
    identity: UnitIdentity,
    handler: HandlerType,
    unit: RwLock<Box<dyn Unit>>,
}

impl Module {
    pub(crate) fn new(handler: HandlerType, unit: Box<dyn Unit>) -> Self {
        Self { identity: unit.identity().clone(), handler, unit: RwLock::new(unit) }
    }

    #[must_use]
    pub const fn identity(&self) -> &UnitIdentity {
        &self.identity
    }

    #[must_use]
    pub const fn name(&self) -> &LogicalName {
        &self.identity.name
    }

    #[must_use]
    pub fn origin(&self) -> &Path {
        &self.identity.origin
    }

    /// The handler type that produced this module.
    #[must_use]
    pub const fn handler(&self) -> HandlerType {
        self.handler
    }

    /// Typed shared access; `None` when the unit is not a `U`.
    ///
    /// Drop the guard before calling [`reload`](Module::reload) on the same module.
    #[must_use]
    pub fn read<U: Unit>(&self) -> Option<MappedRwLockReadGuard<'_, U>> {
        RwLockReadGuard::try_map(self.unit.read(), |unit| unit.as_any().downcast_ref::<U>()).ok()
    }

    /// Typed exclusive access; `None` when the unit is not a `U`.
    ///
    /// Drop the guard before calling [`reload`](Module::reload) on the same module.
    #[must_use]
    pub fn write<U: Unit>(&self) -> Option<MappedRwLockWriteGuard<'_, U>> {
        RwLockWriteGuard::try_map(self.unit.write(), |unit| unit.as_any_mut().downcast_mut::<U>())
            .ok()
    }

    /// Untyped shared access to the unit.
    pub fn unit(&self) -> MappedRwLockReadGuard<'_, dyn Unit> {
        RwLockReadGuard::map(self.unit.read(), |unit| &**unit)
    }

    #[must_use]
    pub fn is_populated(&self) -> bool {
        self.unit.read().is_populated()
    }

    #[must_use]
    pub fn summary(&self) -> String {
        self.unit.read().summary()
    }

    /// Resets the unit through its handler and re-reads the origin.
    ///
    /// On failure the unit stays cleared and the error is returned. The lock is not
    /// reentrant, so a reload while any guard of this module is alive fails instead of
    /// waiting for it.
    ///
    /// # Errors
    /// - [`ResolveError::Content`] when the origin can no longer be read or parsed.
    /// - [`ResolveError::Internal`] while a read or write guard is held.
    pub fn reload(&self) -> Result<(), ResolveError> {
        let Some(mut unit) = self.unit.try_write() else {
            return Err(ResolveError::Internal {
                message: "module is borrowed; drop its guards before reloading".into(),
                context: Some(self.identity.name.to_string().into()),
            });
        };
        self.handler.reload(&mut **unit)?;
        debug!(name = %self.identity.name, handler = self.handler.short_name(), "Reloaded module");
        Ok(())
    }
}
