use crate::error::ResolveError;
use crate::unit::Unit;
use anymod_domain::LogicalName;
use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;

/// A format handler: knows how to turn one file into one [`Unit`].
///
/// A handler is instantiated per file with the requested name and the file path, then
/// driven through the two-phase lifecycle:
///
/// 1. [`allocate`](Handler::allocate) builds the unit identity. No I/O happens here.
/// 2. [`populate`](Handler::populate) reads and parses the file into the unit.
///
/// [`reset`](Handler::reset) brings a populated unit back to its allocate-time state and
/// populates it again.
///
/// ```rust
/// use anymod_resolver::{Handler, ResolveError, Unit, UnitIdentity};
/// use anymod_domain::LogicalName;
/// use std::any::Any;
/// use std::path::{Path, PathBuf};
///
/// #[derive(Debug)]
/// struct LineCount { identity: UnitIdentity, lines: Option<usize> }
///
/// impl Unit for LineCount {
///     fn identity(&self) -> &UnitIdentity { &self.identity }
///     fn is_populated(&self) -> bool { self.lines.is_some() }
///     fn clear(&mut self) { self.lines = None; }
///     fn summary(&self) -> String { format!("{:?} lines", self.lines) }
///     fn as_any(&self) -> &dyn Any { self }
///     fn as_any_mut(&mut self) -> &mut dyn Any { self }
/// }
///
/// struct LineCountHandler { path: PathBuf }
///
/// impl Handler for LineCountHandler {
///     type Unit = LineCount;
///     const EXTENSIONS: &'static [&'static str] = &[".log"];
///
///     fn new(_name: &LogicalName, path: &Path) -> Self {
///         Self { path: path.to_path_buf() }
///     }
///
///     fn allocate(&self, name: &str) -> Result<LineCount, ResolveError> {
///         Ok(LineCount { identity: UnitIdentity::allocate(name, &self.path)?, lines: None })
///     }
///
///     fn populate(&self, unit: &mut LineCount) -> Result<(), ResolveError> {
///         let text = std::fs::read_to_string(&self.path)
///             .map_err(|e| ResolveError::content(e, &self.path))?;
///         unit.lines = Some(text.lines().count());
///         Ok(())
///     }
/// }
/// ```
pub trait Handler: Send + Sync + Sized + 'static {
    type Unit: Unit;

    /// Extensions registered when no explicit list is given. Advisory only.
    const EXTENSIONS: &'static [&'static str];

    fn new(name: &LogicalName, path: &Path) -> Self;

    /// Creates an empty unit carrying the identity for `name`.
    ///
    /// # Errors
    /// [`ResolveError::InvalidName`] when `name` is malformed.
    fn allocate(&self, name: &str) -> Result<Self::Unit, ResolveError>;

    /// Reads the file and fills the unit. Calling it again re-reads and overwrites.
    ///
    /// # Errors
    /// [`ResolveError::Content`] when the file is missing, unreadable or malformed.
    fn populate(&self, unit: &mut Self::Unit) -> Result<(), ResolveError>;

    /// Clears the unit back to its allocate-time state, then populates it again.
    ///
    /// # Errors
    /// Whatever [`populate`](Handler::populate) returns.
    fn reset(&self, unit: &mut Self::Unit) -> Result<(), ResolveError> {
        unit.clear();
        self.populate(unit)
    }
}

type LoadFn = fn(&LogicalName, &Path) -> Result<Box<dyn Unit>, ResolveError>;
type ReloadFn = fn(&mut dyn Unit) -> Result<(), ResolveError>;

/// Type-erased descriptor of a [`Handler`] implementation.
///
/// This is what the registry and the native table store. Two descriptors are equal
/// when they describe the same handler type.
#[derive(Clone, Copy)]
pub struct HandlerType {
    id: TypeId,
    name: &'static str,
    extensions: &'static [&'static str],
    load: LoadFn,
    reload: ReloadFn,
}

impl HandlerType {
    #[must_use]
    pub fn of<H: Handler>() -> Self {
        Self {
            id: TypeId::of::<H>(),
            name: type_name::<H>(),
            extensions: H::EXTENSIONS,
            load: load_erased::<H>,
            reload: reload_erased::<H>,
        }
    }

    #[must_use]
    pub fn is<H: Handler>(&self) -> bool {
        self.id == TypeId::of::<H>()
    }

    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name of the handler.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path (`anymod_json::JsonHandler` -> `JsonHandler`).
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }

    /// Extensions the handler declares for itself.
    #[must_use]
    pub const fn extensions(&self) -> &'static [&'static str] {
        self.extensions
    }

    /// Instantiates the handler for `path`, then allocates and populates a unit.
    ///
    /// # Errors
    /// Propagates allocation and population failures unchanged.
    pub fn load(&self, name: &LogicalName, path: &Path) -> Result<Box<dyn Unit>, ResolveError> {
        (self.load)(name, path)
    }

    pub(crate) fn reload(&self, unit: &mut dyn Unit) -> Result<(), ResolveError> {
        (self.reload)(unit)
    }
}

fn load_erased<H: Handler>(name: &LogicalName, path: &Path) -> Result<Box<dyn Unit>, ResolveError> {
    let handler = H::new(name, path);
    let mut unit = handler.allocate(name.as_str())?;
    handler.populate(&mut unit)?;
    Ok(Box::new(unit))
}

fn reload_erased<H: Handler>(unit: &mut dyn Unit) -> Result<(), ResolveError> {
    let identity = unit.identity().clone();
    let unit = unit.as_any_mut().downcast_mut::<H::Unit>().ok_or_else(|| {
        ResolveError::from(format!("unit '{}' was not produced by {}", identity.name, type_name::<H>()))
    })?;

    H::new(&identity.name, &identity.origin).reset(unit)
}

impl PartialEq for HandlerType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for HandlerType {}

impl Hash for HandlerType {
    fn hash<S: Hasher>(&self, state: &mut S) {
        self.id.hash(state);
    }
}

impl fmt::Debug for HandlerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerType").field("name", &self.name).field("extensions", &self.extensions).finish()
    }
}

impl fmt::Display for HandlerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}
