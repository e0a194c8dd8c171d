use crate::error::ResolveError;
use crate::handler::{Handler, HandlerType};
use crate::native::NativeTable;
use crate::registry::Registry;
use crate::resolver::Resolver;
use fxhash::FxHashMap;
use private::Sealed;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Default)]
struct ResolverConfig {
    natives: Option<NativeTable>,
    native_overrides: Vec<(String, HandlerType)>,
    registry: Option<Registry>,
}

#[derive(Debug, Default)]
pub struct NoPath;
#[derive(Debug)]
pub struct WithPaths(Vec<PathBuf>);

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoPath {}
impl Sealed for WithPaths {}

/// Typestate builder for [`Resolver`]; a search path is required before `build`.
#[allow(private_bounds)]
#[derive(Debug, Default)]
pub struct ResolverBuilder<S: Sealed = NoPath> {
    state: S,
    config: ResolverConfig,
}

#[allow(private_bounds)]
impl<S: Sealed> ResolverBuilder<S> {
    /// Replaces the whole native table (default: `.txt` and `.bin`).
    #[must_use = "Sets the native extension table"]
    pub fn natives(mut self, table: NativeTable) -> Self {
        self.config.natives = Some(table);
        self
    }

    /// Adds or replaces a native entry.
    #[must_use = "Adds a native extension"]
    pub fn native<H: Handler>(mut self, extension: impl Into<String>) -> Self {
        self.config.native_overrides.push((extension.into(), HandlerType::of::<H>()));
        self
    }

    /// Uses `registry` instead of a fresh one. It is activated during `build`.
    #[must_use = "Injects the handler registry"]
    pub fn registry(mut self, registry: Registry) -> Self {
        self.config.registry = Some(registry);
        self
    }

    fn transition<N: Sealed>(self, state: N) -> ResolverBuilder<N> {
        ResolverBuilder { state, config: self.config }
    }
}

impl ResolverBuilder<NoPath> {
    #[must_use = "Creates a new resolver builder"]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "Sets the first search directory"]
    pub fn search_path(self, dir: impl Into<PathBuf>) -> ResolverBuilder<WithPaths> {
        self.transition(WithPaths(vec![dir.into()]))
    }

    #[must_use = "Sets the search directories"]
    pub fn search_paths<I, P>(self, dirs: I) -> ResolverBuilder<WithPaths>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.transition(WithPaths(dirs.into_iter().map(Into::into).collect()))
    }
}

impl ResolverBuilder<WithPaths> {
    #[must_use = "Appends a search directory"]
    pub fn search_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.state.0.push(dir.into());
        self
    }

    #[must_use = "Appends search directories"]
    pub fn search_paths<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.state.0.extend(dirs.into_iter().map(Into::into));
        self
    }

    /// Assembles the native table, activates the registry with its keys and returns
    /// the resolver.
    ///
    /// # Errors
    /// - [`ResolveError::InvalidExtension`] for a malformed native extension.
    /// - [`ResolveError::Internal`] when the search path list ended up empty.
    pub fn build(self) -> Result<Resolver, ResolveError> {
        let WithPaths(search_paths) = self.state;
        if search_paths.is_empty() {
            return Err("at least one search path is required".into());
        }

        let mut natives = self.config.natives.unwrap_or_default();
        for (extension, handler) in self.config.native_overrides {
            natives.insert(&extension, handler)?;
        }

        let mut registry = self.config.registry.unwrap_or_default();
        registry.activate(natives.keys().cloned());

        info!(
            search_paths = search_paths.len(),
            natives = natives.len(),
            bindings = registry.len(),
            "Resolver ready"
        );

        Ok(Resolver { search_paths, natives, registry, cache: FxHashMap::default() })
    }
}
