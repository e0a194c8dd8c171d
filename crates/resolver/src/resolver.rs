use crate::builder::ResolverBuilder;
use crate::error::ResolveError;
use crate::handler::HandlerType;
use crate::native::NativeTable;
use crate::registry::Registry;
use crate::unit::Module;
use anymod_domain::{Extension, LogicalName, Tier};
use fxhash::FxHashMap;
use std::cell::OnceCell;
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace};

/// Where an entry of the merged extension table comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Native,
    Protected,
    Open,
}

impl Source {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Protected => "protected",
            Self::Open => "open",
        }
    }
}

impl From<Tier> for Source {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::Protected => Self::Protected,
            Tier::Open => Self::Open,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of [`Resolver::merged_table`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedEntry {
    pub extension: Extension,
    pub handler: HandlerType,
    pub source: Source,
}

/// A file found on the search path together with the handler that will load it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub extension: Extension,
    pub handler: HandlerType,
}

/// The resolution pipeline: logical name in, shared [`Module`] out.
///
/// Owns the search path, the native table, the injected [`Registry`] and the module
/// cache. The registry is consulted on every lookup, so bindings added through
/// [`registry_mut`](Resolver::registry_mut) take effect immediately.
#[derive(Debug)]
pub struct Resolver {
    pub(crate) search_paths: Vec<PathBuf>,
    pub(crate) natives: NativeTable,
    pub(crate) registry: Registry,
    pub(crate) cache: FxHashMap<LogicalName, Arc<Module>>,
}

impl Resolver {
    #[must_use]
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    #[must_use]
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    #[must_use]
    pub const fn natives(&self) -> &NativeTable {
        &self.natives
    }

    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    pub const fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Handler that would load files with `extension`, and where it comes from.
    ///
    /// The native entry stands unless the registry holds a protected binding for the
    /// same extension. Open bindings only fill extensions without a native entry.
    #[must_use]
    pub fn handler_for(&self, extension: &str) -> Option<(HandlerType, Source)> {
        Extension::new(extension).and_then(|ext| self.handler_for_extension(&ext))
    }

    fn handler_for_extension(&self, ext: &Extension) -> Option<(HandlerType, Source)> {
        let binding = self.registry.binding_for(ext);
        match (self.natives.get(ext), binding) {
            (Some(_), Some(binding)) if binding.tier == Tier::Protected => {
                Some((binding.handler, Source::Protected))
            }
            (Some(native), _) => Some((native, Source::Native)),
            (None, Some(binding)) => Some((binding.handler, binding.tier.into())),
            (None, None) => None,
        }
    }

    /// Native table merged with the registry, in probing order: native extensions first,
    /// then registry-only extensions in registration order.
    #[must_use]
    pub fn merged_table(&self) -> Vec<MergedEntry> {
        let natives = self.natives.keys();
        let registered = self
            .registry
            .bindings()
            .into_iter()
            .map(|binding| binding.extension)
            .filter(|ext| !self.natives.contains(ext));

        natives
            .cloned()
            .chain(registered)
            .filter_map(|ext| {
                let (handler, source) = self.handler_for_extension(&ext)?;
                Some(MergedEntry { extension: ext, handler, source })
            })
            .collect()
    }

    /// First file on the search path matching `name` with any merged extension.
    ///
    /// Directories are probed in order; within a directory, extensions follow
    /// [`merged_table`](Resolver::merged_table). Suffixes match in any letter case
    /// (`notes.TXT` is found as `.txt`); the exact lowercase file wins when both exist.
    #[must_use]
    pub fn find(&self, name: &LogicalName) -> Option<Candidate> {
        let table = self.merged_table();
        let stem = name.relative_path();

        self.search_paths.iter().find_map(|dir| {
            let base = dir.join(&stem);
            let siblings = OnceCell::new();
            table.iter().find_map(|entry| {
                let exact = with_suffix(&base, entry.extension.as_str());
                trace!(path = %exact.display(), "Probing");
                let path = if exact.is_file() {
                    exact
                } else {
                    siblings
                        .get_or_init(|| case_folded_siblings(&base))
                        .iter()
                        .find(|(ext, _)| *ext == entry.extension)
                        .map(|(_, path)| path.clone())?
                };
                Some(Candidate { path, extension: entry.extension.clone(), handler: entry.handler })
            })
        })
    }

    /// Resolves `name` to a shared module, loading it on first use.
    ///
    /// Repeated calls return the same `Arc` until the name is [`forget`](Resolver::forget)-ed.
    /// Failures are not cached.
    ///
    /// # Errors
    /// - [`ResolveError::InvalidName`] for a malformed name.
    /// - [`ResolveError::UnresolvedName`] when no file matches on the search path.
    /// - Whatever the handler returns while allocating or populating.
    pub fn resolve(&mut self, name: &str) -> Result<Arc<Module>, ResolveError> {
        let name = parse_name(name)?;
        if let Some(module) = self.cache.get(&name) {
            trace!(name = %name, "Module cache hit");
            return Ok(Arc::clone(module));
        }

        let candidate = self.find(&name).ok_or_else(|| ResolveError::unresolved(&name))?;
        self.load(name, &candidate)
    }

    /// Loads `path` as `name` with the handler its extension maps to, replacing any
    /// cached module of that name.
    ///
    /// # Errors
    /// [`ResolveError::UnresolvedName`] when the extension has no handler, otherwise as
    /// [`resolve`](Resolver::resolve).
    pub fn resolve_file(
        &mut self,
        name: &str,
        path: impl AsRef<Path>,
    ) -> Result<Arc<Module>, ResolveError> {
        let name = parse_name(name)?;
        let path = path.as_ref();

        let candidate = Extension::of_path(path)
            .and_then(|ext| {
                let (handler, _) = self.handler_for_extension(&ext)?;
                Some(Candidate { path: path.to_path_buf(), extension: ext, handler })
            })
            .ok_or_else(|| ResolveError::UnresolvedName {
                message: format!("no handler for '{}'", path.display()).into(),
                context: Some(name.to_string().into()),
            })?;

        self.load(name, &candidate)
    }

    fn load(&mut self, name: LogicalName, candidate: &Candidate) -> Result<Arc<Module>, ResolveError> {
        let unit = candidate.handler.load(&name, &candidate.path)?;
        let module = Arc::new(Module::new(candidate.handler, unit));

        debug!(
            name = %name,
            path = %candidate.path.display(),
            extension = %candidate.extension,
            handler = candidate.handler.short_name(),
            "Resolved module"
        );

        self.cache.insert(name, Arc::clone(&module));
        Ok(module)
    }

    /// Re-reads a cached module in place; the `Arc` stays the same.
    ///
    /// # Errors
    /// [`ResolveError::UnresolvedName`] when `name` is not cached, otherwise as
    /// [`Module::reload`].
    pub fn reload(&mut self, name: &str) -> Result<Arc<Module>, ResolveError> {
        let module = self.cached(name).ok_or_else(|| ResolveError::unresolved(name))?;
        module.reload()?;
        Ok(module)
    }

    /// Drops the cached module for `name`. Outstanding handles stay usable.
    pub fn forget(&mut self, name: &str) -> Option<Arc<Module>> {
        let name = LogicalName::new(name)?;
        self.cache.remove(&name)
    }

    #[must_use]
    pub fn cached(&self, name: &str) -> Option<Arc<Module>> {
        let name = LogicalName::new(name)?;
        self.cache.get(&name).cloned()
    }

    /// Names currently cached, sorted.
    #[must_use]
    pub fn cached_names(&self) -> Vec<&LogicalName> {
        let mut names: Vec<_> = self.cache.keys().collect();
        names.sort();
        names
    }
}

fn parse_name(raw: &str) -> Result<LogicalName, ResolveError> {
    LogicalName::new(raw).ok_or_else(|| ResolveError::invalid_name(raw))
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut file = OsString::from(base);
    file.push(suffix);
    PathBuf::from(file)
}

/// Files next to `base` named `<leaf>.<suffix>`, keyed by the normalized suffix.
fn case_folded_siblings(base: &Path) -> Vec<(Extension, PathBuf)> {
    let (Some(dir), Some(leaf)) = (base.parent(), base.file_name()) else {
        return Vec::new();
    };
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut found: Vec<_> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.file_stem() == Some(leaf) && path.is_file())
        .filter_map(|path| Some((Extension::of_path(&path)?, path)))
        .collect();
    found.sort_by(|a, b| a.1.cmp(&b.1));
    found
}
