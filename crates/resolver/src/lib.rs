//! Extension keyed format handlers and the pipeline that resolves logical names with them.
//!
//! # Architectural Overview
//!
//! 1.  **[`Handler`]**: a format plug-in. Two-phase lifecycle: `allocate` (identity, no
//!     I/O) then `populate` (read and parse), plus `reset` for reloads.
//! 2.  **[`Registry`]**: extension to [`HandlerType`] bindings in two tiers. `protected`
//!     extensions shadow the native table and need explicit consent; `open` ones fill gaps.
//! 3.  **[`Resolver`]**: walks the search path with the native table merged with the
//!     registry, loads the first match and caches the resulting [`Module`].
//!
//! # Examples
//!
//! ```rust
//! use anymod_resolver::{Resolver, ResolveError, TextUnit};
//!
//! # fn main() -> Result<(), ResolveError> {
//! # let tmp = tempfile::tempdir().unwrap();
//! # std::fs::create_dir(tmp.path().join("docs")).unwrap();
//! # std::fs::write(tmp.path().join("docs/readme.txt"), "hello").unwrap();
//! let mut resolver = Resolver::builder().search_path(tmp.path()).build()?;
//!
//! let module = resolver.resolve("docs.readme")?;
//! assert_eq!(module.read::<TextUnit>().unwrap().text(), Some("hello"));
//!
//! // Same name, same module.
//! assert!(std::sync::Arc::ptr_eq(&module, &resolver.resolve("docs.readme")?));
//! # Ok(())
//! # }
//! ```

mod builder;
mod error;
mod handler;
mod native;
mod registry;
mod resolver;
mod unit;

pub use builder::{NoPath, ResolverBuilder, WithPaths};
pub use error::{BoxError, ResolveError, ResolveErrorExt};
pub use handler::{Handler, HandlerType};
pub use native::{BytesHandler, BytesUnit, NativeTable, TextHandler, TextUnit};
pub use registry::{Binding, RegisterOptions, Registry};
pub use resolver::{Candidate, MergedEntry, Resolver, Source};
pub use unit::{Module, Unit, UnitIdentity};

pub use anymod_domain::{Extension, LogicalName, Tier};
