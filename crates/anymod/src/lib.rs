//! Facade crate for the resolver and the reference format handlers.
//! Re-exports domain/kernel primitives and the resolution pipeline, and installs the
//! handlers enabled at build time. Keep this crate thin: it composes other crates.
//!
//! ## Usage
//! ```rust
//! use anymod::{HandlerSet, Resolver};
//!
//! # fn main() -> Result<(), anymod::ResolveError> {
//! # let tmp = tempfile::tempdir().unwrap();
//! # std::fs::write(tmp.path().join("app.json"), r#"{"debug": true}"#).unwrap();
//! let mut resolver = Resolver::builder().search_path(tmp.path()).build()?;
//! anymod::install(resolver.registry_mut(), HandlerSet::ALL)?;
//!
//! let module = resolver.resolve("app")?;
//! # #[cfg(feature = "json")]
//! assert_eq!(module.read::<anymod::handlers::json::JsonUnit>().unwrap().get("debug").unwrap(), true);
//! # Ok(())
//! # }
//! ```

pub use anymod_domain as domain;
pub use anymod_domain::HandlerSet;
pub use anymod_domain::config::ResolverSettings;
pub use anymod_kernel as kernel;
pub use anymod_resolver::*;
use tracing::{info, warn};

/// Reference handlers compiled into this build.
pub mod handlers {
    #[cfg(feature = "image")]
    pub use anymod_image as image;
    #[cfg(feature = "ini")]
    pub use anymod_ini as ini;
    #[cfg(feature = "json")]
    pub use anymod_json as json;
}

/// Build-time enabled handlers (by Cargo feature).
pub mod features {
    use anymod_domain::constants::{IMAGE, INI, JSON};

    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "ini")]
        INI,
        #[cfg(feature = "json")]
        JSON,
        #[cfg(feature = "image")]
        IMAGE,
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Registers the requested reference handlers under their declared extensions.
///
/// Handlers missing from this build are skipped with a warning. Returns the names of
/// the handlers that were installed.
///
/// # Errors
/// Propagates the registry error of the first handler that cannot be bound; handlers
/// installed before it stay registered.
pub fn install(registry: &mut Registry, set: HandlerSet) -> Result<Vec<&'static str>, ResolveError> {
    let mut installed = Vec::new();

    for name in set.names() {
        let handler = match name {
            #[cfg(feature = "ini")]
            domain::constants::INI => HandlerType::of::<handlers::ini::IniHandler>(),
            #[cfg(feature = "json")]
            domain::constants::JSON => HandlerType::of::<handlers::json::JsonHandler>(),
            #[cfg(feature = "image")]
            domain::constants::IMAGE => HandlerType::of::<handlers::image::ImageHandler>(),
            other => {
                warn!(handler = other, "Handler not compiled into this build, skipping");
                continue;
            }
        };
        registry.register_type(handler, RegisterOptions::default())?;
        installed.push(name);
    }

    info!(handlers = ?installed, "Installed reference handlers");
    Ok(installed)
}

/// Builds a resolver from settings and installs the configured handlers.
///
/// # Errors
/// As [`ResolverBuilder::build`] and [`install`].
pub fn resolver(settings: &ResolverSettings) -> Result<Resolver, ResolveError> {
    let mut resolver = Resolver::builder().search_paths(settings.search_paths.iter().cloned()).build()?;
    install(resolver.registry_mut(), settings.handlers)?;
    Ok(resolver)
}
