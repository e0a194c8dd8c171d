use crate::error::ResolveError;
use crate::handler::{Handler, HandlerType};
use anymod_domain::{Extension, Tier};
use fxhash::FxHashSet;
use indexmap::IndexMap;
use std::borrow::Cow;
use tracing::{debug, info, warn};

/// How a handler should be bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterOptions {
    /// Explicit extensions; `None` uses the handler's declared ones.
    pub extensions: Option<Vec<String>>,
    /// Replace a handler already bound to the extension.
    pub override_existing: bool,
    /// Allow binding an extension the resolver handles natively.
    pub override_protected: bool,
}

impl RegisterOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = Some(extensions.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub const fn override_existing(mut self, enable: bool) -> Self {
        self.override_existing = enable;
        self
    }

    #[must_use]
    pub const fn override_protected(mut self, enable: bool) -> Self {
        self.override_protected = enable;
        self
    }
}

/// One extension to handler association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub extension: Extension,
    pub handler: HandlerType,
    pub tier: Tier,
}

/// Extension keyed handler registry with two priority tiers.
///
/// The registry starts inactive and refuses registrations until it is activated with
/// the reserved set (the extensions handled natively). Reserved extensions land in the
/// protected tier, everything else in the open tier. Lookups consult the protected tier
/// first.
///
/// There is no internal locking: mutation goes through `&mut self`. Share a registry
/// across threads by wrapping it in a mutex.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    active: bool,
    reserved: FxHashSet<Extension>,
    protected: IndexMap<Extension, HandlerType>,
    open: IndexMap<Extension, HandlerType>,
}

impl Registry {
    /// An inactive, empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty registry, already activated with `reserved`.
    #[must_use]
    pub fn activated<I: IntoIterator<Item = Extension>>(reserved: I) -> Self {
        let mut registry = Self::new();
        registry.activate(reserved);
        registry
    }

    /// Activates the registry. Calling it again replaces the reserved set.
    ///
    /// Bindings are re-tiered against the new set: an open binding of a newly reserved
    /// extension never had `override_protected` and is evicted, a protected binding of an
    /// extension that is no longer reserved moves to the open tier unless one is there.
    pub fn activate<I: IntoIterator<Item = Extension>>(&mut self, reserved: I) {
        self.reserved = reserved.into_iter().collect();
        self.active = true;

        let reserved = &self.reserved;
        self.open.retain(|ext, handler| {
            let keep = !reserved.contains(ext);
            if !keep {
                warn!(
                    extension = %ext,
                    handler = handler.short_name(),
                    "Evicted open binding of a reserved extension"
                );
            }
            keep
        });

        let mut demoted = Vec::new();
        self.protected.retain(|ext, handler| {
            reserved.contains(ext) || {
                demoted.push((ext.clone(), *handler));
                false
            }
        });
        for (ext, handler) in demoted {
            self.open.entry(ext).or_insert(handler);
        }

        info!(reserved = self.reserved.len(), bindings = self.len(), "Handler registry activated");
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// `true` when `extension` belongs to the reserved set. Invalid input is never reserved.
    #[must_use]
    pub fn is_reserved(&self, extension: &str) -> bool {
        Extension::new(extension).is_some_and(|ext| self.reserved.contains(&ext))
    }

    #[must_use]
    pub fn tier_of(&self, extension: &Extension) -> Tier {
        if self.reserved.contains(extension) { Tier::Protected } else { Tier::Open }
    }

    /// Registers `H` under its declared extensions or the ones in `options`.
    ///
    /// # Errors
    /// See [`Registry::register_type`].
    pub fn register<H: Handler>(&mut self, options: RegisterOptions) -> Result<(), ResolveError> {
        self.register_type(HandlerType::of::<H>(), options)
    }

    /// Registers a handler descriptor.
    ///
    /// Every requested extension is validated before anything is written, so a failed
    /// call leaves the registry exactly as it was.
    ///
    /// # Errors
    /// - [`ResolveError::NotActivated`] before [`activate`](Registry::activate).
    /// - [`ResolveError::InvalidExtension`] for an empty list or a malformed suffix.
    /// - [`ResolveError::ProtectedExtension`] for a reserved extension without
    ///   `override_protected`.
    /// - [`ResolveError::OccupiedExtension`] for a bound extension without
    ///   `override_existing`. Reserved extensions always count as bound.
    pub fn register_type(
        &mut self,
        handler: HandlerType,
        options: RegisterOptions,
    ) -> Result<(), ResolveError> {
        if !self.active {
            return Err(ResolveError::NotActivated {
                message: Cow::Borrowed("activate the registry before registering handlers"),
                context: Some(handler.name().into()),
            });
        }

        let requested: Vec<Cow<'_, str>> = match &options.extensions {
            Some(list) => list.iter().map(|e| Cow::Borrowed(e.as_str())).collect(),
            None => handler.extensions().iter().map(|e| Cow::Borrowed(*e)).collect(),
        };
        if requested.is_empty() {
            return Err(ResolveError::InvalidExtension {
                message: Cow::Borrowed("no extensions requested"),
                context: Some(handler.name().into()),
            });
        }

        let mut plan: Vec<(Extension, Tier)> = Vec::with_capacity(requested.len());
        for raw in &requested {
            let ext = Extension::new(raw).ok_or_else(|| ResolveError::invalid_extension(raw))?;
            if plan.iter().any(|(planned, _)| *planned == ext) {
                continue;
            }
            let tier = self.tier_of(&ext);
            self.check(&ext, tier, handler, &options)?;
            plan.push((ext, tier));
        }

        for (ext, tier) in plan {
            let previous = self.tier_mut(tier).insert(ext.clone(), handler);
            debug!(
                extension = %ext,
                tier = %tier,
                handler = handler.short_name(),
                replaced = previous.map(|p| p.short_name()),
                "Bound handler"
            );
        }

        Ok(())
    }

    fn check(
        &self,
        ext: &Extension,
        tier: Tier,
        handler: HandlerType,
        options: &RegisterOptions,
    ) -> Result<(), ResolveError> {
        if tier == Tier::Protected && !options.override_protected {
            return Err(ResolveError::ProtectedExtension {
                message: format!("'{ext}' is handled natively; pass override_protected").into(),
                context: Some(handler.name().into()),
            });
        }

        let occupant = match tier {
            Tier::Protected => Some(self.protected.get(ext).map_or("native handler", |h| h.short_name())),
            Tier::Open => self.open.get(ext).map(HandlerType::short_name),
        };
        if let Some(occupant) = occupant
            && !options.override_existing
        {
            return Err(ResolveError::OccupiedExtension {
                message: format!("'{ext}' is bound to {occupant}; pass override_existing").into(),
                context: Some(handler.name().into()),
            });
        }

        Ok(())
    }

    fn tier_mut(&mut self, tier: Tier) -> &mut IndexMap<Extension, HandlerType> {
        match tier {
            Tier::Protected => &mut self.protected,
            Tier::Open => &mut self.open,
        }
    }

    /// Handler bound to `extension`, protected tier first.
    #[must_use]
    pub fn lookup(&self, extension: &str) -> Option<HandlerType> {
        Extension::new(extension).and_then(|ext| self.lookup_extension(&ext))
    }

    #[must_use]
    pub fn lookup_extension(&self, ext: &Extension) -> Option<HandlerType> {
        self.protected.get(ext).or_else(|| self.open.get(ext)).copied()
    }

    /// Like [`lookup`](Registry::lookup), but also reports the tier.
    #[must_use]
    pub fn binding(&self, extension: &str) -> Option<Binding> {
        Extension::new(extension).and_then(|ext| self.binding_for(&ext))
    }

    #[must_use]
    pub fn binding_for(&self, ext: &Extension) -> Option<Binding> {
        let (handler, tier) = match self.protected.get(ext) {
            Some(handler) => (*handler, Tier::Protected),
            None => (*self.open.get(ext)?, Tier::Open),
        };
        Some(Binding { extension: ext.clone(), handler, tier })
    }

    /// All bindings: protected tier first, each tier in registration order.
    #[must_use]
    pub fn bindings(&self) -> Vec<Binding> {
        let protected = self.protected.iter().map(|(ext, handler)| (ext, handler, Tier::Protected));
        let open = self.open.iter().map(|(ext, handler)| (ext, handler, Tier::Open));

        protected
            .chain(open)
            .map(|(ext, handler, tier)| Binding { extension: ext.clone(), handler: *handler, tier })
            .collect()
    }

    /// Removes the binding for `extension`, returning its handler.
    pub fn unregister(&mut self, extension: &str) -> Option<HandlerType> {
        let ext = Extension::new(extension)?;
        let removed = self.protected.shift_remove(&ext).or_else(|| self.open.shift_remove(&ext));
        if let Some(handler) = removed {
            debug!(extension = %ext, handler = handler.short_name(), "Unbound handler");
        }
        removed
    }

    /// Drops every binding. Activation and the reserved set are kept.
    pub fn clear(&mut self) {
        self.protected.clear();
        self.open.clear();
        debug!("Handler registry cleared");
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.protected.len() + self.open.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.protected.is_empty() && self.open.is_empty()
    }
}
