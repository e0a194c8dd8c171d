use std::borrow::Cow;
use std::path::Path;

/// Boxed cause of a [`ResolveError::Content`] failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures raised by the registry, the handler protocol and the resolver.
#[anymod_derive::anymod_error]
pub enum ResolveError {
    #[error("Registry is not activated{}: {message}", format_context(.context))]
    NotActivated { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Extension already bound{}: {message}", format_context(.context))]
    OccupiedExtension { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Extension is protected{}: {message}", format_context(.context))]
    ProtectedExtension { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid extension{}: {message}", format_context(.context))]
    InvalidExtension { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid unit name{}: {message}", format_context(.context))]
    InvalidName { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Unresolved unit{}: {message}", format_context(.context))]
    UnresolvedName { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Content could not be loaded{}: {source}", format_context(.context))]
    Content { source: BoxError, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ResolveError {
    /// Wraps a read or parse failure, recording the offending file as context.
    pub fn content(source: impl Into<BoxError>, path: &Path) -> Self {
        Self::Content { source: source.into(), context: Some(path.display().to_string().into()) }
    }

    pub(crate) fn invalid_name(raw: &str) -> Self {
        Self::InvalidName { message: format!("'{raw}' is not a dotted identifier").into(), context: None }
    }

    pub(crate) fn invalid_extension(raw: &str) -> Self {
        Self::InvalidExtension {
            message: format!("'{raw}' is not a single-segment file suffix").into(),
            context: None,
        }
    }

    pub(crate) fn unresolved(name: impl std::fmt::Display) -> Self {
        Self::UnresolvedName { message: format!("no unit named '{name}'").into(), context: None }
    }
}
