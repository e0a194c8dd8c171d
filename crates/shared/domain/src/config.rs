use crate::handlers::HandlerSet;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration shared by the resolver front-ends.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnymodConfigInner {
    pub resolver: ResolverSettings,
    pub logging: LoggingSettings,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct AnymodConfig {
    #[serde(flatten, default)]
    inner: Arc<AnymodConfigInner>,
}

impl Deref for AnymodConfig {
    type Target = AnymodConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AnymodConfig {
    fn deref_mut(&mut self) -> &mut AnymodConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Where units are searched for and which reference handlers are installed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Directories searched in order; the first match wins.
    pub search_paths: Vec<PathBuf>,
    /// Reference handlers registered at startup.
    pub handlers: HandlerSet,
}

/// Logging knobs understood by the command line front-end.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Minimum level (`error`, `warn`, `info`, `debug`, `trace`, `off`).
    pub level: String,
    /// Optional directive string, same syntax as `RUST_LOG`.
    pub filter: Option<String>,
    /// Directory for rolling log files; console only when unset.
    pub directory: Option<PathBuf>,
    /// Emit file logs as JSON lines.
    pub json: bool,
}

// --- Default ---

impl Default for ResolverSettings {
    fn default() -> Self {
        Self { search_paths: vec![PathBuf::from(".")], handlers: HandlerSet::ALL }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self { level: "warn".to_owned(), filter: None, directory: None, json: false }
    }
}
