use anymod_domain::constants::ENV_PREFIX;
use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default configuration file stem, resolved against the working directory.
pub const DEFAULT_CONFIG: &str = "anymod";

/// Custom error type for config loading.
#[anymod_derive::anymod_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads settings from a file and overlays environment variables.
///
/// 1. **Base File**: `path`, or the `anymod` file (any format the `config` crate knows)
///    in the working directory.
/// 2. **Environment Overrides**: variables prefixed with `ANYMOD__`. Nested keys are
///    separated by double underscores (`ANYMOD__LOGGING__LEVEL` maps to `logging.level`).
///
/// # Errors
/// Fails when the file is missing, when it cannot be parsed, or when the merged values
/// do not match the shape of `T`.
///
/// # Example
/// ```rust
/// use anymod_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     level: String,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(environment());

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

/// Like [`load_config`], but only overlays the environment when no file is given.
///
/// Front-ends use this when the config file is optional.
///
/// # Errors
/// Fails when the given file cannot be read or the merged values do not match `T`.
pub fn load_config_or_env<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    if let Some(path) = path {
        return load_config(Some(path));
    }

    Config::builder()
        .add_source(environment())
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}

/// `ANYMOD__SECTION__KEY` overrides; comma separated search paths become a list.
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .convert_case(config::Case::Snake)
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("resolver.search_paths")
}
