//! Stable string identifiers shared by configuration files, the CLI, and logs.

/// Configuration (INI) handler.
pub const INI: &str = "ini";
/// JSON handler.
pub const JSON: &str = "json";
/// Image handler.
pub const IMAGE: &str = "image";

/// Section name whose fields are inherited by every other configuration section.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Prefix of environment variables overriding configuration values.
pub const ENV_PREFIX: &str = "ANYMOD";
