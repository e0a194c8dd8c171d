//! Kernel utilities shared across the resolver front-ends.
//! Keep this crate lightweight; it re-exports the domain types and the layered config loader.
//!
//! ## Config loading
//! ```rust,ignore
//! use anymod_kernel::config::load_config;
//! use anymod_kernel::domain::config::AnymodConfig;
//!
//! let cfg: AnymodConfig = load_config(Some("anymod.toml")).unwrap_or_default();
//! ```
pub mod config;

pub use anymod_domain as domain;
