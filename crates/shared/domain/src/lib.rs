//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`, `bitflags`).
//! Keep it lean: no I/O or heavy logic, just data, normalization, and simple helpers.

pub mod config;
pub mod constants;
pub mod extension;
pub mod handlers;
pub mod name;

pub use extension::{Extension, Tier};
pub use handlers::HandlerSet;
pub use name::LogicalName;
