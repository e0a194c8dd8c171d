//! JSON format handler.
//!
//! A [`JsonUnit`] wraps one document. Whether it is an object, an array or a scalar is
//! only known after loading, so every operation checks the shape through [`JsonView`]
//! and reports [`JsonError::TypeMismatch`] instead of guessing.
//!
//! ```rust
//! # use anymod_json::{JsonHandler, JsonUnit};
//! # use anymod_resolver::{Handler, LogicalName};
//! # let dir = tempfile::tempdir().unwrap();
//! # let path = dir.path().join("list.json");
//! # std::fs::write(&path, "[1, 2, 3]").unwrap();
//! # let name = LogicalName::new("list").unwrap();
//! let handler = JsonHandler::new(&name, &path);
//! let mut unit = handler.allocate("list").unwrap();
//! handler.populate(&mut unit).unwrap();
//!
//! unit.insert(0, 0).unwrap();
//! assert_eq!(unit.len().unwrap(), 4);
//! assert_eq!(unit.get(0_usize).unwrap(), 0);
//! ```

mod error;
mod handler;
mod unit;
mod view;

pub use error::{JsonError, JsonErrorExt};
pub use handler::JsonHandler;
pub use unit::JsonUnit;
pub use view::{Item, JsonView, Key};

pub use serde_json::Value;
