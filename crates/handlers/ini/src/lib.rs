//! Configuration (INI) format handler.
//!
//! ```ini
//! [DEFAULT]
//! timeout = 30
//!
//! [server]
//! host = example.org
//! paths = /srv
//!     /opt
//! ```
//!
//! resolves to a [`ConfigUnit`] where `unit["server"]["timeout"] == "30"` and
//! `unit["server"]["paths"] == "/srv\n/opt"`.
//!
//! ```rust
//! let sections = anymod_ini::parse("[a]\nK = v\n").unwrap();
//! assert_eq!(&sections["a"]["k"], "v");
//! ```

mod error;
mod handler;
mod parser;
mod section;
mod unit;

pub use error::{IniError, IniErrorExt};
pub use handler::IniHandler;
pub use parser::{Rule, Sections, parse};
pub use section::Section;
pub use unit::ConfigUnit;
