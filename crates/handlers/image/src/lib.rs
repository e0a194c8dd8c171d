//! Image format handler.
//!
//! Pixels are decoded with the `image` crate; the embedded EXIF/TIFF block is read with
//! `kamadak-exif` and kept as raw values keyed by tag id. Absent tags read as `None`.

mod handler;
mod metadata;
pub mod tags;
mod unit;

pub use handler::ImageHandler;
pub use metadata::Metadata;
pub use unit::ImageUnit;

pub use exif::Value as TagValue;
pub use image::DynamicImage;
