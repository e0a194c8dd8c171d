use crate::metadata;
use crate::unit::ImageUnit;
use anymod_domain::LogicalName;
use anymod_resolver::{Handler, ResolveError, UnitIdentity};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads raster images (`.jpg`, `.jpeg`, `.png`, `.bmp`, `.tif`, `.tiff`) into an [`ImageUnit`].
#[derive(Debug)]
pub struct ImageHandler {
    path: PathBuf,
}

impl Handler for ImageHandler {
    type Unit = ImageUnit;
    const EXTENSIONS: &'static [&'static str] = &[".jpg", ".jpeg", ".png", ".bmp", ".tif", ".tiff"];

    fn new(_name: &LogicalName, path: &Path) -> Self {
        Self { path: path.to_path_buf() }
    }

    fn allocate(&self, name: &str) -> Result<ImageUnit, ResolveError> {
        Ok(ImageUnit::new(UnitIdentity::allocate(name, &self.path)?))
    }

    fn populate(&self, unit: &mut ImageUnit) -> Result<(), ResolveError> {
        let image = image::open(&self.path).map_err(|e| ResolveError::content(e, &self.path))?;
        let metadata = metadata::read(&self.path);

        debug!(
            path = %self.path.display(),
            width = image.width(),
            height = image.height(),
            tags = metadata.len(),
            "Decoded image"
        );
        unit.fill(image, metadata);
        Ok(())
    }
}
