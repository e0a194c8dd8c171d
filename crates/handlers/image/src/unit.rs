use crate::metadata::Metadata;
use crate::tags::{KNOWN_TAGS, id_of, name_of};
use anymod_resolver::{Unit, UnitIdentity};
use image::DynamicImage;
use std::any::Any;
use std::sync::OnceLock;

/// A decoded image together with its EXIF/TIFF tags.
#[derive(Debug)]
pub struct ImageUnit {
    identity: UnitIdentity,
    image: Option<DynamicImage>,
    metadata: Metadata,
    available: OnceLock<Vec<&'static str>>,
}

impl ImageUnit {
    pub(crate) const fn new(identity: UnitIdentity) -> Self {
        Self { identity, image: None, metadata: Metadata::new(), available: OnceLock::new() }
    }

    pub(crate) fn fill(&mut self, image: DynamicImage, metadata: Metadata) {
        self.image = Some(image);
        self.metadata = metadata;
        self.available = OnceLock::new();
    }

    #[must_use]
    pub const fn image(&self) -> Option<&DynamicImage> {
        self.image.as_ref()
    }

    /// Raw pixel bytes in row-major order; empty when not populated.
    ///
    /// For 8-bit images the length is `width * height * channels`.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.image.as_ref().map(DynamicImage::as_bytes).unwrap_or_default()
    }

    /// `(width, height)`; `(0, 0)` when not populated.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.as_ref().map_or((0, 0), |img| (img.width(), img.height()))
    }

    #[must_use]
    pub fn channels(&self) -> u8 {
        self.image.as_ref().map_or(0, |img| img.color().channel_count())
    }

    /// All tags read from the file, keyed by id.
    #[must_use]
    pub const fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Raw value of tag `id`; `None` when the image does not carry it.
    #[must_use]
    pub fn tag(&self, id: u16) -> Option<&exif::Value> {
        self.metadata.get(&id)
    }

    /// Like [`tag`](ImageUnit::tag), addressed by conventional name (`"Make"`).
    #[must_use]
    pub fn tag_by_name(&self, name: &str) -> Option<&exif::Value> {
        id_of(name).and_then(|id| self.tag(id))
    }

    /// The full table of known tag ids and names.
    #[must_use]
    pub fn known_tags() -> &'static [(u16, &'static str)] {
        KNOWN_TAGS
    }

    /// Sorted names of the known tags present in this image.
    ///
    /// Computed on first use and cached until the unit is cleared or repopulated.
    pub fn available_tags(&self) -> &[&'static str] {
        self.available.get_or_init(|| {
            let mut names: Vec<_> = self.metadata.keys().filter_map(|id| name_of(*id)).collect();
            names.sort_unstable();
            names
        })
    }
}

impl Unit for ImageUnit {
    fn identity(&self) -> &UnitIdentity {
        &self.identity
    }

    fn is_populated(&self) -> bool {
        self.image.is_some()
    }

    fn clear(&mut self) {
        self.image = None;
        self.metadata.clear();
        self.available = OnceLock::new();
    }

    fn summary(&self) -> String {
        if !self.is_populated() {
            return "image, not populated".to_owned();
        }
        let (width, height) = self.dimensions();
        format!("image {width}x{height}, {} channels, {} tags", self.channels(), self.metadata.len())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
