use exif::{Context, In, Reader};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, warn};

/// Raw tag values keyed by numeric tag id.
pub type Metadata = BTreeMap<u16, exif::Value>;

/// Reads the primary IFD (TIFF and EXIF contexts) of the embedded metadata block.
///
/// A file without a block yields an empty map; so does a damaged block, after a warning.
pub(crate) fn read(path: &Path) -> Metadata {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Cannot reopen image for metadata");
            return Metadata::new();
        }
    };

    match Reader::new().read_from_container(&mut BufReader::new(file)) {
        Ok(exif) => exif
            .fields()
            .filter(|field| field.ifd_num == In::PRIMARY)
            .filter(|field| matches!(field.tag.context(), Context::Tiff | Context::Exif))
            .map(|field| (field.tag.number(), field.value.clone()))
            .collect(),
        Err(exif::Error::NotFound(_) | exif::Error::InvalidFormat(_)) => {
            debug!(path = %path.display(), "No metadata block");
            Metadata::new()
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Ignoring unreadable metadata block");
            Metadata::new()
        }
    }
}
