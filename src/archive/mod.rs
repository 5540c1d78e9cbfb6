mod builder;
mod manifest;

pub use builder::{
    archive_file_name, encode_png, entry_name, ArchiveBuilder, ZIP_COMPRESSION_LEVEL,
};
pub use manifest::{Manifest, MANIFEST_NAME};
