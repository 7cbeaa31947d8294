//! Paths derived from a metadata file path.
//!
//! For `scans/plate.inselect` the scanned image is `scans/plate.<ext>` and
//! the optional thumbnail is `scans/plate_thumbnail.<ext>`. Candidates are
//! probed in the order of the extension lists below.

use std::path::{Path, PathBuf};

/// Extensions tried, in order, for the scanned image.
pub const SCANNED_EXTENSIONS: &[&str] = &["png", "tiff", "tif", "jpg", "jpeg", "bmp"];

/// Inserted between the stem and the extension of the thumbnail.
pub const THUMBNAIL_SUFFIX: &str = "_thumbnail";

/// Extensions tried, in order, for the thumbnail.
pub const THUMBNAIL_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Extension of every exported crop file.
pub const CROP_EXTENSION: &str = "tiff";

pub fn scanned_candidates(metadata: &Path) -> Vec<PathBuf> {
    SCANNED_EXTENSIONS
        .iter()
        .map(|ext| metadata.with_extension(ext))
        .collect()
}

pub fn thumbnail_candidates(metadata: &Path) -> Vec<PathBuf> {
    let stem = metadata
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    THUMBNAIL_EXTENSIONS
        .iter()
        .map(|ext| metadata.with_file_name(format!("{stem}{THUMBNAIL_SUFFIX}.{ext}")))
        .collect()
}

/// Returns the first candidate that is an existing file.
pub fn first_existing(candidates: &[PathBuf]) -> Option<&PathBuf> {
    candidates.iter().find(|path| path.is_file())
}

/// File name of the crop for the item at `index` (zero-based) out of `count`.
///
/// Names are one-based and zero-padded to at least four digits, wider when
/// `count` needs it, so that a directory listing sorts in item order:
/// `0001.tiff`, `0002.tiff`, ...
pub fn crop_file_name(index: usize, count: usize) -> String {
    let width = count.max(1).to_string().len().max(4);
    format!("{:0width$}.{}", index + 1, CROP_EXTENSION)
}
