//! Documents: a metadata file, its scanned image, and the items on it.
//!
//! A [`Document`] is created by [`Document::load`], has its items replaced
//! wholesale by [`Document::set_items`], and is written back by
//! [`Document::save`]. [`Document::save_crops`] exports one image file per
//! item without touching the document.

pub mod companion;
pub mod io_json;

use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde_json::{Map, Value};

use crate::error::InselectError;
use crate::image_handle::ImageHandle;
use crate::model::{Item, Normalized, Rect};
use crate::validation::validate_normalised;
use io_json::Metadata;

/// Where a document is in its load/edit/save cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentState {
    /// Freshly loaded, items as read from disk.
    Loaded,
    /// Items replaced since the last load or save.
    Mutated,
    /// Items written to disk by [`Document::save`].
    Persisted,
}

/// A scanned image together with its annotated items.
///
/// Every item set committed through [`Document::set_items`] satisfies the
/// normalised-rect invariant. Items read by [`Document::load`] are not
/// checked (rects outside normalised space are logged and kept), so a
/// document written by another tool can still be opened and repaired.
pub struct Document {
    path: PathBuf,
    scanned: ImageHandle,
    thumbnail: Option<ImageHandle>,
    items: Vec<Item>,
    extra: Map<String, Value>,
    state: DocumentState,
}

impl Document {
    /// Loads a document from its metadata file.
    ///
    /// The scanned image and thumbnail are located with
    /// [`companion::scanned_candidates`] and
    /// [`companion::thumbnail_candidates`]; neither is decoded.
    ///
    /// # Errors
    /// - [`InselectError::NotFound`] if `path` does not exist
    /// - [`InselectError::MissingScannedImage`] if no scanned image exists
    /// - [`InselectError::MetadataParse`] if the metadata is malformed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InselectError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(InselectError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let candidates = companion::scanned_candidates(path);
        let scanned = match companion::first_existing(&candidates) {
            Some(found) => ImageHandle::open(found)?,
            None => {
                return Err(InselectError::MissingScannedImage {
                    path: path.to_path_buf(),
                    candidates: candidates
                        .iter()
                        .map(|c| c.display().to_string())
                        .collect::<Vec<_>>()
                        .join(", "),
                });
            }
        };

        let thumbnail = companion::first_existing(&companion::thumbnail_candidates(path))
            .map(ImageHandle::open)
            .transpose()?;

        let Metadata { items, extra } = io_json::read_metadata(path)?;
        if let Err(err) = validate_normalised(items.iter().map(|item| &item.rect)) {
            warn!("{}: {}", path.display(), err);
        }

        info!(
            "loaded {} with {} item(s), scanned image {}",
            path.display(),
            items.len(),
            scanned.path().display()
        );

        Ok(Self {
            path: path.to_path_buf(),
            scanned,
            thumbnail,
            items,
            extra,
            state: DocumentState::Loaded,
        })
    }

    /// Path of the metadata file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the handle of the scanned image.
    pub fn scanned(&self) -> &ImageHandle {
        &self.scanned
    }

    /// The thumbnail, if a thumbnail file existed at load time.
    pub fn thumbnail(&self) -> Option<&ImageHandle> {
        self.thumbnail.as_ref()
    }

    /// Returns the items in document order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns where the document is in its load/edit/save lifecycle.
    pub fn state(&self) -> DocumentState {
        self.state
    }

    /// Replaces every item.
    ///
    /// # Errors
    /// Returns [`InselectError::NotNormalised`] if any rect is outside
    /// normalised space. The current items are then left as they were.
    pub fn set_items(&mut self, items: Vec<Item>) -> Result<(), InselectError> {
        validate_normalised(items.iter().map(|item| &item.rect))?;
        debug!(
            "{}: replacing {} item(s) with {}",
            self.path.display(),
            self.items.len(),
            items.len()
        );
        self.items = items;
        self.state = DocumentState::Mutated;
        Ok(())
    }

    /// Writes the items back to the metadata file.
    ///
    /// Saving unchanged items again writes identical bytes.
    pub fn save(&mut self) -> Result<(), InselectError> {
        let metadata = Metadata {
            items: self.items.clone(),
            extra: self.extra.clone(),
        };
        io_json::write_metadata(&self.path, &metadata)?;
        info!("saved {} item(s) to {}", self.items.len(), self.path.display());
        self.state = DocumentState::Persisted;
        Ok(())
    }

    /// Exports one crop per item into a new directory under the system
    /// temporary directory.
    ///
    /// The caller owns the returned directory and should remove it when done.
    /// Crops are named by [`companion::crop_file_name`]. An item whose rect
    /// covers less than one pixel on either axis cannot be encoded and fails
    /// the export with [`InselectError::CropWrite`].
    pub fn save_crops(&self) -> Result<PathBuf, InselectError> {
        self.save_crops_in(&std::env::temp_dir())
    }

    /// Like [`Document::save_crops`], but creates the directory under `parent`.
    ///
    /// If any crop fails, the new directory is removed before the error is
    /// returned.
    pub fn save_crops_in(&self, parent: &Path) -> Result<PathBuf, InselectError> {
        let dir = tempfile::Builder::new()
            .prefix("inselect-crops-")
            .tempdir_in(parent)?;

        let rects: Vec<Rect<Normalized>> = self.items.iter().map(|item| item.rect).collect();
        let count = rects.len();
        let paths: Vec<PathBuf> = (0..count)
            .map(|index| dir.path().join(companion::crop_file_name(index, count)))
            .collect();
        self.scanned.save_crops(&rects, &paths)?;

        let dir = dir.keep();
        info!("wrote {} crop(s) to {}", paths.len(), dir.display());
        Ok(dir)
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("path", &self.path)
            .field("scanned", &self.scanned)
            .field("thumbnail", &self.thumbnail)
            .field("items", &self.items.len())
            .field("state", &self.state)
            .finish()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Document ['{}'] [{} items]",
            self.scanned.path().display(),
            self.items.len()
        )
    }
}
