//! Lazily decoded image files.
//!
//! An [`ImageHandle`] is cheap to create: [`ImageHandle::open`] only checks
//! that the file exists. Pixels are decoded on the first call that needs
//! them and kept for the lifetime of the handle.

use std::cell::OnceCell;
use std::fmt;
use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView, ImageError, ImageReader};
use log::debug;

use crate::error::InselectError;
use crate::model::{Normalized, Pixel, Rect};
use crate::validation;

/// One image file plus its decoded pixels, once something has asked for them.
///
/// Handles are single-threaded: the pixel slot is a [`OnceCell`], so a handle
/// is `Send` but not `Sync`.
pub struct ImageHandle {
    path: PathBuf,
    pixels: OnceCell<DynamicImage>,
}

impl ImageHandle {
    /// Creates a handle for an existing file without decoding it.
    ///
    /// # Errors
    /// Returns [`InselectError::NotFound`] if `path` is not an existing file.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, InselectError> {
        let path = path.into();
        if !path.is_file() {
            return Err(InselectError::NotFound { path });
        }
        Ok(Self {
            path,
            pixels: OnceCell::new(),
        })
    }

    /// Returns the path of the image file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true once the pixels have been decoded.
    pub fn is_loaded(&self) -> bool {
        self.pixels.get().is_some()
    }

    /// Returns the decoded pixels, decoding the file on first use.
    ///
    /// # Errors
    /// Returns [`InselectError::ImageLoad`] if the file cannot be read or its
    /// bytes are not a supported image. A failed decode is not cached; the
    /// next call tries again.
    pub fn array(&self) -> Result<&DynamicImage, InselectError> {
        if let Some(pixels) = self.pixels.get() {
            return Ok(pixels);
        }

        let decoded = decode(&self.path)?;
        debug!(
            "decoded {} ({}x{})",
            self.path.display(),
            decoded.width(),
            decoded.height()
        );
        Ok(self.pixels.get_or_init(|| decoded))
    }

    /// Returns `(width, height)` of the decoded image.
    pub fn dimensions(&self) -> Result<(u32, u32), InselectError> {
        Ok(self.array()?.dimensions())
    }

    /// Maps normalised rects onto this image's pixel grid.
    ///
    /// The image is decoded before the iterator is returned; the iterator
    /// itself is lazy and can be cloned to walk the rects again. Rects are
    /// assumed to be normalised already, see [`Rect::to_pixel`] for the
    /// rounding rule.
    pub fn from_normalised<'a>(
        &self,
        rects: &'a [Rect<Normalized>],
    ) -> Result<impl Iterator<Item = Rect<Pixel>> + Clone + 'a, InselectError> {
        let (width, height) = self.dimensions()?;
        Ok(rects.iter().map(move |rect| rect.to_pixel(width, height)))
    }

    /// Maps pixel rects into normalised space relative to this image.
    pub fn to_normalised<'a>(
        &self,
        rects: &'a [Rect<Pixel>],
    ) -> Result<impl Iterator<Item = Rect<Normalized>> + Clone + 'a, InselectError> {
        let (width, height) = self.dimensions()?;
        Ok(rects.iter().map(move |rect| rect.to_normalized(width, height)))
    }

    /// Checks that every pixel rect fits inside this image.
    ///
    /// # Errors
    /// Returns [`InselectError::OutOfBounds`] naming the first rect that does
    /// not fit, or [`InselectError::ImageLoad`] if the image cannot be decoded.
    pub fn validate_in_bounds(&self, rects: &[Rect<Pixel>]) -> Result<(), InselectError> {
        let (width, height) = self.dimensions()?;
        validation::validate_in_bounds(rects, width, height)
    }

    /// Writes the region under each normalised rect to the matching path.
    ///
    /// The output format follows each path's extension. All rects are
    /// checked against the image extent before the first file is written.
    /// Files are written independently: if one write fails, files written
    /// earlier in the same call stay on disk.
    ///
    /// A rect narrower or shorter than one pixel floors to an empty crop.
    /// Image encoders refuse zero-sized images, so such a rect fails with
    /// [`InselectError::CropWrite`] when its turn comes.
    ///
    /// # Errors
    /// - [`InselectError::LengthMismatch`] if `rects` and `paths` differ in length
    /// - [`InselectError::OutOfBounds`] if a rect falls outside the image
    /// - [`InselectError::CropWrite`] if a crop cannot be encoded or written
    pub fn save_crops<P: AsRef<Path>>(
        &self,
        rects: &[Rect<Normalized>],
        paths: &[P],
    ) -> Result<(), InselectError> {
        if rects.len() != paths.len() {
            return Err(InselectError::LengthMismatch {
                rects: rects.len(),
                paths: paths.len(),
            });
        }
        if rects.is_empty() {
            return Ok(());
        }

        let boxes: Vec<Rect<Pixel>> = self.from_normalised(rects)?.collect();
        self.validate_in_bounds(&boxes)?;

        let pixels = self.array()?;
        for (rect, path) in boxes.iter().zip(paths) {
            let path = path.as_ref();
            let (x0, y0, x1, y1) = rect.coordinates();
            // In bounds, so every corner fits in u32.
            let crop = pixels.crop_imm(x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32);
            crop.save(path).map_err(|source| InselectError::CropWrite {
                path: path.to_path_buf(),
                source,
            })?;
            debug!("wrote crop {} to {}", rect, path.display());
        }
        Ok(())
    }
}

fn decode(path: &Path) -> Result<DynamicImage, InselectError> {
    let load_error = |source: ImageError| InselectError::ImageLoad {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ImageReader::open(path)
        .map_err(|e| load_error(ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| load_error(ImageError::IoError(e)))?;
    // Scans routinely exceed the default 512 MiB allocation cap.
    reader.no_limits();
    reader.decode().map_err(load_error)
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ImageHandle").field(&self.path).finish()
    }
}

impl fmt::Display for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_loaded() { "Loaded" } else { "Unloaded" };
        write!(f, "ImageHandle ['{}'] [{}]", self.path.display(), state)
    }
}
