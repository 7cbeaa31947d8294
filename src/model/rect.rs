//! Rectangles in normalised or pixel space.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

use super::space::{Normalized, Pixel};

/// An axis-aligned rectangle given by its top-left corner and extent.
///
/// The `TSpace` parameter is either [`Pixel`] or [`Normalized`]. Rects are
/// plain values: two rects are equal iff all four fields are equal, and
/// nothing can change a rect once it is built.
///
/// Construction never clamps or corrects. A normalised rect with a negative
/// origin is representable; [`validate_normalised`] is what rejects it.
///
/// [`validate_normalised`]: crate::validation::validate_normalised
#[derive(Clone, Copy, PartialEq)]
pub struct Rect<TSpace> {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    _space: PhantomData<TSpace>,
}

impl<TSpace> Rect<TSpace> {
    /// Creates a rect from its origin and extent.
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            _space: PhantomData,
        }
    }

    /// Left edge.
    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Top edge.
    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Horizontal extent.
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Vertical extent.
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns true if all four fields are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }
}

impl Rect<Normalized> {
    /// Corner view `(x0, y0, x1, y1)`.
    pub fn coordinates(&self) -> (f64, f64, f64, f64) {
        (self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Scales to a `image_width` x `image_height` pixel grid.
    ///
    /// Each of the four fields is multiplied by its extent and floored, so
    /// `(0.0, 0.2, 0.1, 0.8)` on a 459x437 image becomes `(0, 87, 45, 349)`.
    /// Because width and height are floored independently of the origin, the
    /// result never reaches past `origin + extent` of the unfloored rect.
    pub fn to_pixel(&self, image_width: u32, image_height: u32) -> Rect<Pixel> {
        let (w, h) = (f64::from(image_width), f64::from(image_height));
        Rect::new(
            (self.x * w).floor(),
            (self.y * h).floor(),
            (self.width * w).floor(),
            (self.height * h).floor(),
        )
    }
}

impl Rect<Pixel> {
    /// Corner view `(x0, y0, x1, y1)`, rounded to the nearest pixel.
    pub fn coordinates(&self) -> (i64, i64, i64, i64) {
        (
            self.x.round() as i64,
            self.y.round() as i64,
            (self.x + self.width).round() as i64,
            (self.y + self.height).round() as i64,
        )
    }

    /// Divides each field by the matching image extent.
    ///
    /// Not an exact inverse of [`Rect::to_pixel`]: the floor there loses up to
    /// one pixel per field.
    pub fn to_normalized(&self, image_width: u32, image_height: u32) -> Rect<Normalized> {
        let (w, h) = (f64::from(image_width), f64::from(image_height));
        Rect::new(self.x / w, self.y / h, self.width / w, self.height / h)
    }
}

impl<TSpace> fmt::Debug for Rect<TSpace> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rect")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl<TSpace> fmt::Display for Rect<TSpace> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rect({}, {}, {}, {})",
            self.x, self.y, self.width, self.height
        )
    }
}

// Stored as a bare `[x, y, width, height]` array; no TSpace serde bounds.
impl<TSpace> Serialize for Rect<TSpace> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.x, self.y, self.width, self.height].serialize(serializer)
    }
}

impl<'de, TSpace> Deserialize<'de> for Rect<TSpace> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [x, y, width, height] = <[f64; 4]>::deserialize(deserializer)?;
        Ok(Rect::new(x, y, width, height))
    }
}
