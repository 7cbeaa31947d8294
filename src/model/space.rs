//! Coordinate space markers for [`Rect`](super::Rect).
//!
//! Both are uninhabited types: they exist only as type parameters, so a
//! normalised rect can never be passed where a pixel rect is expected.

use std::fmt;

/// Absolute offsets into a decoded image, origin at the top-left pixel.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {}

/// Fractions of the image extent, resolution independent.
///
/// A valid normalised rect has `x >= 0`, `y >= 0`, `width <= 1` and
/// `height <= 1`; see [`validate_normalised`](crate::validation::validate_normalised).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalized {}

impl fmt::Debug for Pixel {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for Normalized {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}
