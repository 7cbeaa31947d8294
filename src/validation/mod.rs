//! Rect validation.
//!
//! Two checks live here, one per coordinate space:
//! - [`validate_normalised`] enforces the invariant every committed item
//!   rect must satisfy.
//! - [`validate_in_bounds`] checks pixel rects against a decoded image
//!   extent before anything is sliced out of it.
//!
//! Both fail fast on the first offending rect and never correct input.

use crate::error::InselectError;
use crate::model::{Normalized, Pixel, Rect};

/// Checks that every rect lies in normalised space.
///
/// A rect fails if `x < 0`, `y < 0`, `width > 1`, `height > 1`, or any field
/// is not finite. The error names the index of the first failing rect.
pub fn validate_normalised<'a, I>(rects: I) -> Result<(), InselectError>
where
    I: IntoIterator<Item = &'a Rect<Normalized>>,
{
    for (index, rect) in rects.into_iter().enumerate() {
        if let Some(reason) = normalised_violation(rect) {
            return Err(InselectError::NotNormalised {
                index,
                rect: rect.to_string(),
                reason,
            });
        }
    }
    Ok(())
}

fn normalised_violation(rect: &Rect<Normalized>) -> Option<&'static str> {
    if !rect.is_finite() {
        Some("non-finite field")
    } else if rect.x() < 0.0 {
        Some("x < 0")
    } else if rect.y() < 0.0 {
        Some("y < 0")
    } else if rect.width() > 1.0 {
        Some("width > 1")
    } else if rect.height() > 1.0 {
        Some("height > 1")
    } else {
        None
    }
}

/// Checks that every pixel rect can be sliced out of a `width` x `height`
/// image.
///
/// A rect fails if its corners give `x0 < 0`, `y0 < 0`, `x1 > width` or
/// `y1 > height`, or if it is inverted (`x1 < x0` or `y1 < y0`).
pub fn validate_in_bounds<'a, I>(rects: I, width: u32, height: u32) -> Result<(), InselectError>
where
    I: IntoIterator<Item = &'a Rect<Pixel>>,
{
    let (w, h) = (i64::from(width), i64::from(height));
    for (index, rect) in rects.into_iter().enumerate() {
        let (x0, y0, x1, y1) = rect.coordinates();
        if !rect.is_finite() || x0 < 0 || y0 < 0 || x1 > w || y1 > h || x1 < x0 || y1 < y0 {
            return Err(InselectError::OutOfBounds {
                index,
                rect: rect.to_string(),
                width,
                height,
            });
        }
    }
    Ok(())
}
