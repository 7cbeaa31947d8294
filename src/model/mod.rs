//! Value types shared by the image and document layers.
//!
//! # Example
//!
//! ```
//! use inselect::model::{Item, Normalized, Pixel, Rect};
//!
//! let item = Item::new(Rect::<Normalized>::new(0.0, 0.2, 0.1, 0.8))
//!     .with_field("catalogNumber", "1234");
//!
//! let pixel: Rect<Pixel> = item.rect.to_pixel(459, 437);
//! assert_eq!(pixel, Rect::new(0.0, 87.0, 45.0, 349.0));
//! ```

mod item;
mod rect;
mod space;

pub use item::Item;
pub use rect::Rect;
pub use space::{Normalized, Pixel};
