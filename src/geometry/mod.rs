//! Value types for the image plane: [`Point`], [`Size`], [`Rectangle`].
//!
//! All three are `Copy` and every transform returns a new value.

mod point;
mod rect;
mod size;

pub use point::Point;
pub use rect::Rectangle;
pub use size::Size;
