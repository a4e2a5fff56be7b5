use core::fmt;
use core::ops::{Add, Sub};

use super::Point;
use crate::error::LayoutError;
use crate::math::round_i32;

/// Width × height in pixels.
///
/// The type itself carries no sign constraint. Natural image sizes are
/// non-negative; [`Rectangle`](super::Rectangle) reuses the sign as a
/// growth direction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Swap width and height. Applying it twice is the identity.
    pub const fn flip(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Whether either dimension strictly exceeds `other`'s.
    ///
    /// This is an "or" test, not an ordering: `5×10` and `10×5` are each
    /// greater than the other.
    pub fn greater_than(&self, other: &Size) -> bool {
        self.width > other.width || self.height > other.height
    }

    /// Neither greater than nor equal to `other`.
    ///
    /// Derived from [`greater_than`](Self::greater_than), so two sizes can be
    /// neither less, nor equal, while both being greater.
    pub fn less_than(&self, other: &Size) -> bool {
        !self.greater_than(other) && self != other
    }

    /// Whether both dimensions fit within `frame` (inclusive).
    pub fn is_inner(&self, frame: &Size) -> bool {
        self.width <= frame.width && self.height <= frame.height
    }

    /// Shrink proportionally to `width`. Never enlarges.
    pub fn fit_by_width(self, width: i32) -> Self {
        if width >= self.width {
            return self;
        }
        let height = round_i32(self.height as f64 * width as f64 / self.width as f64);
        Self::new(width, height)
    }

    /// Shrink proportionally to `height`. Never enlarges.
    pub fn fit_by_height(self, height: i32) -> Self {
        if height >= self.height {
            return self;
        }
        let width = round_i32(self.width as f64 * height as f64 / self.height as f64);
        Self::new(width, height)
    }

    /// Shrink proportionally until both dimensions fit inside `frame`.
    ///
    /// The axis with the larger overshoot ratio binds. Sizes already inside
    /// the frame are returned unchanged.
    ///
    /// ```
    /// use zenframe::Size;
    ///
    /// let fitted = Size::new(4000, 2000).fit_to_frame(Size::new(400, 400)).unwrap();
    /// assert_eq!(fitted, Size::new(400, 200));
    /// ```
    pub fn fit_to_frame(self, frame: Size) -> Result<Size, LayoutError> {
        if frame.width <= 0 || frame.height <= 0 {
            return Err(LayoutError::invalid("frame dimensions must be positive"));
        }
        if self.is_inner(&frame) {
            return Ok(self);
        }
        let ratio_w = self.width as f64 / frame.width as f64;
        let ratio_h = self.height as f64 / frame.height as f64;
        if ratio_w > ratio_h {
            Ok(self.fit_by_width(frame.width))
        } else {
            Ok(self.fit_by_height(frame.height))
        }
    }

    /// Whether width and height are both zero.
    pub fn is_zero(&self) -> bool {
        self.width == 0 && self.height == 0
    }

    /// Component-wise absolute value.
    pub const fn abs(self) -> Self {
        Self {
            width: self.width.abs(),
            height: self.height.abs(),
        }
    }
}

impl Add for Size {
    type Output = Size;

    fn add(self, rhs: Size) -> Size {
        Size::new(self.width + rhs.width, self.height + rhs.height)
    }
}

impl Sub for Size {
    type Output = Size;

    fn sub(self, rhs: Size) -> Size {
        Size::new(self.width - rhs.width, self.height - rhs.height)
    }
}

/// Adds `x` to width and `y` to height.
impl Add<Point> for Size {
    type Output = Size;

    fn add(self, rhs: Point) -> Size {
        Size::new(self.width + rhs.x, self.height + rhs.y)
    }
}

impl Sub<Point> for Size {
    type Output = Size;

    fn sub(self, rhs: Point) -> Size {
        Size::new(self.width - rhs.x, self.height - rhs.y)
    }
}

impl From<(i32, i32)> for Size {
    fn from((width, height): (i32, i32)) -> Self {
        Self::new(width, height)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
