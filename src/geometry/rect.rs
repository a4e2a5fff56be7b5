use core::fmt;

use super::{Point, Size};

/// Axis-aligned rectangle with a signed extent.
///
/// `location` is the anchor. A negative `size.width` means the rectangle
/// grows to the left of the anchor (the anchor is its right edge); a negative
/// `size.height` means it grows upward (the anchor is its bottom edge). The
/// accessors [`left`](Self::left), [`top`](Self::top),
/// [`width`](Self::width), … always report normalized geometry.
///
/// ```text
///   width >= 0               width < 0
///   anchor                             anchor
///     ●──────────┐           ┌──────────●
///     │          │           │          │
///     └──────────┘           └──────────┘
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rectangle {
    /// Anchor point.
    pub location: Point,
    /// Signed extent from the anchor.
    pub size: Size,
}

impl Rectangle {
    /// Create a rectangle from an anchor and a signed size.
    pub const fn new(location: Point, size: Size) -> Self {
        Self { location, size }
    }

    /// Create a rectangle from anchor coordinates and a signed size.
    pub const fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            location: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// A rectangle at the origin covering `size`.
    pub const fn from_size(size: Size) -> Self {
        Self {
            location: Point::ORIGIN,
            size,
        }
    }

    /// Rectangle anchored at `from` whose extent reaches `to`.
    ///
    /// When `to` lies left of or above `from` the extent is negative on that
    /// axis and `from` stays the anchor.
    pub fn spanning(from: Point, to: Point) -> Self {
        Self {
            location: from,
            size: Size::new(to.x - from.x, to.y - from.y),
        }
    }

    // ── normalized accessors ────────────────────────────────────────────

    /// Anchor x coordinate.
    pub const fn x(&self) -> i32 {
        self.location.x
    }

    /// Anchor y coordinate.
    pub const fn y(&self) -> i32 {
        self.location.y
    }

    /// Width magnitude.
    pub const fn width(&self) -> i32 {
        self.size.width.saturating_abs()
    }

    /// Height magnitude.
    pub const fn height(&self) -> i32 {
        self.size.height.saturating_abs()
    }

    // Edges saturate at the i32 range, so an out-of-range edge still
    // compares as outside any frame.

    /// Geometric left edge, whichever way the width grows.
    pub const fn left(&self) -> i32 {
        if self.size.width > 0 {
            self.x()
        } else {
            self.x().saturating_sub(self.width())
        }
    }

    /// Geometric top edge, whichever way the height grows.
    pub const fn top(&self) -> i32 {
        if self.size.height > 0 {
            self.y()
        } else {
            self.y().saturating_sub(self.height())
        }
    }

    /// Geometric right edge (exclusive).
    pub const fn right(&self) -> i32 {
        if self.size.width < 0 {
            self.x()
        } else {
            self.x().saturating_add(self.width())
        }
    }

    /// Geometric bottom edge (exclusive).
    pub const fn bottom(&self) -> i32 {
        if self.size.height < 0 {
            self.y()
        } else {
            self.y().saturating_add(self.height())
        }
    }

    /// Geometric top-left corner.
    pub const fn top_left(&self) -> Point {
        Point::new(self.left(), self.top())
    }

    /// Normalized (non-negative) size.
    pub const fn normalized_size(&self) -> Size {
        self.size.abs()
    }

    /// Same geometry with a non-negative extent anchored at the top-left.
    pub const fn normalized(&self) -> Self {
        Self {
            location: self.top_left(),
            size: self.normalized_size(),
        }
    }

    // ── edge setters ────────────────────────────────────────────────────

    /// Move the rectangle so its geometric left edge is `left`.
    ///
    /// With a negative width the anchor is the right edge, so the anchor is
    /// back-solved as `left + width`.
    pub fn set_left(&mut self, left: i32) {
        self.location.x = if self.size.width > 0 {
            left
        } else {
            left.saturating_add(self.width())
        };
    }

    /// Move the rectangle so its geometric top edge is `top`.
    pub fn set_top(&mut self, top: i32) {
        self.location.y = if self.size.height > 0 {
            top
        } else {
            top.saturating_add(self.height())
        };
    }

    // ── transforms ──────────────────────────────────────────────────────

    /// Swap the signed width and height.
    pub const fn flip(self) -> Self {
        Self {
            location: self.location,
            size: self.size.flip(),
        }
    }

    /// Grow the extent by `dx`, `dy`, keeping the anchor and the growth
    /// direction of each axis.
    pub const fn inflate(self, dx: i32, dy: i32) -> Self {
        Self {
            location: self.location,
            size: Size::new(grow(self.size.width, dx), grow(self.size.height, dy)),
        }
    }

    /// [`inflate`](Self::inflate) by a size.
    pub const fn inflate_by(self, by: Size) -> Self {
        self.inflate(by.width, by.height)
    }

    /// Shift the anchor by `by`.
    pub const fn offset(self, by: Point) -> Self {
        Self {
            location: self.location.offset(by),
            size: self.size,
        }
    }

    /// Center this rectangle inside `frame`.
    ///
    /// Odd leftovers go to the right/bottom: the offset is
    /// `floor((frame - self) / 2)` on each axis.
    pub fn center(mut self, frame: &Rectangle) -> Self {
        let left = frame
            .width()
            .saturating_sub(self.width())
            .div_euclid(2)
            .saturating_add(frame.left());
        let top = frame
            .height()
            .saturating_sub(self.height())
            .div_euclid(2)
            .saturating_add(frame.top());
        self.set_left(left);
        self.set_top(top);
        self
    }

    // ── predicates ──────────────────────────────────────────────────────

    /// Zero width and zero height.
    pub const fn is_null(&self) -> bool {
        self.size.width == 0 && self.size.height == 0
    }

    /// Width and height magnitudes are equal.
    pub const fn is_square(&self) -> bool {
        self.width() == self.height()
    }

    /// Whether the horizontal spans overlap (open intervals).
    pub fn is_intersecting_x(&self, other: &Rectangle) -> bool {
        if self.is_null() || other.is_null() {
            return false;
        }
        overlaps(self.left(), self.width(), other.left(), other.width())
    }

    /// Whether the vertical spans overlap (open intervals).
    pub fn is_intersecting_y(&self, other: &Rectangle) -> bool {
        if self.is_null() || other.is_null() {
            return false;
        }
        overlaps(self.top(), self.height(), other.top(), other.height())
    }

    /// Whether the rectangles share interior area on both axes.
    pub fn is_intersecting(&self, other: &Rectangle) -> bool {
        self.is_intersecting_x(other) && self.is_intersecting_y(other)
    }

    /// The overlapping region, or `None` if the rectangles don't intersect.
    ///
    /// ```
    /// use zenframe::Rectangle;
    ///
    /// let a = Rectangle::from_xywh(0, 0, 100, 100);
    /// let b = Rectangle::from_xywh(50, 50, 100, 100);
    /// assert_eq!(a.intersection(&b), Some(Rectangle::from_xywh(50, 50, 50, 50)));
    /// ```
    pub fn intersection(&self, other: &Rectangle) -> Option<Rectangle> {
        if !self.is_intersecting(other) {
            return None;
        }
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(Rectangle::from_xywh(
            left,
            top,
            right.saturating_sub(left),
            bottom.saturating_sub(top),
        ))
    }

    /// Whether this rectangle lies within `(0, 0, frame.width, frame.height)`.
    pub fn is_inner(&self, frame: Size) -> bool {
        self.top() >= 0
            && self.left() >= 0
            && self.bottom() <= frame.height
            && self.right() <= frame.width
    }
}

/// Open-interval overlap of `[a, a + a_len)` and `[b, b + b_len)`.
fn overlaps(a: i32, a_len: i32, b: i32, b_len: i32) -> bool {
    if a < b {
        b.saturating_sub(a) < a_len
    } else {
        a.saturating_sub(b) < b_len
    }
}

const fn grow(len: i32, delta: i32) -> i32 {
    if len < 0 { len - delta } else { len + delta }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}+{}+{}",
            self.width(),
            self.height(),
            self.left(),
            self.top()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── signed extent ───────────────────────────────────────────────────

    #[test]
    fn positive_extent_edges() {
        let r = Rectangle::from_xywh(10, 20, 30, 40);
        assert_eq!((r.left(), r.top(), r.right(), r.bottom()), (10, 20, 40, 60));
        assert_eq!((r.width(), r.height()), (30, 40));
    }

    #[test]
    fn negative_extent_edges() {
        // Anchor is the bottom-right corner.
        let r = Rectangle::from_xywh(40, 60, -30, -40);
        assert_eq!((r.left(), r.top(), r.right(), r.bottom()), (10, 20, 40, 60));
        assert_eq!((r.width(), r.height()), (30, 40));
        assert_eq!(r.top_left(), Point::new(10, 20));
        assert_eq!(r.normalized(), Rectangle::from_xywh(10, 20, 30, 40));
    }

    #[test]
    fn spanning_backwards() {
        let r = Rectangle::spanning(Point::new(100, 100), Point::new(40, 70));
        assert_eq!(r.size, Size::new(-60, -30));
        assert_eq!(r.top_left(), Point::new(40, 70));
        assert_eq!(r.right(), 100);
        assert_eq!(r.bottom(), 100);
    }

    #[test]
    fn set_left_round_trips() {
        let mut pos = Rectangle::from_xywh(0, 0, 10, 10);
        pos.set_left(7);
        assert_eq!(pos.left(), 7);
        assert_eq!(pos.x(), 7);

        let mut neg = Rectangle::from_xywh(0, 0, -10, 10);
        neg.set_left(7);
        assert_eq!(neg.left(), 7);
        // Anchor stays on the right edge.
        assert_eq!(neg.x(), 17);
        assert_eq!(neg.right(), 17);
    }

    #[test]
    fn set_top_round_trips() {
        let mut neg = Rectangle::from_xywh(5, 5, 10, -4);
        neg.set_top(-3);
        assert_eq!(neg.top(), -3);
        assert_eq!(neg.y(), 1);
        assert_eq!(neg.bottom(), 1);
    }

    #[test]
    fn edges_saturate_at_i32_range() {
        let r = Rectangle::from_xywh(10, 10, i32::MAX, i32::MAX);
        assert_eq!(r.right(), i32::MAX);
        assert_eq!(r.bottom(), i32::MAX);
        assert!(!r.is_inner(Size::new(100, 100)));

        let r = Rectangle::from_xywh(-10, 0, i32::MIN, 5);
        assert_eq!(r.width(), i32::MAX);
        assert_eq!(r.left(), i32::MIN);
        assert!(!r.is_inner(Size::new(100, 100)));
    }

    // ── transforms ──────────────────────────────────────────────────────

    #[test]
    fn flip_swaps_signed_extent() {
        let r = Rectangle::from_xywh(1, 2, -3, 4);
        let f = r.flip();
        assert_eq!(f.size, Size::new(4, -3));
        assert_eq!(f.location, r.location);
        assert_eq!(f.flip(), r);
    }

    #[test]
    fn inflate_keeps_direction() {
        let r = Rectangle::from_xywh(0, 0, 10, -10).inflate(5, 2);
        assert_eq!(r.size, Size::new(15, -12));
        assert_eq!(r.location, Point::ORIGIN);
        let r = Rectangle::from_xywh(0, 0, 10, 10).inflate_by(Size::new(-4, 1));
        assert_eq!(r.size, Size::new(6, 11));
    }

    #[test]
    fn offset_moves_anchor() {
        let r = Rectangle::from_xywh(1, 1, 2, 2).offset(Point::new(3, -1));
        assert_eq!(r, Rectangle::from_xywh(4, 0, 2, 2));
    }

    #[test]
    fn center_in_frame() {
        let frame = Rectangle::from_xywh(0, 0, 1000, 750);
        let r = Rectangle::from_xywh(0, 0, 500, 250).center(&frame);
        assert_eq!(r, Rectangle::from_xywh(250, 250, 500, 250));
    }

    #[test]
    fn center_odd_leftover_floors() {
        let frame = Rectangle::from_xywh(10, 10, 11, 11);
        let r = Rectangle::from_xywh(0, 0, 4, 4).center(&frame);
        // (11 - 4) / 2 = 3.5 -> 3
        assert_eq!(r.top_left(), Point::new(13, 13));
    }

    #[test]
    fn center_larger_than_frame_floors_negative() {
        let frame = Rectangle::from_xywh(0, 0, 10, 10);
        let r = Rectangle::from_xywh(0, 0, 13, 10).center(&frame);
        // (10 - 13) / 2 = -1.5 -> -2
        assert_eq!(r.left(), -2);
        assert_eq!(r.top(), 0);
    }

    #[test]
    fn center_flipped_rectangle() {
        let frame = Rectangle::from_xywh(0, 0, 100, 100);
        let r = Rectangle::from_xywh(0, 0, -20, -20).center(&frame);
        assert_eq!(r.top_left(), Point::new(40, 40));
        assert_eq!(r.location, Point::new(60, 60));
    }

    // ── predicates ──────────────────────────────────────────────────────

    #[test]
    fn square_uses_magnitudes() {
        assert!(Rectangle::from_xywh(0, 0, 5, -5).is_square());
        assert!(!Rectangle::from_xywh(0, 0, 5, 6).is_square());
    }

    #[test]
    fn null_never_intersects() {
        let null = Rectangle::from_xywh(5, 5, 0, 0);
        let big = Rectangle::from_xywh(0, 0, 100, 100);
        assert!(null.is_null());
        assert!(!null.is_intersecting(&big));
        assert!(!big.is_intersecting(&null));
        assert_eq!(big.intersection(&null), None);
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rectangle::from_xywh(0, 0, 10, 10);
        let b = Rectangle::from_xywh(10, 0, 10, 10);
        assert!(!a.is_intersecting_x(&b));
        assert!(a.is_intersecting_y(&b));
        assert_eq!(a.intersection(&b), None);
    }

    #[test]
    fn intersection_overlap() {
        let a = Rectangle::from_xywh(0, 0, 100, 100);
        let b = Rectangle::from_xywh(50, 50, 100, 100);
        assert_eq!(a.intersection(&b), Some(Rectangle::from_xywh(50, 50, 50, 50)));
        assert_eq!(b.intersection(&a), a.intersection(&b));
    }

    #[test]
    fn intersection_disjoint() {
        let a = Rectangle::from_xywh(0, 0, 10, 10);
        let b = Rectangle::from_xywh(20, 20, 10, 10);
        assert_eq!(a.intersection(&b), None);
    }

    #[test]
    fn intersection_with_flipped() {
        let image = Rectangle::from_xywh(0, 0, 100, 100);
        // Covers x 70..130, y -20..40.
        let r = Rectangle::from_xywh(130, 40, -60, -60);
        assert_eq!(
            image.intersection(&r),
            Some(Rectangle::from_xywh(70, 0, 30, 40))
        );
    }

    #[test]
    fn is_inner_bounds() {
        let frame = Size::new(100, 50);
        assert!(Rectangle::from_xywh(0, 0, 100, 50).is_inner(frame));
        assert!(Rectangle::from_xywh(10, 10, 20, 20).is_inner(frame));
        assert!(!Rectangle::from_xywh(-1, 0, 10, 10).is_inner(frame));
        assert!(!Rectangle::from_xywh(95, 0, 10, 10).is_inner(frame));
        assert!(!Rectangle::from_xywh(0, 45, 10, 10).is_inner(frame));
        // Flipped rectangle reaching above the frame.
        assert!(!Rectangle::from_xywh(10, 5, 10, -10).is_inner(frame));
    }

    #[test]
    fn display_normalized() {
        let r = Rectangle::from_xywh(40, 60, -30, -40);
        assert_eq!(std::format!("{r}"), "30x40+10+20");
    }
}
