//! Corner-anchored logo placement.
//!
//! A logo is shrunk to at most [`LogoOptions::max_proportion`] of each canvas
//! dimension, then placed in one of the four corners with padding expressed as
//! a fraction of the canvas size.
//!
//! ```text
//!     0 ─ TopLeft      1 ─ TopRight
//!     ┌──────────────────────────┐
//!     │▣                        ▣│
//!     │                          │
//!     │▣                        ▣│
//!     └──────────────────────────┘
//!     3 ─ BottomLeft   2 ─ BottomRight
//! ```

use tracing::debug;

use crate::error::LayoutError;
use crate::geometry::{Point, Rectangle, Size};
use crate::layout::{ResamplePlan, check_source};
use crate::math::is_finite;
use crate::raster::Color;

/// Canvas corner a logo is anchored to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    #[default]
    BottomRight,
    BottomLeft,
}

impl Corner {
    /// All corners, indexed by selector value.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomRight,
        Self::BottomLeft,
    ];

    /// Corner for a raw selector: 0 top-left, 1 top-right, 2 bottom-right,
    /// 3 bottom-left.
    pub fn from_index(index: i32) -> Result<Self, LayoutError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(LayoutError::invalid("corner selector must be 0, 1, 2 or 3"))
    }

    /// Raw selector value.
    pub fn index(self) -> i32 {
        match self {
            Self::TopLeft => 0,
            Self::TopRight => 1,
            Self::BottomRight => 2,
            Self::BottomLeft => 3,
        }
    }

    pub fn is_bottom(self) -> bool {
        matches!(self, Self::BottomLeft | Self::BottomRight)
    }

    pub fn is_right(self) -> bool {
        matches!(self, Self::TopRight | Self::BottomRight)
    }
}

impl TryFrom<i32> for Corner {
    type Error = LayoutError;

    fn try_from(index: i32) -> Result<Self, Self::Error> {
        Self::from_index(index)
    }
}

/// Logo sizing and placement settings.
///
/// ```
/// use zenframe::{Corner, LogoOptions};
///
/// let opts = LogoOptions::new()
///     .with_corner(Corner::TopLeft)
///     .with_max_proportion(0.25)
///     .unwrap();
/// assert_eq!(opts.corner(), Corner::TopLeft);
/// assert_eq!(opts.padding(), (0.02, 0.02));
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LogoOptions {
    corner: Corner,
    max_proportion: f64,
    padding: (f64, f64),
    background: Color,
    transparency: bool,
}

impl Default for LogoOptions {
    fn default() -> Self {
        Self {
            corner: Corner::BottomRight,
            max_proportion: 0.1,
            padding: (0.02, 0.02),
            background: Color::WHITE,
            transparency: true,
        }
    }
}

impl LogoOptions {
    /// Bottom-right, 10% max size, 2% padding, transparency kept.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the anchor corner.
    pub fn with_corner(mut self, corner: Corner) -> Self {
        self.corner = corner;
        self
    }

    /// Largest fraction of each canvas dimension the logo may cover, in `(0, 1]`.
    pub fn with_max_proportion(mut self, proportion: f64) -> Result<Self, LayoutError> {
        self.max_proportion = check_fraction(proportion, "max logo proportion must be in (0, 1]")?;
        Ok(self)
    }

    /// Same padding fraction on both axes, in `(0, 1]`.
    pub fn with_padding(self, padding: f64) -> Result<Self, LayoutError> {
        self.with_padding_xy(padding, padding)
    }

    /// Horizontal and vertical padding fractions, each in `(0, 1]`.
    pub fn with_padding_xy(mut self, x: f64, y: f64) -> Result<Self, LayoutError> {
        const REASON: &str = "logo padding must be in (0, 1]";
        self.padding = (check_fraction(x, REASON)?, check_fraction(y, REASON)?);
        Ok(self)
    }

    /// Color that fills transparent logo pixels when transparency is off.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Whether transparent logo pixels stay transparent when stamped.
    pub fn with_transparency(mut self, keep: bool) -> Self {
        self.transparency = keep;
        self
    }

    pub fn corner(&self) -> Corner {
        self.corner
    }

    pub fn max_proportion(&self) -> f64 {
        self.max_proportion
    }

    pub fn padding(&self) -> (f64, f64) {
        self.padding
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn transparency(&self) -> bool {
        self.transparency
    }
}

fn check_fraction(v: f64, reason: &'static str) -> Result<f64, LayoutError> {
    if is_finite(v) && v > 0.0 && v <= 1.0 {
        Ok(v)
    } else {
        Err(LayoutError::invalid(reason))
    }
}

/// Top-left point for a `logo`-sized overlay in `corner` of `canvas`.
///
/// Padding is `canvas × padding` on each axis. The result is truncated
/// toward zero.
///
/// ```
/// use zenframe::{Corner, Point, Size, logo};
///
/// let p = logo::logo_position(Size::new(1000, 800), Size::new(100, 50), Corner::BottomRight, (0.05, 0.05));
/// assert_eq!(p, Point::new(850, 710));
/// ```
pub fn logo_position(canvas: Size, logo: Size, corner: Corner, padding: (f64, f64)) -> Point {
    let pad_x = canvas.width as f64 * padding.0;
    let pad_y = canvas.height as f64 * padding.1;
    let x = if corner.is_right() {
        canvas.width as f64 - pad_x - logo.width as f64
    } else {
        pad_x
    };
    let y = if corner.is_bottom() {
        canvas.height as f64 - pad_y - logo.height as f64
    } else {
        pad_y
    };
    Point::new(x as i32, y as i32)
}

/// Geometry for stamping a logo onto a canvas.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LogoPlan {
    /// Shrinks the logo image to its stamped size.
    pub resize: ResamplePlan,
    /// Where the shrunk logo lands on the canvas.
    pub placement: Rectangle,
    /// Flatten the shrunk logo onto this color before stamping.
    pub background: Option<Color>,
}

/// Size and place a `logo` on `canvas` according to `options`.
pub fn plan_logo(canvas: Size, logo: Size, options: &LogoOptions) -> Result<LogoPlan, LayoutError> {
    check_source(canvas)?;
    if logo.width <= 0 || logo.height <= 0 {
        return Err(LayoutError::invalid("logo dimensions must be positive"));
    }
    let max = Size::new(
        (canvas.width as f64 * options.max_proportion) as i32,
        (canvas.height as f64 * options.max_proportion) as i32,
    );
    if max.width <= 0 || max.height <= 0 {
        return Err(LayoutError::invalid("canvas is too small to hold a logo"));
    }
    let fitted = logo.fit_to_frame(max)?;
    let fitted = Size::new(fitted.width.max(1), fitted.height.max(1));
    let at = logo_position(canvas, fitted, options.corner, options.padding);
    debug!(%canvas, %logo, %fitted, %at, corner = ?options.corner, "logo plan");
    Ok(LogoPlan {
        resize: ResamplePlan::full(logo, fitted),
        placement: Rectangle::new(at, fitted),
        background: (!options.transparency).then_some(options.background),
    })
}
