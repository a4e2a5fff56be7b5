//! Layout planning for resize and crop operations.
//!
//! Each planner takes the current image size and returns the geometry the
//! rasterizer needs: the canvas to allocate, the source region to read, and
//! the canvas region to write. Pure geometry, no pixel operations.
//!
//! # Example
//!
//! ```
//! use zenframe::{CropUnit, Rectangle, Size, layout};
//!
//! let source = Size::new(1000, 750);
//! let rect = layout::center_crop(source, CropUnit::Proportion(1.0), CropUnit::Proportion(1.0))
//!     .unwrap();
//! assert_eq!(rect, Rectangle::from_xywh(125, 0, 750, 750));
//!
//! let plan = layout::crop(source, &rect).unwrap();
//! assert_eq!(plan.canvas, Size::new(750, 750));
//! ```

use tracing::debug;

use crate::error::LayoutError;
use crate::geometry::{Point, Rectangle, Size};
use crate::math::{is_finite, round_i32};
use crate::units::CropUnit;

/// Geometry for one resample pass.
///
/// Allocate a `canvas`-sized target, then copy `src` (in source
/// coordinates) into `dst` (in canvas coordinates), scaling as needed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResamplePlan {
    /// Dimensions of the canvas to allocate.
    pub canvas: Size,
    /// Region of the source to read.
    pub src: Rectangle,
    /// Region of the canvas to write.
    pub dst: Rectangle,
}

impl ResamplePlan {
    /// Copy the whole of `source` onto a `canvas`-sized target.
    pub const fn full(source: Size, canvas: Size) -> Self {
        Self {
            canvas,
            src: Rectangle::from_size(source),
            dst: Rectangle::from_size(canvas),
        }
    }

    /// Whether the pass changes scale (source and destination regions differ in size).
    pub fn needs_resample(&self) -> bool {
        self.src.normalized_size() != self.dst.normalized_size()
    }

    /// Whether the pass reproduces `source` unchanged.
    pub fn is_identity(&self, source: Size) -> bool {
        self.canvas == source
            && self.src == Rectangle::from_size(source)
            && self.dst == Rectangle::from_size(source)
    }
}

/// Shrink `size` proportionally to fit inside `frame`. See [`Size::fit_to_frame`].
pub fn fit_to_frame(size: Size, frame: Size) -> Result<Size, LayoutError> {
    size.fit_to_frame(frame)
}

/// Overlap of two rectangles. See [`Rectangle::intersection`].
pub fn intersection(a: &Rectangle, b: &Rectangle) -> Option<Rectangle> {
    a.intersection(b)
}

/// Fit the whole source inside `frame`, downscaling only.
///
/// The canvas is at least one pixel on each axis, even when rounding
/// collapses an extreme aspect ratio.
pub fn resize(source: Size, frame: Size) -> Result<ResamplePlan, LayoutError> {
    check_source(source)?;
    let fitted = source.fit_to_frame(frame)?;
    let canvas = Size::new(fitted.width.max(1), fitted.height.max(1));
    debug!(%source, %frame, %canvas, "resize");
    Ok(ResamplePlan::full(source, canvas))
}

/// Shrink to at most `width`, keeping the aspect ratio.
pub fn resize_by_width(source: Size, width: i32) -> Result<ResamplePlan, LayoutError> {
    if width <= 0 {
        return Err(LayoutError::invalid("target width must be positive"));
    }
    resize(source, Size::new(width, source.height))
}

/// Shrink to at most `height`, keeping the aspect ratio.
pub fn resize_by_height(source: Size, height: i32) -> Result<ResamplePlan, LayoutError> {
    if height <= 0 {
        return Err(LayoutError::invalid("target height must be positive"));
    }
    resize(source, Size::new(source.width, height))
}

/// Cut `rect` out of the source.
///
/// The rectangle is clipped to the source bounds first; it may have a
/// negative extent. Fails if nothing of it lies inside the source.
pub fn crop(source: Size, rect: &Rectangle) -> Result<ResamplePlan, LayoutError> {
    check_source(source)?;
    let clip = rect
        .intersection(&Rectangle::from_size(source))
        .ok_or(LayoutError::invalid("crop region lies outside the source"))?;
    if clip.width() == 0 || clip.height() == 0 {
        return Err(LayoutError::invalid("crop region has zero width or height"));
    }
    let canvas = clip.normalized_size();
    debug!(%source, region = %rect, %clip, "crop");
    Ok(ResamplePlan {
        canvas,
        src: clip,
        dst: Rectangle::from_size(canvas),
    })
}

/// Cut a square out of the source. The square must lie fully inside it.
pub fn crop_square(source: Size, square: &Rectangle) -> Result<ResamplePlan, LayoutError> {
    if !square.is_square() {
        return Err(LayoutError::invalid("crop region is not a square"));
    }
    if !square.is_inner(source) {
        return Err(LayoutError::invalid("square extends beyond the source"));
    }
    crop(source, square)
}

/// [`crop_square`] with its top-left corner at `at` and sides of `side`.
pub fn crop_square_at(source: Size, at: Point, side: i32) -> Result<ResamplePlan, LayoutError> {
    crop_square(source, &Rectangle::new(at, Size::new(side, side)))
}

/// Region of the source centered on both axes, sized by crop units.
///
/// Pixel and percent units resolve per axis and may be mixed.
/// Proportions must come as a pair: they describe an aspect ratio, and the
/// result is the largest region of the source with that ratio. Each
/// dimension is clamped to the source before centering.
///
/// ```
/// use zenframe::{CropUnit, Rectangle, Size, layout};
///
/// let source = Size::new(1000, 750);
/// let r = layout::center_crop(source, "50%".parse().unwrap(), CropUnit::Pixels(250)).unwrap();
/// assert_eq!(r, Rectangle::from_xywh(250, 250, 500, 250));
///
/// // Proportion and pixels can't be mixed.
/// assert!(layout::center_crop(source, "4pr".parse().unwrap(), "300px".parse().unwrap()).is_err());
/// ```
pub fn center_crop(
    source: Size,
    width: CropUnit,
    height: CropUnit,
) -> Result<Rectangle, LayoutError> {
    check_source(source)?;
    check_unit(width)?;
    check_unit(height)?;

    let (w, h) = match (width, height) {
        (CropUnit::Proportion(pw), CropUnit::Proportion(ph)) => {
            let s = size_by_proportion(source, pw, ph);
            (s.width, s.height)
        }
        (CropUnit::Proportion(_), _) | (_, CropUnit::Proportion(_)) => {
            debug!(?width, ?height, "mixed proportion crop rejected");
            return Err(LayoutError::invalid(
                "proportion units must be used for both dimensions or neither",
            ));
        }
        (w, h) => (
            w.to_pixels(source.width).unwrap_or(source.width),
            h.to_pixels(source.height).unwrap_or(source.height),
        ),
    };

    let region = Rectangle::from_xywh(0, 0, w.min(source.width), h.min(source.height))
        .center(&Rectangle::from_size(source));
    debug!(%source, ?width, ?height, %region, "center crop");
    Ok(region)
}

/// Largest source-sized region with aspect `pw:ph`. One side always spans
/// the full source.
fn size_by_proportion(source: Size, pw: f64, ph: f64) -> Size {
    let (sw, sh) = (source.width as f64, source.height as f64);
    if ph / sh > pw / sw {
        Size::new(round_i32(sh / ph * pw), source.height)
    } else {
        Size::new(source.width, round_i32(sw / pw * ph))
    }
}

fn check_unit(unit: CropUnit) -> Result<(), LayoutError> {
    match unit {
        CropUnit::Pixels(_) => Ok(()),
        CropUnit::Percent(v) if is_finite(v) && v >= 0.0 => Ok(()),
        CropUnit::Proportion(v) if is_finite(v) && v > 0.0 => Ok(()),
        CropUnit::Percent(_) => Err(LayoutError::invalid(
            "percent must be finite and non-negative",
        )),
        CropUnit::Proportion(_) => Err(LayoutError::invalid(
            "proportion must be finite and positive",
        )),
    }
}

pub(crate) fn check_source(source: Size) -> Result<(), LayoutError> {
    if source.width <= 0 || source.height <= 0 {
        return Err(LayoutError::invalid("source dimensions must be positive"));
    }
    Ok(())
}
