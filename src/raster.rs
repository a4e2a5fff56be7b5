//! The bitmap collaborator and the parameters handed to it.
//!
//! Planning never touches pixels. Whatever owns the bitmaps implements
//! [`Rasterizer`]; the functions here drive it from computed plans:
//!
//! | Plan | Driver |
//! |---|---|
//! | [`ResamplePlan`] | [`apply_resample`] |
//! | [`LogoPlan`] | [`apply_logo`] |
//! | [`EncodeOptions`] | [`encode`] (flattens onto the background when needed) |

use core::fmt;

use tracing::trace;

use crate::error::LayoutError;
use crate::geometry::{Point, Rectangle, Size};
use crate::layout::ResamplePlan;
use crate::logo::LogoPlan;

/// Opaque 24-bit RGB color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Packed `0xRRGGBB` value.
    pub const fn code(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Unpack a `0xRRGGBB` value. Codes above `0xFFFFFF` are rejected.
    pub fn from_code(code: u32) -> Result<Self, LayoutError> {
        if code > 0xFF_FFFF {
            return Err(LayoutError::invalid("color code must be at most 0xFFFFFF"));
        }
        Ok(Self::new((code >> 16) as u8, (code >> 8) as u8, code as u8))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Six hex digits; `{:#x}` adds the `0x` prefix.
impl fmt::LowerHex for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        write!(f, "{:06x}", self.code())
    }
}

impl fmt::UpperHex for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        write!(f, "{:06X}", self.code())
    }
}

/// `0xrrggbb`.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:#x}")
    }
}

/// Output container.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    Jpeg,
    Png,
    Gif,
}

impl Format {
    /// Whether the format can carry transparency.
    pub fn supports_alpha(self) -> bool {
        !matches!(self, Self::Jpeg)
    }
}

/// Lossy encoding quality, 1–100.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Result<Self, LayoutError> {
        if (1..=100).contains(&value) {
            Ok(Self(value))
        } else {
            Err(LayoutError::invalid("quality must be between 1 and 100"))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Encoder level for `format`.
    ///
    /// JPEG takes the quality directly. PNG takes a zlib compression level
    /// `9 - round(quality / 10)`, floored at 0. GIF has no level.
    pub fn level_for(self, format: Format) -> Option<u8> {
        match format {
            Format::Jpeg => Some(self.0),
            Format::Png => Some(9u8.saturating_sub((self.0 + 5) / 10)),
            Format::Gif => None,
        }
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(85)
    }
}

/// How a finished canvas is encoded.
///
/// ```
/// use zenframe::raster::{Color, EncodeOptions, Format, Quality};
///
/// let opts = EncodeOptions::new(Format::Png)
///     .quality(Quality::new(60).unwrap())
///     .background(Color::BLACK)
///     .transparency(false);
/// assert!(opts.needs_background());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EncodeOptions {
    pub format: Format,
    pub quality: Quality,
    pub background: Color,
    pub transparency: bool,
}

impl EncodeOptions {
    /// Default quality (85), white background, transparency kept.
    pub fn new(format: Format) -> Self {
        Self {
            format,
            quality: Quality::default(),
            background: Color::WHITE,
            transparency: true,
        }
    }

    pub fn quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn transparency(mut self, keep: bool) -> Self {
        self.transparency = keep;
        self
    }

    /// Whether the canvas must be flattened onto the background first.
    pub fn needs_background(&self) -> bool {
        !self.format.supports_alpha() || !self.transparency
    }
}

/// Native bitmap operations the planner's output is executed with.
///
/// Implementations own the pixel buffers; every geometric decision has
/// already been made by the time these are called.
pub trait Rasterizer {
    /// Bitmap handle.
    type Canvas;
    /// Encoded output.
    type Encoded;
    type Error;

    /// Allocate a blank canvas of `size`.
    fn allocate_canvas(&mut self, size: Size) -> Result<Self::Canvas, Self::Error>;

    /// Copy `src_rect` of `src` into `dst_rect` of `dst`, scaling to fit.
    fn resample(
        &mut self,
        dst: &mut Self::Canvas,
        src: &Self::Canvas,
        dst_rect: Rectangle,
        src_rect: Rectangle,
    ) -> Result<(), Self::Error>;

    /// Flood-fill from `at` with `color`.
    fn fill(&mut self, canvas: &mut Self::Canvas, at: Point, color: Color)
    -> Result<(), Self::Error>;

    /// Encode `canvas`. `level` comes from [`Quality::level_for`].
    fn encode(
        &mut self,
        canvas: &Self::Canvas,
        format: Format,
        level: Option<u8>,
    ) -> Result<Self::Encoded, Self::Error>;
}

/// Run one resample pass, producing a new canvas.
pub fn apply_resample<R: Rasterizer>(
    r: &mut R,
    src: &R::Canvas,
    plan: &ResamplePlan,
) -> Result<R::Canvas, R::Error> {
    trace!(canvas = %plan.canvas, src = %plan.src, dst = %plan.dst, "resample");
    let mut dst = r.allocate_canvas(plan.canvas)?;
    r.resample(&mut dst, src, plan.dst, plan.src)?;
    Ok(dst)
}

/// Shrink `logo` and stamp it onto `canvas`.
///
/// When the plan carries a background, the shrunk logo is flattened onto it
/// first so no transparent pixels reach the canvas.
pub fn apply_logo<R: Rasterizer>(
    r: &mut R,
    canvas: &mut R::Canvas,
    logo: &R::Canvas,
    plan: &LogoPlan,
) -> Result<(), R::Error> {
    let mut shrunk = apply_resample(r, logo, &plan.resize)?;
    if let Some(color) = plan.background {
        shrunk = flatten(r, &shrunk, plan.resize.canvas, color)?;
    }
    r.resample(
        canvas,
        &shrunk,
        plan.placement,
        Rectangle::from_size(plan.resize.canvas),
    )
}

/// Copy `canvas` onto a fresh `size` canvas pre-filled with `color`.
pub fn flatten<R: Rasterizer>(
    r: &mut R,
    canvas: &R::Canvas,
    size: Size,
    color: Color,
) -> Result<R::Canvas, R::Error> {
    let mut flat = r.allocate_canvas(size)?;
    r.fill(&mut flat, Point::ORIGIN, color)?;
    let full = Rectangle::from_size(size);
    r.resample(&mut flat, canvas, full, full)?;
    Ok(flat)
}

/// Encode `canvas`, flattening onto the background first when the options
/// call for it.
pub fn encode<R: Rasterizer>(
    r: &mut R,
    canvas: &R::Canvas,
    size: Size,
    options: &EncodeOptions,
) -> Result<R::Encoded, R::Error> {
    let level = options.quality.level_for(options.format);
    if options.needs_background() {
        let flat = flatten(r, canvas, size, options.background)?;
        r.encode(&flat, options.format, level)
    } else {
        r.encode(canvas, options.format, level)
    }
}
