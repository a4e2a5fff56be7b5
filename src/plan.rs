//! Command pipeline.
//!
//! A [`Pipeline`] records a chain of image commands against a source size.
//! [`Pipeline::plan`] threads the current size through each command and
//! yields a [`Plan`]: one [`Step`] per command plus the final output size.
//! Nothing is rasterized until [`Plan::execute`] hands the steps to a
//! [`Rasterizer`].
//!
//! ```
//! use zenframe::{CropUnit, LogoOptions, Pipeline, Size};
//!
//! let plan = Pipeline::new(Size::new(4000, 3000))
//!     .crop_center(CropUnit::Proportion(1.0), CropUnit::Proportion(1.0))
//!     .resize(Size::new(800, 800))
//!     .logo(Size::new(200, 100), LogoOptions::new())
//!     .plan()
//!     .unwrap();
//! assert_eq!(plan.steps.len(), 3);
//! assert_eq!(plan.output, Size::new(800, 800));
//! ```

use alloc::vec::Vec;

use tracing::debug;

use crate::error::LayoutError;
use crate::geometry::{Point, Rectangle, Size};
use crate::layout::{self, ResamplePlan};
use crate::logo::{LogoOptions, LogoPlan, plan_logo};
use crate::raster::{Rasterizer, apply_logo, apply_resample};
use crate::thumbnail::{self, DEFAULT_EXCESS};
use crate::units::CropUnit;

/// A single image processing command.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Fit inside a frame, downscaling only.
    Resize(Size),
    /// Shrink to at most this width.
    ResizeByWidth(i32),
    /// Shrink to at most this height.
    ResizeByHeight(i32),
    /// Cut a region, clipped to the image.
    Crop(Rectangle),
    /// Cut a square fully inside the image.
    CropSquare(Rectangle),
    /// Cut a centered region sized by crop units.
    CropCenter {
        width: CropUnit,
        height: CropUnit,
    },
    /// Adaptive thumbnail.
    Thumbnail {
        size: Size,
        /// Overshoot factor, see [`thumbnail::plan_thumbnail`].
        excess: f64,
    },
    /// Stamp a logo of the given size.
    Logo {
        size: Size,
        options: LogoOptions,
    },
}

/// One planned operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// Replace the image with a resampled canvas.
    Resample(ResamplePlan),
    /// Draw the logo onto the current image in place.
    Logo(LogoPlan),
}

impl Step {
    /// Image size after this step, given the size before it.
    pub fn output(&self, input: Size) -> Size {
        match self {
            Self::Resample(p) => p.canvas,
            Self::Logo(_) => input,
        }
    }
}

/// Fully resolved geometry for a pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Plan {
    /// Size the pipeline started from.
    pub source: Size,
    pub steps: Vec<Step>,
    /// Size after the last step.
    pub output: Size,
}

impl Plan {
    /// Whether any step stamps a logo.
    pub fn has_logo(&self) -> bool {
        self.steps.iter().any(|s| matches!(s, Step::Logo(_)))
    }

    /// Run every step against `image`.
    ///
    /// `logo` supplies the logo bitmap; it is required when the plan has
    /// a logo step.
    pub fn execute<R>(
        &self,
        r: &mut R,
        image: R::Canvas,
        logo: Option<&R::Canvas>,
    ) -> Result<R::Canvas, R::Error>
    where
        R: Rasterizer,
        R::Error: From<LayoutError>,
    {
        let mut image = image;
        for step in &self.steps {
            match step {
                Step::Resample(p) => image = apply_resample(r, &image, p)?,
                Step::Logo(p) => {
                    let logo = logo.ok_or(LayoutError::invalid(
                        "plan has a logo step but no logo image was given",
                    ))?;
                    apply_logo(r, &mut image, logo, p)?;
                }
            }
        }
        Ok(image)
    }
}

/// Builder for a chain of [`Command`]s.
#[derive(Clone, Debug, PartialEq)]
pub struct Pipeline {
    source: Size,
    commands: Vec<Command>,
}

impl Pipeline {
    /// Start a pipeline for an image of `source` size.
    pub fn new(source: Size) -> Self {
        Self {
            source,
            commands: Vec::new(),
        }
    }

    /// Append an arbitrary command.
    pub fn push(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// Fit inside `frame`, downscaling only.
    pub fn resize(self, frame: Size) -> Self {
        self.push(Command::Resize(frame))
    }

    pub fn resize_by_width(self, width: i32) -> Self {
        self.push(Command::ResizeByWidth(width))
    }

    pub fn resize_by_height(self, height: i32) -> Self {
        self.push(Command::ResizeByHeight(height))
    }

    pub fn crop(self, rect: Rectangle) -> Self {
        self.push(Command::Crop(rect))
    }

    /// Square crop with its top-left corner at `at`.
    pub fn crop_square(self, at: Point, side: i32) -> Self {
        self.push(Command::CropSquare(Rectangle::new(at, Size::new(side, side))))
    }

    pub fn crop_center(self, width: CropUnit, height: CropUnit) -> Self {
        self.push(Command::CropCenter { width, height })
    }

    /// Adaptive thumbnail with the default excess factor.
    pub fn thumbnail(self, size: Size) -> Self {
        self.thumbnail_with_excess(size, DEFAULT_EXCESS)
    }

    pub fn thumbnail_with_excess(self, size: Size, excess: f64) -> Self {
        self.push(Command::Thumbnail { size, excess })
    }

    /// Stamp a logo of `size` pixels.
    pub fn logo(self, size: Size, options: LogoOptions) -> Self {
        self.push(Command::Logo { size, options })
    }

    pub fn source(&self) -> Size {
        self.source
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Resolve every command in order. Stops at the first invalid one.
    pub fn plan(&self) -> Result<Plan, LayoutError> {
        let mut current = self.source;
        let mut steps = Vec::with_capacity(self.commands.len());
        for (index, command) in self.commands.iter().enumerate() {
            let step = plan_command(current, command).inspect_err(|e| {
                debug!(index, ?command, %current, error = %e, "command rejected");
            })?;
            current = step.output(current);
            steps.push(step);
        }
        debug!(source = %self.source, output = %current, steps = steps.len(), "pipeline planned");
        Ok(Plan {
            source: self.source,
            steps,
            output: current,
        })
    }
}

fn plan_command(current: Size, command: &Command) -> Result<Step, LayoutError> {
    let resample = match command {
        Command::Resize(frame) => layout::resize(current, *frame)?,
        Command::ResizeByWidth(w) => layout::resize_by_width(current, *w)?,
        Command::ResizeByHeight(h) => layout::resize_by_height(current, *h)?,
        Command::Crop(rect) => layout::crop(current, rect)?,
        Command::CropSquare(rect) => layout::crop_square(current, rect)?,
        Command::CropCenter { width, height } => {
            let rect = layout::center_crop(current, *width, *height)?;
            layout::crop(current, &rect)?
        }
        Command::Thumbnail { size, excess } => thumbnail::thumbnail(current, *size, *excess)?,
        Command::Logo { size, options } => {
            return plan_logo(current, *size, options).map(Step::Logo);
        }
    };
    Ok(Step::Resample(resample))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{Color, Format};

    // ── planning ────────────────────────────────────────────────────────

    #[test]
    fn empty_pipeline_is_identity() {
        let plan = Pipeline::new(Size::new(640, 480)).plan().unwrap();
        assert!(plan.steps.is_empty());
        assert_eq!(plan.output, Size::new(640, 480));
        assert!(!plan.has_logo());
    }

    #[test]
    fn sizes_thread_through_commands() {
        let plan = Pipeline::new(Size::new(1000, 750))
            .crop_center(CropUnit::Proportion(1.0), CropUnit::Proportion(1.0))
            .resize_by_width(300)
            .plan()
            .unwrap();
        assert_eq!(
            plan.steps[0],
            Step::Resample(ResamplePlan {
                canvas: Size::new(750, 750),
                src: Rectangle::from_xywh(125, 0, 750, 750),
                dst: Rectangle::from_xywh(0, 0, 750, 750),
            })
        );
        assert_eq!(plan.output, Size::new(300, 300));
    }

    #[test]
    fn thumbnail_command_uses_excess() {
        let plan = Pipeline::new(Size::new(3000, 200))
            .thumbnail(Size::new(400, 300))
            .plan()
            .unwrap();
        assert_eq!(plan.output, Size::new(2250, 150));

        let plan = Pipeline::new(Size::new(2000, 200))
            .thumbnail_with_excess(Size::new(400, 300), 6.0)
            .plan()
            .unwrap();
        assert_eq!(plan.output, Size::new(2000, 200));
    }

    #[test]
    fn logo_keeps_size() {
        let plan = Pipeline::new(Size::new(1000, 800))
            .logo(Size::new(300, 100), LogoOptions::new())
            .plan()
            .unwrap();
        assert!(plan.has_logo());
        assert_eq!(plan.output, Size::new(1000, 800));
        let Step::Logo(logo) = plan.steps[0] else {
            panic!("expected logo step");
        };
        assert_eq!(logo.placement, Rectangle::from_xywh(880, 751, 100, 33));
    }

    #[test]
    fn first_error_stops_planning() {
        let r = Pipeline::new(Size::new(100, 100))
            .resize(Size::new(50, 50))
            .crop_square(Point::new(40, 40), 20)
            .resize_by_height(10)
            .plan();
        assert!(matches!(r, Err(LayoutError::InvalidArgument { .. })));
    }

    #[test]
    fn oversized_square_crop_is_an_error() {
        let r = Pipeline::new(Size::new(100, 100))
            .crop_square(Point::new(50, 50), i32::MAX)
            .plan();
        assert!(matches!(r, Err(LayoutError::InvalidArgument { .. })));
    }

    #[test]
    fn push_and_accessors() {
        let p = Pipeline::new(Size::new(10, 10)).push(Command::ResizeByHeight(5));
        assert_eq!(p.source(), Size::new(10, 10));
        assert_eq!(p.commands(), &[Command::ResizeByHeight(5)]);
    }

    // ── execution ───────────────────────────────────────────────────────

    /// Canvases are sizes; counts calls.
    #[derive(Default)]
    struct Counter {
        allocations: usize,
        copies: usize,
    }

    impl Rasterizer for Counter {
        type Canvas = Size;
        type Encoded = ();
        type Error = LayoutError;

        fn allocate_canvas(&mut self, size: Size) -> Result<Size, LayoutError> {
            self.allocations += 1;
            Ok(size)
        }

        fn resample(
            &mut self,
            _dst: &mut Size,
            _src: &Size,
            _dst_rect: Rectangle,
            _src_rect: Rectangle,
        ) -> Result<(), LayoutError> {
            self.copies += 1;
            Ok(())
        }

        fn fill(&mut self, _c: &mut Size, _at: Point, _color: Color) -> Result<(), LayoutError> {
            Ok(())
        }

        fn encode(&mut self, _c: &Size, _f: Format, _l: Option<u8>) -> Result<(), LayoutError> {
            Ok(())
        }
    }

    #[test]
    fn execute_runs_each_step() {
        let plan = Pipeline::new(Size::new(1000, 800))
            .resize(Size::new(500, 500))
            .logo(Size::new(60, 60), LogoOptions::new())
            .plan()
            .unwrap();
        let mut r = Counter::default();
        let out = plan
            .execute(&mut r, Size::new(1000, 800), Some(&Size::new(60, 60)))
            .unwrap();
        assert_eq!(out, Size::new(500, 400));
        // resize: 1 alloc + 1 copy; logo: 1 alloc + 2 copies
        assert_eq!(r.allocations, 2);
        assert_eq!(r.copies, 3);
    }

    #[test]
    fn execute_requires_logo_image() {
        let plan = Pipeline::new(Size::new(1000, 800))
            .logo(Size::new(60, 60), LogoOptions::new())
            .plan()
            .unwrap();
        let r = plan.execute(&mut Counter::default(), Size::new(1000, 800), None);
        assert!(r.is_err());
    }
}
