//! Image geometry planning: frame fitting, unit-aware center crops, adaptive
//! thumbnails, and logo placement.
//!
//! Pure geometry. Pixel work goes through the [`Rasterizer`] trait, which the
//! caller implements over whatever bitmap library they use.
//!
//! # Modules
//!
//! - [`geometry`] — [`Point`], [`Size`], [`Rectangle`] with signed extents
//! - [`units`] — `px` / `%` / `pr` crop units
//! - [`layout`] — Resize and crop planners producing [`ResamplePlan`]s
//! - [`thumbnail`] — Adaptive thumbnail sizing with an excess factor
//! - [`logo`] — Corner-anchored logo sizing and placement
//! - [`raster`] — The [`Rasterizer`] seam and encoding parameters
//! - [`plan`] — Command pipeline (requires `alloc`)
//!
//! # Example
//!
//! ```
//! use zenframe::{Size, thumbnail};
//!
//! let plan = thumbnail::thumbnail(Size::new(1000, 500), Size::new(200, 200), 2.0).unwrap();
//! assert_eq!(plan.canvas, Size::new(400, 200));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(all(test, not(feature = "std")))]
extern crate std;

mod error;
mod math;

pub mod geometry;
pub mod layout;
pub mod logo;
#[cfg(feature = "alloc")]
pub mod plan;
pub mod raster;
pub mod thumbnail;
pub mod units;

pub use error::LayoutError;
pub use geometry::{Point, Rectangle, Size};
pub use layout::ResamplePlan;
pub use logo::{Corner, LogoOptions, LogoPlan};
#[cfg(feature = "alloc")]
pub use plan::{Command, Pipeline, Plan, Step};
pub use raster::{Color, EncodeOptions, Format, Quality, Rasterizer};
pub use units::CropUnit;
