//! Adaptive thumbnail sizing.
//!
//! A plain "fit inside the box" thumbnail fails two ways: panoramas become
//! razor-thin strips, and near-square sources leave most of a non-square box
//! empty. The planner here lets the free axis overshoot the requested bound by
//! up to an *excess factor* `c` before switching strategy.
//!
//! All arithmetic runs in one normalized orientation: when the width is the
//! binding constraint, bound and source are flipped first and the result is
//! flipped back at the end. In that orientation the "width" below is the
//! tight axis and `limit = floor(c × height)` caps the loose one.
//!
//! ```text
//!   source wider than bound            source not wider than bound
//!   ───────────────────────            ───────────────────────────
//!   natural ≤ limit    → (w, natural)  sh ≤ limit   → source
//!   natural ≤ 2·limit  → cap at limit  sh ≤ 2·limit → cap at limit,
//!   otherwise          → halve width                  or halve width if
//!                                                     the cap is too thin
//!                                      otherwise    → halve width
//! ```
//!
//! # Example
//!
//! ```
//! use zenframe::{Size, thumbnail};
//!
//! // A 3000×200 panorama into a 400×300 box keeps a usable height.
//! let bound = thumbnail::plan_thumbnail(Size::new(3000, 200), Size::new(400, 300), 2.0).unwrap();
//! assert_eq!(bound, Size::new(2250, 150));
//! ```

use tracing::{debug, trace};

use crate::error::LayoutError;
use crate::geometry::Size;
use crate::layout::{ResamplePlan, check_source, resize};
use crate::math::{floor_i32, is_finite};

/// Excess factor used when none is given.
pub const DEFAULT_EXCESS: f64 = 2.0;

/// Compute the frame a thumbnail of `source` should be fit into.
///
/// `requested` is the nominal bounding box; `excess` (finite, `> 1`) bounds
/// how far the loose axis may overshoot it. Sources smaller than the box are
/// never enlarged.
pub fn plan_thumbnail(source: Size, requested: Size, excess: f64) -> Result<Size, LayoutError> {
    if !is_finite(excess) || excess <= 1.0 {
        return Err(LayoutError::invalid(
            "excess factor must be finite and greater than 1",
        ));
    }
    if requested.width <= 0 || requested.height <= 0 {
        return Err(LayoutError::invalid(
            "requested thumbnail dimensions must be positive",
        ));
    }
    check_source(source)?;

    let bound = if source.less_than(&requested) {
        source
    } else {
        requested
    };

    // w / sw <= h / sh, cross-multiplied.
    let flipped = i64::from(bound.width) * i64::from(source.height)
        <= i64::from(bound.height) * i64::from(source.width);
    let (bound, src) = if flipped {
        (bound.flip(), source.flip())
    } else {
        (bound, source)
    };

    let target = plan_normalized(src, bound, excess);
    let target = if flipped { target.flip() } else { target };
    debug!(%source, %requested, excess, flipped, %target, "thumbnail plan");
    Ok(target)
}

/// [`plan_thumbnail`] followed by the frame-fit resize it feeds.
///
/// Degenerate frames (a halved width of zero) are widened to one pixel.
pub fn thumbnail(source: Size, requested: Size, excess: f64) -> Result<ResamplePlan, LayoutError> {
    let frame = plan_thumbnail(source, requested, excess)?;
    resize(source, Size::new(frame.width.max(1), frame.height.max(1)))
}

fn plan_normalized(src: Size, bound: Size, excess: f64) -> Size {
    let w = i64::from(bound.width);
    let h = i64::from(bound.height);
    let sw = i64::from(src.width);
    let sh = i64::from(src.height);

    let limit = i64::from(floor_i32(excess * h as f64));
    let natural_height = sh * w / sw;
    let capped = || Size::new(narrow(sw * limit / sh), narrow(limit));

    if sw > w {
        if natural_height <= limit {
            trace!(natural_height, limit, "proportional fit");
            Size::new(narrow(w), narrow(natural_height))
        } else if natural_height <= 2 * limit {
            trace!(natural_height, limit, "capped at limit");
            capped()
        } else {
            trace!(natural_height, limit, "elongated, halving width");
            Size::new(narrow(w / 2), narrow(natural_height))
        }
    } else {
        let halved = || Size::new(narrow(w / 2), narrow(sh * w / (2 * sw)));
        if sh <= limit {
            trace!(limit, "source within limit");
            src
        } else if sh <= 2 * limit {
            // sw * limit / sh >= w / 2, cross-multiplied.
            if 2 * sw * limit >= w * sh {
                trace!(limit, "capped at limit");
                capped()
            } else {
                trace!(limit, "cap too thin, halving width");
                halved()
            }
        } else {
            trace!(limit, "elongated, halving width");
            halved()
        }
    }
}

fn narrow(v: i64) -> i32 {
    i32::try_from(v).unwrap_or(if v < 0 { i32::MIN } else { i32::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(sw: i32, sh: i32, w: i32, h: i32) -> Size {
        plan_thumbnail(Size::new(sw, sh), Size::new(w, h), DEFAULT_EXCESS).unwrap()
    }

    // ── normalized orientation, source wider than bound ─────────────────

    #[test]
    fn panorama_halves_width_budget() {
        // Flipped: bound 300×400, source 200×3000, limit 800.
        // 3000 > 2·800, so width budget 300 → 150.
        assert_eq!(plan(3000, 200, 400, 300), Size::new(2250, 150));
    }

    #[test]
    fn landscape_in_square_box_overshoots() {
        // Flipped: bound 200×200, source 500×1000, natural 400 == limit.
        assert_eq!(plan(1000, 500, 200, 200), Size::new(400, 200));
    }

    #[test]
    fn near_square_fits_proportionally() {
        assert_eq!(plan(1000, 900, 200, 200), Size::new(222, 200));
    }

    #[test]
    fn tall_source_capped_at_limit() {
        // Not flipped: limit 200, natural 350 in (200, 400].
        assert_eq!(plan(400, 700, 200, 100), Size::new(114, 200));
    }

    #[test]
    fn very_tall_source_halves_width() {
        // natural = 1000·200/400 = 500 > 400.
        assert_eq!(plan(400, 1000, 200, 100), Size::new(100, 500));
    }

    // ── normalized orientation, source not wider than bound ─────────────

    #[test]
    fn narrow_source_within_limit_unchanged() {
        assert_eq!(plan(100, 150, 200, 100), Size::new(100, 150));
    }

    #[test]
    fn narrow_source_capped_when_wide_enough() {
        // limit 200, sh 300; 180·200/300 = 120 >= 100.
        assert_eq!(plan(180, 300, 200, 100), Size::new(120, 200));
    }

    #[test]
    fn narrow_source_halved_when_cap_too_thin() {
        // limit 200, sh 300; 100·200/300 = 66.7 < 100.
        assert_eq!(plan(100, 300, 200, 100), Size::new(100, 300));
    }

    #[test]
    fn narrow_very_tall_source_halved() {
        // sh 1000 > 400: (200/2, 1000·200/300)
        assert_eq!(plan(150, 1000, 200, 100), Size::new(100, 666));
    }

    #[test]
    fn cap_comparison_is_exact() {
        // 2·sw·limit == w·sh: the capped width equals w / 2 exactly.
        // limit 200, sw 150, sh 300 -> 150·200/300 = 100 = 200/2.
        assert_eq!(plan(150, 300, 200, 100), Size::new(100, 200));
    }

    // ── small sources ───────────────────────────────────────────────────

    #[test]
    fn smaller_source_is_not_enlarged() {
        assert_eq!(plan(100, 50, 400, 300), Size::new(100, 50));
        assert_eq!(plan(50, 100, 400, 300), Size::new(50, 100));
    }

    #[test]
    fn equal_source_is_kept() {
        assert_eq!(plan(400, 300, 400, 300), Size::new(400, 300));
    }

    #[test]
    fn larger_excess_moves_branch() {
        // Flipped: bound 300×400, src 200×2000, limit 1200, 2000 <= 2400;
        // 200·1200/2000 = 120 < 150, so halved: (150, 2000·300/400).
        let s = plan_thumbnail(Size::new(2000, 200), Size::new(400, 300), 3.0).unwrap();
        assert_eq!(s, Size::new(1500, 150));

        // Same source with c = 6: limit 2400 covers the whole height.
        let s = plan_thumbnail(Size::new(2000, 200), Size::new(400, 300), 6.0).unwrap();
        assert_eq!(s, Size::new(2000, 200));
    }

    // ── thumbnail resize ────────────────────────────────────────────────

    #[test]
    fn thumbnail_resizes_into_planned_frame() {
        let p = thumbnail(Size::new(3000, 200), Size::new(400, 300), 2.0).unwrap();
        assert_eq!(p.canvas, Size::new(2250, 150));

        let p = thumbnail(Size::new(400, 700), Size::new(200, 100), 2.0).unwrap();
        assert_eq!(p.canvas, Size::new(114, 200));
    }

    #[test]
    fn thumbnail_widens_degenerate_frame() {
        // Halving a 1px budget yields 0; the resize frame becomes 1px wide.
        let frame = plan_thumbnail(Size::new(1, 1000), Size::new(1, 1), 2.0).unwrap();
        assert_eq!(frame.width, 0);
        let p = thumbnail(Size::new(1, 1000), Size::new(1, 1), 2.0).unwrap();
        assert!(p.canvas.width >= 1 && p.canvas.height >= 1);
    }

    // ── argument validation ─────────────────────────────────────────────

    #[test]
    fn rejects_bad_excess() {
        for c in [1.0, 0.5, -2.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                plan_thumbnail(Size::new(100, 100), Size::new(10, 10), c),
                Err(LayoutError::InvalidArgument { .. })
            ));
        }
    }

    #[test]
    fn rejects_non_positive_request() {
        for req in [Size::new(0, 10), Size::new(10, 0), Size::new(-1, 10)] {
            assert!(plan_thumbnail(Size::new(100, 100), req, 2.0).is_err());
        }
    }

    #[test]
    fn rejects_empty_source() {
        assert!(plan_thumbnail(Size::new(0, 100), Size::new(10, 10), 2.0).is_err());
    }
}
