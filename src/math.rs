//! Float helpers that work with and without `std`.
//!
//! `f64::round` and friends are inherent only under `std`; going through
//! `num_traits::Float` (backed by `libm` otherwise) keeps one code path.

use num_traits::Float;

/// Round half away from zero, then convert with saturation.
pub(crate) fn round_i32(v: f64) -> i32 {
    Float::round(v) as i32
}

/// Round toward negative infinity, then convert with saturation.
pub(crate) fn floor_i32(v: f64) -> i32 {
    Float::floor(v) as i32
}

pub(crate) fn is_finite(v: f64) -> bool {
    Float::is_finite(v)
}
