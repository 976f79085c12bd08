//! Angle arithmetic for path analysis.
//!
//! Headings wrap at ±π, so every heading difference is folded back into
//! the half-open interval (-π, π].

use std::f64::consts::{PI, TAU};

/// Rounding allowance, in units of the input's relative precision, for a
/// residue above π to still count as exactly π.
///
/// Odd multiples of π computed in floating point land a few ULPs past π
/// after wrapping; they snap back onto the boundary. Anything farther out
/// wraps to the negative side.
const BOUNDARY_ULPS: f64 = 4.0;

/// Normalize angle to (-π, π].
///
/// A single euclidean remainder replaces repeated ±2π subtraction, so large
/// inputs cost the same as small ones. The boundary is closed at +π: both
/// `π` and `-π` normalize to `+π`.
///
/// # Example
/// ```
/// use marga::core::math::normalize_angle;
/// use std::f64::consts::PI;
///
/// assert_eq!(normalize_angle(-PI), PI);
/// assert_eq!(normalize_angle(3.0 * PI), PI);
/// assert!((normalize_angle(2.0 * PI + 0.5) - 0.5).abs() < 1e-12);
/// ```
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped <= PI {
        wrapped
    } else if wrapped - PI <= boundary_tolerance(angle) {
        PI
    } else {
        wrapped - TAU
    }
}

/// Absolute rounding error that `rem_euclid` can leave on `angle`.
#[inline]
fn boundary_tolerance(angle: f64) -> f64 {
    angle.abs().max(TAU) * f64::EPSILON * BOUNDARY_ULPS
}

/// Signed shortest turn from heading `from` to heading `to`.
///
/// Returns the angle to add to `from` to reach `to`, in (-π, π].
#[inline]
pub fn angle_diff(from: f64, to: f64) -> f64 {
    normalize_angle(to - from)
}
