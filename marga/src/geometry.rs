//! Per-point geometric metrics.
//!
//! Pure functions over consecutive path samples:
//! - [`menger_curvature`]: curvature of the circle through three points
//! - [`segment_metrics`]: segment length and signed heading change between two poses
//!
//! All functions are total. Degenerate input (duplicate or collinear points)
//! resolves to zero curvature instead of NaN or infinity.

use crate::core::math::angle_diff;
use crate::core::Pose2D;

/// Menger curvature of the triangle (p1, p2, p3).
///
/// ```text
/// a = |p1p2|, b = |p2p3|, c = |p3p1|
/// s = (a + b + c) / 2
/// S = sqrt(s(s-a)(s-b)(s-c))          # Heron
/// κ = 4S / (abc)
/// ```
///
/// Returns 0 when any side has zero length. The Heron radicand is clamped
/// at zero, since rounding can push it slightly negative for near-collinear
/// points. Headings are ignored.
///
/// Sides are divided by the longest one before Heron, so the products stay
/// near 1 and neither underflow nor overflow. The result is always finite.
pub fn menger_curvature(p1: &Pose2D, p2: &Pose2D, p3: &Pose2D) -> f64 {
    let a = p1.distance(p2);
    let b = p2.distance(p3);
    let c = p3.distance(p1);

    let longest = a.max(b).max(c);
    if !(longest > 0.0 && longest.is_finite()) {
        return 0.0;
    }

    let (a, b, c) = (a / longest, b / longest, c / longest);
    if a == 0.0 || b == 0.0 || c == 0.0 {
        return 0.0;
    }

    let s = (a + b + c) / 2.0;
    let radicand = (s * (s - a) * (s - b) * (s - c)).max(0.0);
    let area = radicand.sqrt();

    let k = 4.0 * area / (a * b * c) / longest;
    if k.is_finite() {
        k
    } else {
        0.0
    }
}

/// Length and heading change of the segment between two consecutive poses.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SegmentMetrics {
    /// Planar Euclidean length, >= 0
    pub length: f64,
    /// Heading change `theta(cur) - theta(prev)` wrapped to (-π, π]
    pub steering_angle: f64,
}

/// Segment length and steering angle from `prev` to `cur`.
pub fn segment_metrics(prev: &Pose2D, cur: &Pose2D) -> SegmentMetrics {
    SegmentMetrics {
        length: prev.distance(cur),
        steering_angle: angle_diff(prev.theta, cur.theta),
    }
}
