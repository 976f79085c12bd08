//! Pose and point types.

use serde::{Deserialize, Serialize};

/// A 2D point in map units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point2D {
    /// Create a new point.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by an offset.
    #[inline]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point2D) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A path sample produced by the planner.
///
/// Position in map units and heading in radians. Unlike most pose types the
/// heading is stored exactly as produced upstream, without normalization:
/// it is echoed verbatim into the metric records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose2D {
    /// X position
    pub x: f64,
    /// Y position
    pub y: f64,
    /// Heading in radians
    pub theta: f64,
}

impl Pose2D {
    /// Create a new pose.
    #[inline]
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self { x, y, theta }
    }

    /// Planar position of the pose.
    #[inline]
    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    /// Planar distance to another pose (heading ignored).
    #[inline]
    pub fn distance(&self, other: &Pose2D) -> f64 {
        self.position().distance(&other.position())
    }
}

impl From<(f64, f64, f64)> for Pose2D {
    fn from((x, y, theta): (f64, f64, f64)) -> Self {
        Self::new(x, y, theta)
    }
}
