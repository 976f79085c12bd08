//! Obstacle clearance around path samples.
//!
//! Brute-force search of a square window on the map's own grid:
//!
//! ```text
//! step = map.resolution()
//! for i, j in 0..n:                 # n = floor(2r / step) + 1
//!     dx = -r + i * step
//!     dy = -r + j * step
//!     d = hypot(dx, dy)
//!     if d <= r and occupied(x + dx, y + dy):  # off-map candidates are skipped
//!         best = min(best, d)
//! ```
//!
//! Cost is O(n²) map queries per point. That is fine for offline analysis of
//! a finite path; it is not meant for a control loop.

use log::warn;

use crate::core::Point2D;
use crate::grid::OccupancyQuery;

/// Default half-width of the search window, in map units.
pub const SEARCH_RADIUS: f64 = 10.0;

/// Tolerance on the candidate count so that `2r / step` landing a hair
/// below an integer still includes the far edge.
const COUNT_EPSILON: f64 = 1e-9;

/// Result of a clearance query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clearance {
    /// Distance to the nearest occupied cell, or the search radius when
    /// none was found.
    pub distance: f64,
    /// Whether an occupied cell was found within the search radius.
    pub obstacle_found: bool,
}

/// Nearest-obstacle distance estimator over an occupancy map.
pub struct ClearanceEstimator<'a, M: OccupancyQuery + ?Sized> {
    map: &'a M,
    search_radius: f64,
    /// Offsets per axis, `None` when the grid step or radius is unusable.
    samples: Option<usize>,
    step: f64,
}

impl<'a, M: OccupancyQuery + ?Sized> ClearanceEstimator<'a, M> {
    /// Estimator with the default [`SEARCH_RADIUS`].
    pub fn new(map: &'a M) -> Self {
        Self::with_search_radius(map, SEARCH_RADIUS)
    }

    /// Estimator with a custom search radius.
    pub fn with_search_radius(map: &'a M, search_radius: f64) -> Self {
        let step = map.resolution();
        let samples = sample_count(search_radius, step);

        if samples.is_none() {
            warn!(
                "Clearance search disabled (radius {}, map resolution {}); \
                 every point reports the sentinel distance",
                search_radius, step
            );
        }

        Self {
            map,
            search_radius,
            samples,
            step,
        }
    }

    /// Search radius, also the sentinel distance.
    pub fn search_radius(&self) -> f64 {
        self.search_radius
    }

    /// Grid step used for the search.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Distance from `(x, y)` to the nearest occupied cell.
    ///
    /// Only occupied candidates within `search_radius` of the query count.
    /// When there are none the result is exactly `search_radius`, which means
    /// "nothing nearby" and is not an upper bound on the true clearance.
    pub fn estimate(&self, x: f64, y: f64) -> Clearance {
        let not_found = Clearance {
            distance: self.search_radius,
            obstacle_found: false,
        };

        let Some(n) = self.samples else {
            return not_found;
        };

        let query = Point2D::new(x, y);
        let r = self.search_radius;
        let mut best = f64::INFINITY;

        for i in 0..n {
            let dx = -r + i as f64 * self.step;
            for j in 0..n {
                let dy = -r + j as f64 * self.step;

                let dist = dx.hypot(dy);
                if dist > r || dist >= best {
                    continue;
                }

                let Some(cell) = self.map.to_grid_index(query.offset(dx, dy)) else {
                    continue;
                };
                if self.map.is_occupied(cell) {
                    best = dist;
                }
            }
        }

        if best.is_finite() {
            Clearance {
                distance: best,
                obstacle_found: true,
            }
        } else {
            not_found
        }
    }

    /// Numeric clearance at `(x, y)`; the search radius when nothing was found.
    pub fn distance(&self, x: f64, y: f64) -> f64 {
        self.estimate(x, y).distance
    }
}

fn sample_count(radius: f64, step: f64) -> Option<usize> {
    if !(step.is_finite() && step > 0.0) || !(radius.is_finite() && radius >= 0.0) {
        return None;
    }
    let spans = (2.0 * radius / step + COUNT_EPSILON).floor();
    if spans.is_finite() && spans < usize::MAX as f64 {
        Some(spans as usize + 1)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridCoord, OccupancyGrid};
    use approx::assert_relative_eq;

    fn empty_map() -> OccupancyGrid {
        OccupancyGrid::centered(100, 100, 1.0)
    }

    #[test]
    fn test_empty_map_returns_sentinel() {
        let map = empty_map();
        let estimator = ClearanceEstimator::new(&map);

        let c = estimator.estimate(0.5, 0.5);
        assert!(!c.obstacle_found);
        assert_eq!(c.distance, SEARCH_RADIUS);
        assert_eq!(estimator.distance(-3.2, 7.1), 10.0);
    }

    #[test]
    fn test_obstacle_at_known_offset() {
        let mut map = empty_map();
        // Query cell (50, 50) covers [0, 1); obstacle 3 cells to the right
        map.set_occupied(GridCoord::new(53, 50), true);
        let estimator = ClearanceEstimator::new(&map);

        let c = estimator.estimate(0.5, 0.5);
        assert!(c.obstacle_found);
        assert_relative_eq!(c.distance, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_nearest_of_several() {
        let mut map = empty_map();
        map.set_occupied(GridCoord::new(56, 50), true);
        map.set_occupied(GridCoord::new(50, 46), true);
        map.set_occupied(GridCoord::new(52, 52), true);
        let estimator = ClearanceEstimator::new(&map);

        let d = estimator.distance(0.5, 0.5);
        assert_relative_eq!(d, 8.0_f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_query_on_occupied_cell_is_zero() {
        let mut map = empty_map();
        map.set_occupied(GridCoord::new(50, 50), true);
        let estimator = ClearanceEstimator::new(&map);
        assert_eq!(estimator.distance(0.5, 0.5), 0.0);
    }

    #[test]
    fn test_result_never_exceeds_radius() {
        let mut map = empty_map();
        // Window corner: sqrt(2) * 10 away, outside the radius
        map.set_occupied(GridCoord::new(60, 60), true);
        let estimator = ClearanceEstimator::new(&map);

        let c = estimator.estimate(0.5, 0.5);
        assert!(!c.obstacle_found);
        assert_eq!(c.distance, SEARCH_RADIUS);
    }

    #[test]
    fn test_off_map_candidates_skipped() {
        // 5x5 map, query near the corner: most of the window is off the map
        let mut map = OccupancyGrid::new(5, 5, 1.0, Point2D::default());
        map.set_occupied(GridCoord::new(4, 0), true);
        let estimator = ClearanceEstimator::new(&map);

        let c = estimator.estimate(0.5, 0.5);
        assert!(c.obstacle_found);
        assert_relative_eq!(c.distance, 4.0, epsilon = 1e-9);

        // Query entirely off the map
        assert_eq!(estimator.distance(100.0, 100.0), SEARCH_RADIUS);
    }

    #[test]
    fn test_custom_radius() {
        let mut map = empty_map();
        map.set_occupied(GridCoord::new(53, 50), true);

        let near = ClearanceEstimator::with_search_radius(&map, 2.0);
        assert_eq!(near.distance(0.5, 0.5), 2.0);

        let far = ClearanceEstimator::with_search_radius(&map, 3.0);
        assert_relative_eq!(far.distance(0.5, 0.5), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_step_follows_map_resolution() {
        let mut map = OccupancyGrid::centered(100, 100, 0.25);
        // 0.75 to the left of the query at cell resolution 0.25
        let target = map.to_grid_index(Point2D::new(-0.625, 0.125)).unwrap();
        map.set_occupied(target, true);
        let estimator = ClearanceEstimator::new(&map);

        assert_eq!(estimator.step(), 0.25);
        assert_relative_eq!(estimator.distance(0.125, 0.125), 0.75, epsilon = 1e-9);
    }

    #[test]
    fn test_sample_count_includes_both_edges() {
        assert_eq!(sample_count(10.0, 1.0), Some(21));
        assert_eq!(sample_count(10.0, 0.1), Some(201));
        assert_eq!(sample_count(1.0, 0.3), Some(7));
        assert_eq!(sample_count(0.0, 1.0), Some(1));
    }

    #[test]
    fn test_invalid_resolution_returns_sentinel() {
        let map = OccupancyGrid::new(10, 10, 0.0, Point2D::default());
        let estimator = ClearanceEstimator::new(&map);
        assert_eq!(estimator.distance(1.0, 1.0), SEARCH_RADIUS);

        assert_eq!(sample_count(10.0, f64::NAN), None);
        assert_eq!(sample_count(-1.0, 1.0), None);
    }
}
