//! Occupancy map collaborator surface.
//!
//! The analyzer never owns a planner or a concrete map type. It reads the map
//! through [`OccupancyQuery`], a read-only capability with three queries:
//!
//! ```text
//! resolution()          -> cell size (> 0), used as the clearance search step
//! to_grid_index(point)  -> Some(GridCoord) inside the map, None outside
//! is_occupied(coord)    -> occupancy of a previously resolved cell
//! ```
//!
//! [`OccupancyGrid`] is the in-memory implementation used by the CLI and the
//! tests; [`ros_map`] loads one from a ROS `map_server` YAML + PGM pair.

mod occupancy_grid;
pub mod ros_map;

pub use occupancy_grid::OccupancyGrid;
pub use ros_map::{load_ros_map, MapInfo};

use crate::core::Point2D;

/// Integer cell index in an occupancy grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCoord {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl GridCoord {
    /// Create a new grid coordinate.
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Read-only occupancy queries consumed by the clearance search.
///
/// Implementations must be side-effect free: the analyzer may call these
/// any number of times, in any order.
pub trait OccupancyQuery {
    /// Linear size of one grid cell in map units.
    fn resolution(&self) -> f64;

    /// Cell containing `point`, or `None` when the point is outside the map.
    fn to_grid_index(&self, point: Point2D) -> Option<GridCoord>;

    /// Whether the cell holds an obstacle.
    fn is_occupied(&self, coord: GridCoord) -> bool;
}
