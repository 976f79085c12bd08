//! Row-major boolean occupancy grid.

use crate::core::Point2D;

use super::{GridCoord, OccupancyQuery};

/// 2D occupancy grid with a fixed extent.
///
/// Cell (x, y) covers `[origin + x*res, origin + (x+1)*res)` on each axis.
/// Storage is row-major: `index = y * width + x`.
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    /// Occupancy flags, one per cell.
    cells: Vec<bool>,
    /// Grid width in cells.
    width: usize,
    /// Grid height in cells.
    height: usize,
    /// Cell size in map units.
    resolution: f64,
    /// World X coordinate of cell (0, 0).
    origin_x: f64,
    /// World Y coordinate of cell (0, 0).
    origin_y: f64,
}

impl OccupancyGrid {
    /// Create an empty (all free) grid.
    pub fn new(width: usize, height: usize, resolution: f64, origin: Point2D) -> Self {
        Self {
            cells: vec![false; width * height],
            width,
            height,
            resolution,
            origin_x: origin.x,
            origin_y: origin.y,
        }
    }

    /// Create an empty grid centered on the world origin.
    pub fn centered(width: usize, height: usize, resolution: f64) -> Self {
        let half_width = width as f64 * resolution / 2.0;
        let half_height = height as f64 * resolution / 2.0;
        Self::new(
            width,
            height,
            resolution,
            Point2D::new(-half_width, -half_height),
        )
    }

    /// Create from row-major occupancy flags.
    ///
    /// Returns `None` when `cells.len() != width * height`.
    pub fn from_cells(
        cells: Vec<bool>,
        width: usize,
        height: usize,
        resolution: f64,
        origin: Point2D,
    ) -> Option<Self> {
        if cells.len() != width * height {
            return None;
        }
        Some(Self {
            cells,
            width,
            height,
            resolution,
            origin_x: origin.x,
            origin_y: origin.y,
        })
    }

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Grid origin in world coordinates.
    pub fn origin(&self) -> Point2D {
        Point2D::new(self.origin_x, self.origin_y)
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Check if cell indices are valid.
    #[inline]
    pub fn is_valid_cell(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    #[inline]
    fn cell_index(&self, coord: GridCoord) -> Option<usize> {
        if self.is_valid_cell(coord) {
            Some(coord.y as usize * self.width + coord.x as usize)
        } else {
            None
        }
    }

    /// Mark a cell occupied or free. Out-of-bounds coordinates are ignored.
    pub fn set_occupied(&mut self, coord: GridCoord, occupied: bool) {
        if let Some(idx) = self.cell_index(coord) {
            self.cells[idx] = occupied;
        }
    }

    /// Mark the cell containing a world point as occupied.
    ///
    /// Returns `false` when the point lies outside the grid.
    pub fn mark_world(&mut self, point: Point2D) -> bool {
        match self.to_grid_index(point) {
            Some(coord) => {
                self.set_occupied(coord, true);
                true
            }
            None => false,
        }
    }

    /// Whether the cell containing a world point is occupied.
    ///
    /// Points outside the grid are free.
    pub fn is_occupied_at(&self, point: Point2D) -> bool {
        self.to_grid_index(point)
            .is_some_and(|coord| self.is_occupied(coord))
    }

    /// Convert cell indices to world coordinates (center of cell).
    #[inline]
    pub fn cell_to_world(&self, coord: GridCoord) -> Point2D {
        Point2D::new(
            self.origin_x + (coord.x as f64 + 0.5) * self.resolution,
            self.origin_y + (coord.y as f64 + 0.5) * self.resolution,
        )
    }
}

impl OccupancyQuery for OccupancyGrid {
    fn resolution(&self) -> f64 {
        self.resolution
    }

    #[inline]
    fn to_grid_index(&self, point: Point2D) -> Option<GridCoord> {
        let cx = ((point.x - self.origin_x) / self.resolution).floor();
        let cy = ((point.y - self.origin_y) / self.resolution).floor();

        if cx >= 0.0 && cy >= 0.0 && cx < self.width as f64 && cy < self.height as f64 {
            Some(GridCoord::new(cx as i32, cy as i32))
        } else {
            None
        }
    }

    #[inline]
    fn is_occupied(&self, coord: GridCoord) -> bool {
        self.cell_index(coord).is_some_and(|idx| self.cells[idx])
    }
}
