//! ROS map_server map loading.
//!
//! A map is a YAML metadata file next to a PGM image:
//!
//! ```yaml
//! image: map.pgm
//! resolution: 0.05
//! origin: [-10.0, -10.0, 0.0]
//! occupied_thresh: 0.65
//! negate: 0
//! ```
//!
//! PGM pixel values follow the map_server convention: 255 = free,
//! 0 = occupied, 205 = unknown. Image row 0 is the top of the map, while
//! grid row 0 is the bottom, so rows are flipped on load.

use std::fs;
use std::path::Path;

use image::GrayImage;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::{GridCoord, OccupancyGrid};
use crate::core::Point2D;
use crate::error::MapLoadError;

/// Map metadata as stored in the YAML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapInfo {
    /// PGM image filename (relative to YAML file).
    pub image: String,

    /// Map resolution in map units per pixel.
    pub resolution: f64,

    /// Origin of map [x, y, yaw]: world coordinates of the bottom-left pixel.
    pub origin: [f64; 3],

    /// Threshold for occupied cells (0.0-1.0).
    #[serde(default = "default_occupied_thresh")]
    pub occupied_thresh: f64,

    /// Threshold for free cells. Read for compatibility, unused.
    #[serde(default = "default_free_thresh")]
    pub free_thresh: f64,

    /// Non-zero inverts the pixel interpretation.
    #[serde(default)]
    pub negate: u8,
}

fn default_occupied_thresh() -> f64 {
    0.65
}

fn default_free_thresh() -> f64 {
    0.196
}

impl MapInfo {
    fn validate(&self) -> Result<(), MapLoadError> {
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(MapLoadError::InvalidMetadata(format!(
                "resolution must be positive, got {}",
                self.resolution
            )));
        }
        if !(0.0..=1.0).contains(&self.occupied_thresh) {
            return Err(MapLoadError::InvalidMetadata(format!(
                "occupied_thresh must be in [0, 1], got {}",
                self.occupied_thresh
            )));
        }
        Ok(())
    }
}

/// Load a map from its YAML metadata file.
pub fn load_ros_map(yaml_path: &Path) -> Result<OccupancyGrid, MapLoadError> {
    load_ros_map_with_threshold(yaml_path, None)
}

/// Load a map, optionally overriding the YAML `occupied_thresh`.
pub fn load_ros_map_with_threshold(
    yaml_path: &Path,
    occupied_thresh: Option<f64>,
) -> Result<OccupancyGrid, MapLoadError> {
    let yaml = fs::read_to_string(yaml_path)?;
    let mut info: MapInfo = serde_yaml::from_str(&yaml)?;
    if let Some(thresh) = occupied_thresh {
        info.occupied_thresh = thresh;
    }
    info.validate()?;

    if info.origin[2] != 0.0 {
        warn!(
            "Map origin yaw {} ignored; grid is treated as axis aligned",
            info.origin[2]
        );
    }

    let yaml_dir = yaml_path.parent().unwrap_or(Path::new("."));
    let image_path = yaml_dir.join(&info.image);
    let image = image::open(&image_path)?.into_luma8();

    debug!(
        "Loaded {} ({}x{} px)",
        image_path.display(),
        image.width(),
        image.height()
    );

    Ok(grid_from_image(&image, &info))
}

fn grid_from_image(image: &GrayImage, info: &MapInfo) -> OccupancyGrid {
    let (width, height) = image.dimensions();
    let mut grid = OccupancyGrid::new(
        width as usize,
        height as usize,
        info.resolution,
        Point2D::new(info.origin[0], info.origin[1]),
    );

    for (px, py, pixel) in image.enumerate_pixels() {
        let v = pixel.0[0] as f64 / 255.0;
        let p = if info.negate != 0 { v } else { 1.0 - v };
        if p > info.occupied_thresh {
            // Image row 0 is the top of the map
            let y = height - 1 - py;
            grid.set_occupied(GridCoord::new(px as i32, y as i32), true);
        }
    }

    grid
}
