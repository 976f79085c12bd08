//! Default value functions for serde deserialization.

use crate::clearance::SEARCH_RADIUS;

pub fn csv_path() -> String {
    "output/path_analysis.csv".to_string()
}

pub fn search_radius() -> f64 {
    SEARCH_RADIUS
}
