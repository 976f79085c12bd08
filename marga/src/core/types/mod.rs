//! Core data types for path analysis.
//!
//! - [`Point2D`]: planar point in map units
//! - [`Pose2D`]: planner output sample (x, y, theta)
//! - [`PathType`]: which of the two analyzed sequences a record belongs to

mod path_type;
mod pose;

pub use path_type::PathType;
pub use pose::{Point2D, Pose2D};
