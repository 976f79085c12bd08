//! Core foundation layer.
//!
//! The bottom of the analyzer stack with no internal dependencies.
//!
//! # Contents
//!
//! - [`types`]: Poses, points and path labels
//! - [`math`]: Angle normalization and heading differences

pub mod math;
pub mod types;

pub use types::{PathType, Point2D, Pose2D};
