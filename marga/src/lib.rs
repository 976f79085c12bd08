//! # Marga
//!
//! Path quality analysis for 2D planners.
//!
//! ## Overview
//!
//! Given a raw planner path and its post-processed counterpart, Marga
//! computes per-point metrics for both and writes them as one CSV record
//! stream, original rows first:
//!
//! - **curvature**: Menger curvature through each interior point
//! - **obstacle_distance**: clearance to the nearest occupied map cell
//! - **path_length**: running length from the path start
//! - **segment_length**, **steering_angle**: per-segment length and heading change
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use marga::{AnalyzerConfig, OccupancyGrid, PathAnalyzer, Pose2D};
//!
//! let map = OccupancyGrid::centered(200, 200, 0.5);
//! let analyzer = PathAnalyzer::new(&map, AnalyzerConfig::new("path_analysis.csv"));
//!
//! let report = analyzer.analyze(&original, &optimized)?;
//! println!("{}", report.comparison());
//! ```
//!
//! ## Coordinate System
//!
//! Positions are in map units, headings in radians, CCW positive from +X.
//! Headings are reported exactly as given; only heading differences are
//! wrapped into (-π, π].

// Core types and angle math
pub mod core;

// Per-point curvature and segment metrics
pub mod geometry;

// Occupancy map access and loading
pub mod grid;

// Nearest-obstacle search
pub mod clearance;

// Record stream, pose list and SVG chart formats
pub mod io;

// Orchestration
pub mod analyzer;

// Aggregate statistics
pub mod summary;

// TOML configuration
pub mod config;

pub mod error;

pub use analyzer::{AnalyzerConfig, PathAnalyzer};
pub use clearance::{Clearance, ClearanceEstimator, SEARCH_RADIUS};
pub use crate::core::{PathType, Point2D, Pose2D};
pub use error::{AnalysisError, MapLoadError, MetricsCsvError, PathFileError};
pub use grid::{GridCoord, OccupancyGrid, OccupancyQuery};
pub use io::{MetricRecord, CSV_HEADER};
pub use summary::{AnalysisReport, PathComparison, PathSummary};
