//! Path quality analysis.
//!
//! Walks the original and optimized pose sequences, computes per-point
//! metrics and writes one record per point to a CSV file:
//!
//! ```text
//! validate (both non-empty) ─► create sink ─► header
//!     ─► original rows ─► optimized rows ─► flush
//! ```
//!
//! For point `i` of an `N`-point path:
//! - curvature from `(i-1, i, i+1)` when `0 < i < N-1`, else 0
//! - segment length and steering angle from `(i-1, i)` when `i > 0`, else 0
//! - path length is the running sum of segment lengths, reset per path
//! - obstacle distance from the [`ClearanceEstimator`]
//!
//! Nothing is written when either path is empty.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};

use crate::clearance::{ClearanceEstimator, SEARCH_RADIUS};
use crate::core::{PathType, Pose2D};
use crate::error::{self, AnalysisError};
use crate::geometry::{menger_curvature, segment_metrics, SegmentMetrics};
use crate::grid::OccupancyQuery;
use crate::io::{write_header, MetricRecord};
use crate::summary::{AnalysisReport, PathSummary};

/// Analyzer settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// Destination of the record stream. Created or truncated on each run.
    pub output_path: PathBuf,
    /// Half-width of the clearance search window.
    pub search_radius: f64,
}

impl AnalyzerConfig {
    /// Settings writing to `output_path` with the default [`SEARCH_RADIUS`].
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            search_radius: SEARCH_RADIUS,
        }
    }

    /// Override the clearance search radius.
    pub fn with_search_radius(mut self, search_radius: f64) -> Self {
        self.search_radius = search_radius;
        self
    }
}

/// Records of one path plus the number of points with no obstacle in range.
struct PathRecords {
    records: Vec<MetricRecord>,
    without_obstacle: usize,
}

/// Computes and writes path quality metrics against an occupancy map.
pub struct PathAnalyzer<'a, M: OccupancyQuery + ?Sized> {
    config: AnalyzerConfig,
    clearance: ClearanceEstimator<'a, M>,
}

impl<'a, M: OccupancyQuery + ?Sized> PathAnalyzer<'a, M> {
    /// Analyzer reading clearance from `map`.
    ///
    /// The map is borrowed for the analyzer's lifetime and only queried.
    pub fn new(map: &'a M, config: AnalyzerConfig) -> Self {
        let clearance = ClearanceEstimator::with_search_radius(map, config.search_radius);
        Self { config, clearance }
    }

    /// Settings this analyzer was built with.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Destination of [`analyze`](Self::analyze).
    pub fn output_path(&self) -> &Path {
        &self.config.output_path
    }

    /// Analyze both paths and write the record stream.
    ///
    /// Fails with [`AnalysisError::EmptyPath`] before touching the
    /// filesystem when either path is empty.
    pub fn analyze(
        &self,
        original: &[Pose2D],
        optimized: &[Pose2D],
    ) -> error::Result<AnalysisReport> {
        if original.is_empty() || optimized.is_empty() {
            warn!(
                "Path empty, nothing to analyze (original: {}, optimized: {})",
                original.len(),
                optimized.len()
            );
            return Err(AnalysisError::EmptyPath {
                original: original.len(),
                optimized: optimized.len(),
            });
        }

        let path = &self.config.output_path;
        let file = File::create(path).map_err(|source| {
            error!("Cannot create {}: {}", path.display(), source);
            AnalysisError::Sink {
                path: path.clone(),
                source,
            }
        })?;
        let mut writer = BufWriter::new(file);

        let (rows_written, summaries) = self
            .emit(&mut writer, original, optimized)
            .and_then(|result| writer.flush().map(|_| result))
            .map_err(|source| {
                error!("Failed writing {}: {}", path.display(), source);
                AnalysisError::Write {
                    path: path.clone(),
                    source,
                }
            })?;
        let [original_summary, optimized_summary] = summaries;

        info!(
            "Path analysis written to {} ({} rows)",
            path.display(),
            rows_written
        );

        Ok(AnalysisReport {
            output_path: path.clone(),
            rows_written,
            original: original_summary,
            optimized: optimized_summary,
        })
    }

    /// Write the header and both paths' rows to `writer`.
    ///
    /// Unlike [`analyze`](Self::analyze) this does not validate the paths;
    /// an empty path simply contributes no rows.
    pub fn write_records<W: Write>(
        &self,
        writer: &mut W,
        original: &[Pose2D],
        optimized: &[Pose2D],
    ) -> io::Result<usize> {
        self.emit(writer, original, optimized).map(|(rows, _)| rows)
    }

    /// Per-point metrics for one path.
    pub fn compute_records(&self, path_type: PathType, path: &[Pose2D]) -> Vec<MetricRecord> {
        self.evaluate(path_type, path).records
    }

    fn emit<W: Write>(
        &self,
        writer: &mut W,
        original: &[Pose2D],
        optimized: &[Pose2D],
    ) -> io::Result<(usize, [PathSummary; 2])> {
        write_header(writer)?;
        let original = self.emit_path(writer, PathType::Original, original)?;
        let optimized = self.emit_path(writer, PathType::Optimized, optimized)?;
        Ok((
            original.point_count + optimized.point_count,
            [original, optimized],
        ))
    }

    fn emit_path<W: Write>(
        &self,
        writer: &mut W,
        path_type: PathType,
        path: &[Pose2D],
    ) -> io::Result<PathSummary> {
        let evaluated = self.evaluate(path_type, path);
        for record in &evaluated.records {
            record.write_row(writer)?;
        }
        Ok(PathSummary::from_records(path_type, &evaluated.records)
            .with_points_without_obstacle(evaluated.without_obstacle))
    }

    fn evaluate(&self, path_type: PathType, path: &[Pose2D]) -> PathRecords {
        let n = path.len();
        let mut records = Vec::with_capacity(n);
        let mut without_obstacle = 0;
        let mut path_length = 0.0;

        for (i, pose) in path.iter().enumerate() {
            let clearance = self.clearance.estimate(pose.x, pose.y);
            if !clearance.obstacle_found {
                without_obstacle += 1;
            }

            let curvature = if i > 0 && i + 1 < n {
                menger_curvature(&path[i - 1], pose, &path[i + 1])
            } else {
                0.0
            };

            let segment = if i > 0 {
                segment_metrics(&path[i - 1], pose)
            } else {
                SegmentMetrics::default()
            };
            path_length += segment.length;

            records.push(MetricRecord {
                path_type,
                point_index: i,
                x: pose.x,
                y: pose.y,
                theta: pose.theta,
                curvature,
                obstacle_distance: clearance.distance,
                path_length,
                segment_length: segment.length,
                steering_angle: segment.steering_angle,
            });
        }

        debug!(
            "{} path: {} points, length {:.3}, {} without obstacle in range",
            path_type, n, path_length, without_obstacle
        );

        PathRecords {
            records,
            without_obstacle,
        }
    }
}
