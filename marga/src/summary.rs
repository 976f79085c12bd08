//! Aggregate path quality statistics.
//!
//! [`PathSummary`] condenses the records of one path type; [`PathComparison`]
//! puts the original and optimized summaries side by side with the relative
//! change of each metric.

use std::fmt;
use std::path::PathBuf;

use crate::core::PathType;
use crate::io::MetricRecord;

/// Sample variance (n - 1 denominator). Zero for fewer than two values.
pub fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

/// Statistics over the records of one path type.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSummary {
    pub path_type: PathType,
    pub point_count: usize,
    /// Final cumulative path length
    pub total_length: f64,
    pub mean_curvature: f64,
    pub max_curvature: f64,
    pub mean_obstacle_distance: f64,
    pub min_obstacle_distance: f64,
    /// Sample variance of the steering angle column
    pub steering_variance: f64,
    /// Points with no obstacle within the search radius.
    ///
    /// Only known when computed from live clearance estimates; a record
    /// stream read back from disk cannot tell the sentinel from a real
    /// distance.
    pub points_without_obstacle: Option<usize>,
}

impl PathSummary {
    /// Summarize the records belonging to `path_type`; others are ignored.
    pub fn from_records(path_type: PathType, records: &[MetricRecord]) -> Self {
        let selected: Vec<&MetricRecord> =
            records.iter().filter(|r| r.path_type == path_type).collect();
        let n = selected.len();

        if n == 0 {
            return Self {
                path_type,
                point_count: 0,
                total_length: 0.0,
                mean_curvature: 0.0,
                max_curvature: 0.0,
                mean_obstacle_distance: 0.0,
                min_obstacle_distance: 0.0,
                steering_variance: 0.0,
                points_without_obstacle: None,
            };
        }

        let count = n as f64;
        let steering: Vec<f64> = selected.iter().map(|r| r.steering_angle).collect();

        Self {
            path_type,
            point_count: n,
            total_length: selected
                .iter()
                .map(|r| r.path_length)
                .fold(0.0, f64::max),
            mean_curvature: selected.iter().map(|r| r.curvature).sum::<f64>() / count,
            max_curvature: selected.iter().map(|r| r.curvature).fold(0.0, f64::max),
            mean_obstacle_distance: selected.iter().map(|r| r.obstacle_distance).sum::<f64>()
                / count,
            min_obstacle_distance: selected
                .iter()
                .map(|r| r.obstacle_distance)
                .fold(f64::INFINITY, f64::min),
            steering_variance: sample_variance(&steering),
            points_without_obstacle: None,
        }
    }

    /// Attach the count of points that found no obstacle.
    pub fn with_points_without_obstacle(mut self, count: usize) -> Self {
        self.points_without_obstacle = Some(count);
        self
    }
}

/// Relative change in percent from `original` to `optimized`.
///
/// `None` when the original value is zero.
pub fn percent_change(original: f64, optimized: f64) -> Option<f64> {
    if original == 0.0 {
        None
    } else {
        Some((optimized - original) / original * 100.0)
    }
}

/// One row of a [`PathComparison`].
#[derive(Debug, Clone, PartialEq)]
pub struct MetricChange {
    pub name: &'static str,
    pub original: f64,
    pub optimized: f64,
    /// Relative change (%), `None` when undefined
    pub change_percent: Option<f64>,
    /// Fractional digits used when displaying the values
    precision: usize,
}

impl MetricChange {
    fn new(name: &'static str, original: f64, optimized: f64, precision: usize) -> Self {
        Self {
            name,
            original,
            optimized,
            change_percent: percent_change(original, optimized),
            precision,
        }
    }
}

/// Side-by-side comparison of the two paths.
#[derive(Debug, Clone, PartialEq)]
pub struct PathComparison {
    pub original: PathSummary,
    pub optimized: PathSummary,
    pub rows: Vec<MetricChange>,
}

impl PathComparison {
    pub fn new(original: PathSummary, optimized: PathSummary) -> Self {
        let rows = vec![
            MetricChange::new(
                "Total Path Length",
                original.total_length,
                optimized.total_length,
                2,
            ),
            MetricChange::new(
                "Average Curvature",
                original.mean_curvature,
                optimized.mean_curvature,
                6,
            ),
            MetricChange::new(
                "Maximum Curvature",
                original.max_curvature,
                optimized.max_curvature,
                6,
            ),
            MetricChange::new(
                "Average Obstacle Distance",
                original.mean_obstacle_distance,
                optimized.mean_obstacle_distance,
                2,
            ),
            MetricChange::new(
                "Minimum Obstacle Distance",
                original.min_obstacle_distance,
                optimized.min_obstacle_distance,
                2,
            ),
            MetricChange::new(
                "Steering Angle Variance",
                original.steering_variance,
                optimized.steering_variance,
                6,
            ),
        ];

        Self {
            original,
            optimized,
            rows,
        }
    }

    /// Build from a full record stream.
    pub fn from_records(records: &[MetricRecord]) -> Self {
        Self::new(
            PathSummary::from_records(PathType::Original, records),
            PathSummary::from_records(PathType::Optimized, records),
        )
    }

    /// Look up a row by its display name.
    pub fn row(&self, name: &str) -> Option<&MetricChange> {
        self.rows.iter().find(|r| r.name == name)
    }
}

impl fmt::Display for PathComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<28}{:>16}{:>16}{:>12}",
            "Parameter", "Original Path", "Optimized Path", "Change (%)"
        )?;
        for row in &self.rows {
            let change = match row.change_percent {
                Some(pct) => format!("{:.2}%", pct),
                None => "N/A".to_string(),
            };
            writeln!(
                f,
                "{:<28}{:>16.prec$}{:>16.prec$}{:>12}",
                row.name,
                row.original,
                row.optimized,
                change,
                prec = row.precision
            )?;
        }
        write!(
            f,
            "Points: {} original, {} optimized",
            self.original.point_count, self.optimized.point_count
        )?;
        if let (Some(a), Some(b)) = (
            self.original.points_without_obstacle,
            self.optimized.points_without_obstacle,
        ) {
            write!(f, "\nNo obstacle in range: {} original, {} optimized", a, b)?;
        }
        Ok(())
    }
}

/// Outcome of a successful analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// File the record stream was written to
    pub output_path: PathBuf,
    /// Data rows written, excluding the header
    pub rows_written: usize,
    pub original: PathSummary,
    pub optimized: PathSummary,
}

impl AnalysisReport {
    pub fn comparison(&self) -> PathComparison {
        PathComparison::new(self.original.clone(), self.optimized.clone())
    }
}
