//! Per-point metric record stream.
//!
//! One header line, then one comma-separated row per path sample:
//!
//! ```text
//! path_type,point_index,x,y,theta,curvature,obstacle_distance,path_length,segment_length,steering_angle
//! original,0,0.000000,0.000000,0.000000,0.000000,10.000000,0.000000,0.000000,0.000000
//! ```
//!
//! Reals are written in fixed-point notation with 6 fractional digits.

use std::io::{BufRead, Write};

use crate::core::PathType;
use crate::error::MetricsCsvError;

/// Column header of the record stream.
pub const CSV_HEADER: &str = "path_type,point_index,x,y,theta,curvature,obstacle_distance,path_length,segment_length,steering_angle";

const FIELD_COUNT: usize = 10;

/// Metrics for one sample of one path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricRecord {
    pub path_type: PathType,
    /// 0-based position within its path
    pub point_index: usize,
    pub x: f64,
    pub y: f64,
    /// Heading as given, not normalized
    pub theta: f64,
    /// Menger curvature; 0 at both path ends
    pub curvature: f64,
    /// Clearance, or the search radius when no obstacle was in range
    pub obstacle_distance: f64,
    /// Running length from the start of this path
    pub path_length: f64,
    /// Length of the segment ending here; 0 at index 0
    pub segment_length: f64,
    /// Heading change over that segment in (-π, π]; 0 at index 0
    pub steering_angle: f64,
}

/// Write the header line.
pub fn write_header<W: Write>(writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "{}", CSV_HEADER)
}

impl MetricRecord {
    /// Write the record as one CSV line.
    pub fn write_row<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(
            writer,
            "{},{},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6}",
            self.path_type,
            self.point_index,
            self.x,
            self.y,
            self.theta,
            self.curvature,
            self.obstacle_distance,
            self.path_length,
            self.segment_length,
            self.steering_angle,
        )
    }

    fn parse_row(line: &str, line_no: usize) -> Result<Self, MetricsCsvError> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != FIELD_COUNT {
            return Err(MetricsCsvError::Parse {
                line: line_no,
                message: format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
            });
        }

        let parse_err = |message: String| MetricsCsvError::Parse {
            line: line_no,
            message,
        };

        let path_type: PathType = fields[0].parse().map_err(parse_err)?;
        let point_index: usize = fields[1]
            .parse()
            .map_err(|e| parse_err(format!("point_index '{}': {}", fields[1], e)))?;

        let mut values = [0.0f64; FIELD_COUNT - 2];
        for (slot, (name, raw)) in values
            .iter_mut()
            .zip(CSV_HEADER.split(',').skip(2).zip(&fields[2..]))
        {
            *slot = raw
                .parse()
                .map_err(|e| parse_err(format!("{} '{}': {}", name, raw, e)))?;
        }
        let [
            x,
            y,
            theta,
            curvature,
            obstacle_distance,
            path_length,
            segment_length,
            steering_angle,
        ] = values;

        Ok(Self {
            path_type,
            point_index,
            x,
            y,
            theta,
            curvature,
            obstacle_distance,
            path_length,
            segment_length,
            steering_angle,
        })
    }
}

/// Read a record stream written by [`write_header`] and [`MetricRecord::write_row`].
///
/// Blank lines are ignored. Line numbers in errors are 1-based.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<MetricRecord>, MetricsCsvError> {
    let mut lines = reader.lines().enumerate();

    let header = loop {
        match lines.next() {
            Some((_, line)) => {
                let line = line?;
                if !line.trim().is_empty() {
                    break line;
                }
            }
            None => return Err(MetricsCsvError::Header("stream is empty".to_string())),
        }
    };
    if header.trim() != CSV_HEADER {
        return Err(MetricsCsvError::Header(format!(
            "expected '{}', found '{}'",
            CSV_HEADER,
            header.trim()
        )));
    }

    let mut records = Vec::new();
    for (idx, line) in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(MetricRecord::parse_row(&line, idx + 1)?);
    }
    Ok(records)
}
