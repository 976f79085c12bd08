//! Error types for Marga

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by [`PathAnalyzer::analyze`](crate::analyzer::PathAnalyzer::analyze).
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// One or both input paths have no poses. Nothing was written.
    #[error("Empty input path (original: {original} poses, optimized: {optimized} poses)")]
    EmptyPath { original: usize, optimized: usize },

    /// The output file could not be created.
    #[error("Cannot create output file {}: {source}", .path.display())]
    Sink {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing or flushing failed after the output file was opened.
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors loading a ROS map_server YAML + PGM pair.
#[derive(Error, Debug)]
pub enum MapLoadError {
    #[error("Map I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Map YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Map image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid map metadata: {0}")]
    InvalidMetadata(String),
}

/// Errors reading a pose list.
#[derive(Error, Debug)]
pub enum PathFileError {
    #[error("Path file I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Path file contains no poses")]
    Empty,
}

/// Errors reading a metric record stream.
#[derive(Error, Debug)]
pub enum MetricsCsvError {
    #[error("Metrics I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Bad header: {0}")]
    Header(String),

    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Result of an analysis run.
pub type Result<T> = std::result::Result<T, AnalysisError>;
