//! Marga command line tool.
//!
//! # Usage
//!
//! ```bash
//! # Analyze two paths against a ROS map and print the comparison table
//! marga analyze --original raw.csv --optimized smooth.csv --map maps/office.yaml
//!
//! # Re-read an earlier record stream, optionally charting it
//! marga compare output/path_analysis.csv --svg output/path_comparison.svg
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, info};

use marga::config::MargaConfig;
use marga::grid::ros_map::load_ros_map_with_threshold;
use marga::io::{load_path, read_records, ComparisonPlot, SvgConfig};
use marga::{PathAnalyzer, PathComparison};

#[derive(Parser)]
#[command(name = "marga")]
#[command(about = "Compare path quality of a planner path and its optimized version")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute per-point metrics and write the CSV record stream
    Analyze {
        /// Original path file (x,y,theta per line)
        #[arg(long)]
        original: PathBuf,

        /// Optimized path file (x,y,theta per line)
        #[arg(long)]
        optimized: PathBuf,

        /// ROS map_server YAML file
        #[arg(long)]
        map: PathBuf,

        /// Output CSV file (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// TOML config file
        #[arg(short, long, default_value = "marga.toml")]
        config: PathBuf,

        /// Clearance search radius in map units (overrides config)
        #[arg(long)]
        search_radius: Option<f64>,
    },

    /// Print the comparison table for an existing CSV record stream
    Compare {
        /// CSV file written by `analyze`
        csv: PathBuf,

        /// Also write an SVG chart of both paths and their metric profiles
        #[arg(long)]
        svg: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let result = match args.command {
        Command::Analyze {
            original,
            optimized,
            map,
            output,
            config,
            search_radius,
        } => analyze(
            &original,
            &optimized,
            &map,
            output,
            &config,
            search_radius,
        ),
        Command::Compare { csv, svg } => compare(&csv, svg.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn analyze(
    original: &Path,
    optimized: &Path,
    map: &Path,
    output: Option<PathBuf>,
    config_path: &Path,
    search_radius: Option<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = MargaConfig::load_or_default(config_path)?;

    let mut analyzer_config = config.to_analyzer_config();
    if let Some(output) = output {
        analyzer_config.output_path = output;
    }
    if let Some(radius) = search_radius {
        analyzer_config.search_radius = radius;
    }

    let original = load_path(original)?;
    let optimized = load_path(optimized)?;
    info!(
        "Loaded paths: {} original poses, {} optimized poses",
        original.len(),
        optimized.len()
    );

    let grid = load_ros_map_with_threshold(map, config.map.occupied_thresh_override)?;
    info!(
        "Loaded map {}: {}x{} cells, {} occupied",
        map.display(),
        grid.width(),
        grid.height(),
        grid.occupied_count()
    );

    if let Some(parent) = analyzer_config.output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let analyzer = PathAnalyzer::new(&grid, analyzer_config);
    let report = analyzer.analyze(&original, &optimized)?;

    println!("{}", report.comparison());
    Ok(())
}

fn compare(csv: &Path, svg: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::open(csv)?;
    let records = read_records(BufReader::new(file))?;
    info!("Read {} records from {}", records.len(), csv.display());

    if let Some(svg) = svg {
        ComparisonPlot::new(&records, SvgConfig::default()).save(svg)?;
        info!("Chart written to {}", svg.display());
    }

    println!("{}", PathComparison::from_records(&records));
    Ok(())
}
