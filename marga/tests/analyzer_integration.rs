//! End-to-end analysis tests.
//!
//! These run the full pipeline against real files in a temporary directory:
//! map loading, path loading, analysis, and reading the record stream back.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use approx::assert_relative_eq;
use marga::grid::load_ros_map;
use marga::io::{load_path, read_records, write_path, ComparisonPlot, SvgConfig};
use marga::{
    AnalysisError, AnalyzerConfig, CSV_HEADER, GridCoord, MetricRecord, OccupancyGrid,
    PathAnalyzer, PathComparison, PathType, Point2D, Pose2D, SEARCH_RADIUS,
};
use tempfile::TempDir;

fn empty_map() -> OccupancyGrid {
    OccupancyGrid::centered(100, 100, 1.0)
}

fn original_path() -> Vec<Pose2D> {
    vec![
        Pose2D::new(0.0, 0.0, 0.0),
        Pose2D::new(1.0, 0.0, 0.0),
        Pose2D::new(2.0, 0.0, 0.0),
    ]
}

fn optimized_path() -> Vec<Pose2D> {
    vec![
        Pose2D::new(0.0, 0.0, 0.0),
        Pose2D::new(1.0, 0.0, 0.1),
        Pose2D::new(2.0, 0.0, 0.0),
    ]
}

fn read_back(path: &Path) -> Vec<MetricRecord> {
    read_records(BufReader::new(File::open(path).unwrap())).unwrap()
}

#[test]
fn test_straight_and_nudged_paths() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("path_analysis.csv");
    let map = empty_map();
    let analyzer = PathAnalyzer::new(&map, AnalyzerConfig::new(&output));

    let report = analyzer.analyze(&original_path(), &optimized_path()).unwrap();
    assert_eq!(report.rows_written, 6);
    assert_eq!(report.output_path, output);

    let text = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], CSV_HEADER);
    assert_eq!(
        lines[1],
        "original,0,0.000000,0.000000,0.000000,0.000000,10.000000,0.000000,0.000000,0.000000"
    );
    assert_eq!(
        lines[3],
        "original,2,2.000000,0.000000,0.000000,0.000000,10.000000,2.000000,1.000000,0.000000"
    );
    assert_eq!(
        lines[5],
        "optimized,1,1.000000,0.000000,0.100000,0.000000,10.000000,1.000000,1.000000,0.100000"
    );
    assert_eq!(
        lines[6],
        "optimized,2,2.000000,0.000000,0.000000,0.000000,10.000000,2.000000,1.000000,-0.100000"
    );

    let records = read_back(&output);
    assert_eq!(records.len(), 6);
    assert!(records.iter().all(|r| r.curvature == 0.0));
    assert!(records.iter().all(|r| r.obstacle_distance == SEARCH_RADIUS));

    let original: Vec<_> = records
        .iter()
        .filter(|r| r.path_type == PathType::Original)
        .map(|r| r.path_length)
        .collect();
    assert_eq!(original, vec![0.0, 1.0, 2.0]);

    let optimized: Vec<_> = records
        .iter()
        .filter(|r| r.path_type == PathType::Optimized)
        .collect();
    assert_relative_eq!(optimized[1].segment_length, 1.0);
    assert_relative_eq!(optimized[2].segment_length, 1.0);
    assert_relative_eq!(optimized[1].steering_angle, 0.1, epsilon = 1e-6);
    assert_relative_eq!(optimized[2].steering_angle, -0.1, epsilon = 1e-6);

    assert_eq!(report.original.points_without_obstacle, Some(3));
    assert_eq!(report.optimized.points_without_obstacle, Some(3));
}

#[test]
fn test_record_invariants() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("out.csv");
    let mut map = empty_map();
    for y in 0..100 {
        map.set_occupied(GridCoord::new(55, y), true);
    }

    let original: Vec<Pose2D> = (0..12)
        .map(|i| Pose2D::new(i as f64 * 0.5, (i as f64 * 0.7).sin(), i as f64 * 0.9))
        .collect();
    let optimized: Vec<Pose2D> = (0..8)
        .map(|i| Pose2D::new(i as f64 * 0.75, 0.2, -(i as f64) * 1.3))
        .collect();

    let analyzer = PathAnalyzer::new(&map, AnalyzerConfig::new(&output));
    let report = analyzer.analyze(&original, &optimized).unwrap();
    assert_eq!(report.rows_written, original.len() + optimized.len());

    let records = read_back(&output);
    let split = records
        .iter()
        .position(|r| r.path_type == PathType::Optimized)
        .unwrap();
    assert_eq!(split, original.len());
    assert!(records[split..]
        .iter()
        .all(|r| r.path_type == PathType::Optimized));

    for (path_type, poses) in [
        (PathType::Original, &original),
        (PathType::Optimized, &optimized),
    ] {
        let rows: Vec<_> = records.iter().filter(|r| r.path_type == path_type).collect();
        let n = rows.len();
        assert_eq!(n, poses.len());

        let mut expected_length = 0.0;
        for (i, r) in rows.iter().enumerate() {
            assert_eq!(r.point_index, i);
            assert!(r.curvature >= 0.0);
            assert!(r.obstacle_distance >= 0.0);
            assert!(r.obstacle_distance <= SEARCH_RADIUS);
            assert!(r.steering_angle > -std::f64::consts::PI - 1e-6);
            assert!(r.steering_angle <= std::f64::consts::PI + 1e-6);

            if i == 0 {
                assert_eq!(r.segment_length, 0.0);
                assert_eq!(r.steering_angle, 0.0);
                assert_eq!(r.path_length, 0.0);
            }
            if i == 0 || i == n - 1 {
                assert_eq!(r.curvature, 0.0);
            }

            expected_length += r.segment_length;
            assert_relative_eq!(r.path_length, expected_length, epsilon = 1e-5);
        }
    }

    // Wall cells start at x = 5.0; the first original pose sits at x = 0
    assert_relative_eq!(records[0].obstacle_distance, 5.0, epsilon = 1e-6);
}

#[test]
fn test_empty_path_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("out.csv");
    let map = empty_map();
    let analyzer = PathAnalyzer::new(&map, AnalyzerConfig::new(&output));

    let err = analyzer.analyze(&original_path(), &[]).unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::EmptyPath {
            original: 3,
            optimized: 0
        }
    ));
    assert!(!output.exists());

    // A pre-existing file is left untouched
    fs::write(&output, "previous run\n").unwrap();
    assert!(analyzer.analyze(&[], &[]).is_err());
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous run\n");
}

#[test]
fn test_unwritable_destination() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("missing_dir").join("out.csv");
    let map = empty_map();
    let analyzer = PathAnalyzer::new(&map, AnalyzerConfig::new(&output));

    let err = analyzer
        .analyze(&original_path(), &optimized_path())
        .unwrap_err();
    match err {
        AnalysisError::Sink { path, .. } => assert_eq!(path, output),
        other => panic!("expected sink error, got {:?}", other),
    }
    assert!(!output.exists());
}

#[test]
fn test_existing_file_is_replaced() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("out.csv");
    fs::write(&output, "stale\nstale\nstale\nstale\nstale\nstale\nstale\nstale\n").unwrap();

    let map = empty_map();
    let analyzer = PathAnalyzer::new(&map, AnalyzerConfig::new(&output));
    analyzer.analyze(&original_path(), &optimized_path()).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert!(!text.contains("stale"));
    assert_eq!(text.lines().count(), 7);
}

#[test]
fn test_files_to_comparison() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    // 20x20 map at 0.5, origin (-5, -5); one occupied pixel at the top-left
    let mut pgm = b"P5\n20 20\n255\n".to_vec();
    let mut pixels = vec![255u8; 400];
    pixels[0] = 0;
    pgm.extend_from_slice(&pixels);
    fs::write(dir.join("room.pgm"), pgm).unwrap();
    fs::write(
        dir.join("room.yaml"),
        "image: room.pgm\nresolution: 0.5\norigin: [-5.0, -5.0, 0.0]\noccupied_thresh: 0.65\nnegate: 0\n",
    )
    .unwrap();

    let map = load_ros_map(&dir.join("room.yaml")).unwrap();
    assert_eq!(map.origin(), Point2D::new(-5.0, -5.0));
    assert_eq!(map.occupied_count(), 1);
    assert!(map.is_occupied_at(Point2D::new(-4.75, 4.75)));

    let original_file = dir.join("original.csv");
    let optimized_file = dir.join("optimized.csv");
    write_path(&mut File::create(&original_file).unwrap(), &original_path()).unwrap();
    write_path(&mut File::create(&optimized_file).unwrap(), &optimized_path()).unwrap();

    let original = load_path(&original_file).unwrap();
    let optimized = load_path(&optimized_file).unwrap();

    let output = dir.join("analysis.csv");
    let analyzer = PathAnalyzer::new(&map, AnalyzerConfig::new(&output));
    let report = analyzer.analyze(&original, &optimized).unwrap();

    let from_disk = PathComparison::from_records(&read_back(&output));
    let live = report.comparison();
    assert_eq!(from_disk.rows.len(), live.rows.len());
    for (a, b) in from_disk.rows.iter().zip(&live.rows) {
        assert_eq!(a.name, b.name);
        assert_relative_eq!(a.original, b.original, epsilon = 1e-5);
        assert_relative_eq!(a.optimized, b.optimized, epsilon = 1e-5);
    }

    let length = live.row("Total Path Length").unwrap();
    assert_relative_eq!(length.original, 2.0);
    assert_relative_eq!(length.change_percent.unwrap(), 0.0, epsilon = 1e-9);

    // Straight paths have no interior curvature
    assert_eq!(live.row("Average Curvature").unwrap().change_percent, None);
    assert!(live.to_string().contains("N/A"));
}

#[test]
fn test_record_stream_to_chart() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("analysis.csv");
    let chart = temp.path().join("comparison.svg");

    let map = empty_map();
    let analyzer = PathAnalyzer::new(&map, AnalyzerConfig::new(&output));
    analyzer.analyze(&original_path(), &optimized_path()).unwrap();

    let records = read_back(&output);
    ComparisonPlot::new(&records, SvgConfig::default())
        .save(&chart)
        .unwrap();

    let svg = fs::read_to_string(&chart).unwrap();
    assert!(svg.contains("id=\"trajectory\""));
    assert!(svg.contains("id=\"steering-angle\""));
    assert!(svg.contains("Steering Angle Variance"));
    assert!(!svg.contains("NaN"));
}
