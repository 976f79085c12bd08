//! File formats: the metric record stream, pose lists and SVG charts.

pub mod metrics_csv;
pub mod path_file;
pub mod svg;

pub use metrics_csv::{read_records, write_header, MetricRecord, CSV_HEADER};
pub use path_file::{load_path, read_path, write_path};
pub use self::svg::{ComparisonPlot, SvgColorScheme, SvgConfig};
