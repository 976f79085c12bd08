//! SVG comparison chart for a metric record stream.
//!
//! Six panels on a 3x2 grid, original path in blue and optimized in
//! vermillion:
//!
//! ```text
//! ┌────────────┬────────────┬────────────────────┐
//! │ trajectory │ curvature  │ obstacle distance  │
//! │  (y vs x)  │ vs length  │ vs length          │
//! ├────────────┼────────────┼────────────────────┤
//! │ heading    │ steering   │ comparison table   │
//! │ vs length  │ vs length  │                    │
//! └────────────┴────────────┴────────────────────┘
//! ```
//!
//! The trajectory panel keeps equal axis scales. Every panel flips Y so that
//! larger values sit higher on the page. The steering panel leaves out each
//! path's first point, whose steering angle is always zero.

use std::io;
use std::path::Path;

use svg::node::element::{Circle, Group, Line, Polyline, Rectangle, Text};
use svg::Document;

use crate::core::PathType;
use crate::io::MetricRecord;
use crate::summary::PathComparison;

/// Colorblind-friendly palette (Okabe-Ito).
#[derive(Debug, Clone)]
pub struct SvgColorScheme {
    pub original: String,
    pub optimized: String,
    pub background: String,
    pub frame: String,
    pub grid: String,
    pub text: String,
}

impl Default for SvgColorScheme {
    fn default() -> Self {
        Self {
            original: "#0072B2".to_string(),
            optimized: "#D55E00".to_string(),
            background: "white".to_string(),
            frame: "#888888".to_string(),
            grid: "#DDDDDD".to_string(),
            text: "black".to_string(),
        }
    }
}

/// Chart geometry and styling.
#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// Width of one panel in pixels
    pub panel_width: f64,
    /// Height of one panel in pixels
    pub panel_height: f64,
    /// Space between a panel's edge and its plot area
    pub margin: f64,
    /// Line width of the path series
    pub line_width: f64,
    pub colors: SvgColorScheme,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            panel_width: 480.0,
            panel_height: 340.0,
            margin: 55.0,
            line_width: 1.5,
            colors: SvgColorScheme::default(),
        }
    }
}

/// Height reserved above the panels for the chart title.
const TITLE_HEIGHT: f64 = 40.0;

/// Grid lines per axis inside a plot area.
const GRID_DIVISIONS: usize = 4;

/// Renders original-vs-optimized charts from metric records.
///
/// # Example
/// ```
/// use marga::io::svg::{ComparisonPlot, SvgConfig};
///
/// let svg = ComparisonPlot::new(&[], SvgConfig::default()).render();
/// assert!(svg.contains("<svg"));
/// ```
pub struct ComparisonPlot<'a> {
    records: &'a [MetricRecord],
    config: SvgConfig,
    title: String,
}

impl<'a> ComparisonPlot<'a> {
    pub fn new(records: &'a [MetricRecord], config: SvgConfig) -> Self {
        Self {
            records,
            config,
            title: "Path Parameter Comparison: Original vs Optimized".to_string(),
        }
    }

    /// Replace the chart title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Build the SVG document.
    pub fn document(&self) -> Document {
        let cfg = &self.config;
        let width = 3.0 * cfg.panel_width;
        let height = TITLE_HEIGHT + 2.0 * cfg.panel_height;

        let mut doc = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", format!("0 0 {} {}", width, height))
            .add(
                Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", width)
                    .set("height", height)
                    .set("fill", cfg.colors.background.as_str()),
            )
            .add(
                Text::new(self.title.as_str())
                    .set("x", width / 2.0)
                    .set("y", TITLE_HEIGHT * 0.65)
                    .set("text-anchor", "middle")
                    .set("font-size", 18)
                    .set("font-family", "sans-serif")
                    .set("fill", cfg.colors.text.as_str()),
            );

        for (slot, panel) in self.panels().iter().enumerate() {
            doc = doc.add(self.render_panel(panel, self.panel_origin(slot)));
        }
        doc.add(self.render_table(self.panel_origin(5)))
    }

    /// SVG markup as a string.
    pub fn render(&self) -> String {
        self.document().to_string()
    }

    /// Write the chart to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        svg::save(path, &self.document())
    }

    fn panels(&self) -> [Panel; 5] {
        let records = self.records;
        [
            Panel {
                id: "trajectory",
                title: "Path Trajectory Comparison",
                x_label: "X Coordinate",
                y_label: "Y Coordinate",
                original: series(records, PathType::Original, false, |r| (r.x, r.y)),
                optimized: series(records, PathType::Optimized, false, |r| (r.x, r.y)),
                equal_aspect: true,
            },
            Panel::profile(
                records,
                "curvature",
                "Path Curvature Comparison",
                "Curvature",
                false,
                |r| r.curvature,
            ),
            Panel::profile(
                records,
                "obstacle-distance",
                "Obstacle Distance Comparison",
                "Obstacle Distance",
                false,
                |r| r.obstacle_distance,
            ),
            Panel::profile(
                records,
                "heading",
                "Heading Angle Comparison",
                "Heading Angle (rad)",
                false,
                |r| r.theta,
            ),
            Panel::profile(
                records,
                "steering-angle",
                "Steering Angle Comparison",
                "Steering Angle (rad)",
                true,
                |r| r.steering_angle,
            ),
        ]
    }

    /// Top-left corner of panel `slot`, row-major over the 3x2 grid.
    fn panel_origin(&self, slot: usize) -> (f64, f64) {
        let col = (slot % 3) as f64;
        let row = (slot / 3) as f64;
        (
            col * self.config.panel_width,
            TITLE_HEIGHT + row * self.config.panel_height,
        )
    }

    fn plot_area(&self, (x0, y0): (f64, f64)) -> PlotArea {
        let m = self.config.margin;
        PlotArea {
            left: x0 + m,
            top: y0 + m * 0.6,
            width: (self.config.panel_width - 1.5 * m).max(1.0),
            height: (self.config.panel_height - 1.6 * m).max(1.0),
        }
    }

    fn render_panel(&self, panel: &Panel, origin: (f64, f64)) -> Group {
        let colors = &self.config.colors;
        let area = self.plot_area(origin);
        let mut group = Group::new().set("id", panel.id);

        group = group
            .add(
                Rectangle::new()
                    .set("x", area.left)
                    .set("y", area.top)
                    .set("width", area.width)
                    .set("height", area.height)
                    .set("fill", "none")
                    .set("stroke", colors.frame.as_str())
                    .set("stroke-width", 1),
            )
            .add(self.label(
                panel.title,
                area.left + area.width / 2.0,
                area.top - 10.0,
                13,
                "middle",
            ))
            .add(self.label(
                panel.x_label,
                area.left + area.width / 2.0,
                area.top + area.height + 34.0,
                11,
                "middle",
            ))
            .add(
                self.label(panel.y_label, 0.0, 0.0, 11, "middle").set(
                    "transform",
                    format!(
                        "translate({:.2},{:.2}) rotate(-90)",
                        area.left - 42.0,
                        area.top + area.height / 2.0
                    ),
                ),
            );

        let all = panel.original.iter().chain(&panel.optimized).copied();
        let Some(bounds) = Bounds::of(all) else {
            return group.add(self.label(
                "No data",
                area.left + area.width / 2.0,
                area.top + area.height / 2.0,
                12,
                "middle",
            ));
        };

        let projection = Projection::new(bounds.padded(), area, panel.equal_aspect);
        group = group.add(self.render_grid(&projection));

        for (points, color) in [
            (&panel.original, colors.original.as_str()),
            (&panel.optimized, colors.optimized.as_str()),
        ] {
            group = self.render_series(group, points, color, &projection);
        }

        if panel.equal_aspect {
            group = group.add(self.render_legend(area));
        }
        group
    }

    fn render_grid(&self, projection: &Projection) -> Group {
        let area = projection.area;
        let mut group = Group::new()
            .set("stroke", self.config.colors.grid.as_str())
            .set("stroke-width", 0.5);

        for k in 0..=GRID_DIVISIONS {
            let t = k as f64 / GRID_DIVISIONS as f64;

            let x = area.left + t * area.width;
            group = group.add(
                Line::new()
                    .set("x1", x)
                    .set("y1", area.top)
                    .set("x2", x)
                    .set("y2", area.top + area.height),
            );
            let value = projection.unproject_x(x);
            group = group.add(self.tick(value, x, area.top + area.height + 14.0, "middle"));

            let y = area.top + area.height - t * area.height;
            group = group.add(
                Line::new()
                    .set("x1", area.left)
                    .set("y1", y)
                    .set("x2", area.left + area.width)
                    .set("y2", y),
            );
            let value = projection.unproject_y(y);
            group = group.add(self.tick(value, area.left - 4.0, y + 3.0, "end"));
        }

        group
    }

    /// Polyline for two or more points, a dot for a lone point.
    fn render_series(
        &self,
        group: Group,
        points: &[(f64, f64)],
        color: &str,
        projection: &Projection,
    ) -> Group {
        match points {
            [] => group,
            [single] => {
                let (x, y) = projection.project(*single);
                group.add(
                    Circle::new()
                        .set("cx", x)
                        .set("cy", y)
                        .set("r", 2.5 * self.config.line_width)
                        .set("fill", color),
                )
            }
            _ => {
                let coords = points
                    .iter()
                    .map(|&p| {
                        let (x, y) = projection.project(p);
                        format!("{:.2},{:.2}", x, y)
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                group.add(
                    Polyline::new()
                        .set("points", coords)
                        .set("fill", "none")
                        .set("stroke", color)
                        .set("stroke-width", self.config.line_width)
                        .set("stroke-linecap", "round")
                        .set("stroke-linejoin", "round"),
                )
            }
        }
    }

    fn render_legend(&self, area: PlotArea) -> Group {
        let colors = &self.config.colors;
        let mut group = Group::new().set("id", "legend");
        let x = area.left + 10.0;
        let mut y = area.top + 16.0;

        for (label, color) in [
            ("Original Path", colors.original.as_str()),
            ("Optimized Path", colors.optimized.as_str()),
        ] {
            group = group
                .add(
                    Line::new()
                        .set("x1", x)
                        .set("y1", y - 4.0)
                        .set("x2", x + 20.0)
                        .set("y2", y - 4.0)
                        .set("stroke", color)
                        .set("stroke-width", 2.5),
                )
                .add(self.label(label, x + 26.0, y, 11, "start"));
            y += 16.0;
        }
        group
    }

    fn render_table(&self, (x0, y0): (f64, f64)) -> Group {
        let comparison = PathComparison::from_records(self.records);
        let mut group = Group::new().set("id", "comparison");
        let x = x0 + 12.0;
        let mut y = y0 + self.config.margin;

        for line in comparison.to_string().lines() {
            group = group.add(
                Text::new(line)
                    .set("x", x)
                    .set("y", y)
                    .set("font-size", 10)
                    .set("font-family", "monospace")
                    .set("xml:space", "preserve")
                    .set("fill", self.config.colors.text.as_str()),
            );
            y += 16.0;
        }
        group
    }

    fn label(&self, content: &str, x: f64, y: f64, size: i32, anchor: &str) -> Text {
        Text::new(content)
            .set("x", x)
            .set("y", y)
            .set("font-size", size)
            .set("font-family", "sans-serif")
            .set("text-anchor", anchor)
            .set("fill", self.config.colors.text.as_str())
    }

    fn tick(&self, value: f64, x: f64, y: f64, anchor: &str) -> Text {
        Text::new(format!("{:.3}", value))
            .set("x", x)
            .set("y", y)
            .set("font-size", 9)
            .set("font-family", "sans-serif")
            .set("text-anchor", anchor)
            .set("fill", self.config.colors.text.as_str())
            .set("stroke", "none")
    }
}

/// One plotted panel: two series on shared axes.
struct Panel {
    id: &'static str,
    title: &'static str,
    x_label: &'static str,
    y_label: &'static str,
    original: Vec<(f64, f64)>,
    optimized: Vec<(f64, f64)>,
    equal_aspect: bool,
}

impl Panel {
    /// A metric plotted against running path length.
    fn profile(
        records: &[MetricRecord],
        id: &'static str,
        title: &'static str,
        y_label: &'static str,
        skip_first: bool,
        value: fn(&MetricRecord) -> f64,
    ) -> Self {
        let along = |r: &MetricRecord| (r.path_length, value(r));
        Self {
            id,
            title,
            x_label: "Path Length",
            y_label,
            original: series(records, PathType::Original, skip_first, along),
            optimized: series(records, PathType::Optimized, skip_first, along),
            equal_aspect: false,
        }
    }
}

/// Finite points of one path, in record order.
fn series(
    records: &[MetricRecord],
    path_type: PathType,
    skip_first: bool,
    point: impl Fn(&MetricRecord) -> (f64, f64),
) -> Vec<(f64, f64)> {
    records
        .iter()
        .filter(|r| r.path_type == path_type)
        .filter(|r| !(skip_first && r.point_index == 0))
        .map(point)
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Bounds {
    fn of(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        points.into_iter().fold(None, |acc, (x, y)| {
            Some(match acc {
                None => Bounds {
                    min_x: x,
                    max_x: x,
                    min_y: y,
                    max_y: y,
                },
                Some(b) => Bounds {
                    min_x: b.min_x.min(x),
                    max_x: b.max_x.max(x),
                    min_y: b.min_y.min(y),
                    max_y: b.max_y.max(y),
                },
            })
        })
    }

    /// 5% headroom on each side; a zero-width span opens to ±0.5.
    fn padded(self) -> Self {
        let (min_x, max_x) = pad(self.min_x, self.max_x);
        let (min_y, max_y) = pad(self.min_y, self.max_y);
        Bounds {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }
}

fn pad(min: f64, max: f64) -> (f64, f64) {
    let span = max - min;
    if span > 0.0 && span.is_finite() {
        (min - 0.05 * span, max + 0.05 * span)
    } else {
        (min - 0.5, max + 0.5)
    }
}

/// Pixel rectangle a panel draws its data into.
#[derive(Debug, Clone, Copy)]
struct PlotArea {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

/// Data-to-pixel mapping with Y pointing up.
#[derive(Debug, Clone, Copy)]
struct Projection {
    bounds: Bounds,
    area: PlotArea,
    scale_x: f64,
    scale_y: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Projection {
    fn new(bounds: Bounds, area: PlotArea, equal_aspect: bool) -> Self {
        let span_x = bounds.max_x - bounds.min_x;
        let span_y = bounds.max_y - bounds.min_y;
        let mut scale_x = area.width / span_x;
        let mut scale_y = area.height / span_y;
        let (mut offset_x, mut offset_y) = (0.0, 0.0);

        if equal_aspect {
            let scale = scale_x.min(scale_y);
            offset_x = (area.width - span_x * scale) / 2.0;
            offset_y = (area.height - span_y * scale) / 2.0;
            scale_x = scale;
            scale_y = scale;
        }

        Self {
            bounds,
            area,
            scale_x,
            scale_y,
            offset_x,
            offset_y,
        }
    }

    fn project(&self, (x, y): (f64, f64)) -> (f64, f64) {
        let px = self.area.left + self.offset_x + (x - self.bounds.min_x) * self.scale_x;
        let py = self.area.top + self.area.height
            - self.offset_y
            - (y - self.bounds.min_y) * self.scale_y;
        (px, py)
    }

    fn unproject_x(&self, px: f64) -> f64 {
        self.bounds.min_x + (px - self.area.left - self.offset_x) / self.scale_x
    }

    fn unproject_y(&self, py: f64) -> f64 {
        self.bounds.min_y + (self.area.top + self.area.height - self.offset_y - py) / self.scale_y
    }
}
