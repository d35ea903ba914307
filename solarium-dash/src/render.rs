//! SVG Rendering
//!
//! Turns a chart config into a standalone SVG line chart. Layout follows
//! the familiar dashboard proportions: fixed 800x400 canvas, left margin
//! for y-axis labels, five horizontal gridlines, evenly spaced category
//! labels along the x-axis.

use crate::chart::ChartConfig;
use std::fmt::Write;

/// Rendered chart width in pixels
pub const CHART_WIDTH: u32 = 800;

/// Rendered chart height in pixels
pub const CHART_HEIGHT: u32 = 400;

const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 40.0;

const BACKGROUND: &str = "#1f2937";
const GRID_COLOR: &str = "#374151";
const LABEL_COLOR: &str = "#9ca3af";
const EMPTY_COLOR: &str = "#6b7280";

/// Maximum number of x-axis labels before thinning kicks in
const MAX_X_LABELS: usize = 6;

/// Render a chart config as an SVG document
///
/// An empty dataset renders the background with a "No data" placeholder
/// instead of axes, so empty sensors still produce a valid chart region.
pub fn render_svg(config: &ChartConfig) -> String {
    let width = CHART_WIDTH as f64;
    let height = CHART_HEIGHT as f64;
    let chart_width = width - MARGIN_LEFT - MARGIN_RIGHT;
    let chart_height = height - MARGIN_TOP - MARGIN_BOTTOM;

    let labels = &config.data.labels;
    let dataset = config.data.datasets.first();
    let values: &[f64] = dataset.map(|d| d.data.as_slice()).unwrap_or(&[]);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img">"#,
        w = CHART_WIDTH,
        h = CHART_HEIGHT
    );
    let _ = writeln!(
        svg,
        r#"  <rect width="{}" height="{}" fill="{}"/>"#,
        CHART_WIDTH, CHART_HEIGHT, BACKGROUND
    );

    if values.is_empty() {
        let _ = writeln!(
            svg,
            r#"  <text x="{:.1}" y="{:.1}" fill="{}" font-size="16" font-family="sans-serif" text-anchor="middle">No data</text>"#,
            width / 2.0,
            height / 2.0,
            EMPTY_COLOR
        );
        svg.push_str("</svg>\n");
        return svg;
    }

    // Y range with 10% padding; degenerate ranges get a fixed pad so a
    // flat line still sits mid-chart
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(*v);
        max = max.max(*v);
    }
    let y_range = max - min;
    let y_padding = if y_range > 0.0 { y_range * 0.1 } else { 1.0 };
    min -= y_padding;
    max += y_padding;

    // Horizontal grid lines with y-axis labels
    for i in 0..=5 {
        let y = MARGIN_TOP + (i as f64 / 5.0) * chart_height;
        let _ = writeln!(
            svg,
            r#"  <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="1"/>"#,
            MARGIN_LEFT,
            y,
            width - MARGIN_RIGHT,
            y,
            GRID_COLOR
        );

        let value = max - (i as f64 / 5.0) * (max - min);
        let _ = writeln!(
            svg,
            r#"  <text x="5" y="{:.1}" fill="{}" font-size="12" font-family="sans-serif">{:.1}</text>"#,
            y + 4.0,
            LABEL_COLOR,
            value
        );
    }

    let scale_y = |v: f64| MARGIN_TOP + ((max - v) / (max - min)) * chart_height;

    // The series line
    let stroke = dataset.map(|d| d.border_color.as_str()).unwrap_or("#fff");
    let stroke_width = dataset.map(|d| d.border_width).unwrap_or(1);

    let points: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            format!(
                "{:.1},{:.1}",
                x_position(i, values.len(), chart_width),
                scale_y(*v)
            )
        })
        .collect();
    let _ = writeln!(
        svg,
        r#"  <polyline points="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
        points.join(" "),
        stroke,
        stroke_width
    );

    // Point markers
    for (i, v) in values.iter().enumerate() {
        let _ = writeln!(
            svg,
            r#"  <circle cx="{:.1}" cy="{:.1}" r="3" fill="{}"/>"#,
            x_position(i, values.len(), chart_width),
            scale_y(*v),
            stroke
        );
    }

    // X-axis labels, thinned so long series stay readable
    let step = (labels.len().div_ceil(MAX_X_LABELS)).max(1);
    for (i, label) in labels.iter().enumerate() {
        if i % step != 0 {
            continue;
        }
        let _ = writeln!(
            svg,
            r#"  <text x="{:.1}" y="{:.1}" fill="{}" font-size="12" font-family="sans-serif" text-anchor="middle">{}</text>"#,
            x_position(i, labels.len(), chart_width),
            height - 10.0,
            LABEL_COLOR,
            xml_escape(label)
        );
    }

    svg.push_str("</svg>\n");
    svg
}

/// Evenly spaced category positions; a lone point sits in the middle
fn x_position(index: usize, count: usize, chart_width: f64) -> f64 {
    if count <= 1 {
        MARGIN_LEFT + chart_width / 2.0
    } else {
        MARGIN_LEFT + (index as f64 / (count - 1) as f64) * chart_width
    }
}

pub(crate) fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartConfig, Reading, Series, TimeLabel, LINE_COLOR};

    fn reading(timestamp: &str, value: f64) -> Reading {
        Reading {
            timestamp: TimeLabel::Text(timestamp.to_string()),
            value,
        }
    }

    fn config_for(values: &[(&str, f64)]) -> ChartConfig {
        let readings: Vec<Reading> = values.iter().map(|(t, v)| reading(t, *v)).collect();
        ChartConfig::line(Series::from_readings("temperature", &readings))
    }

    #[test]
    fn test_render_line_with_fixed_style() {
        let config = config_for(&[
            ("2024-01-01 00:00:00", 21.5),
            ("2024-01-01 01:00:00", 22.0),
        ]);

        let svg = render_svg(&config);

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>\n"));
        assert!(svg.contains("<polyline"));
        assert!(svg.contains(&format!(r#"stroke="{}""#, LINE_COLOR)));
        assert!(svg.contains(r#"stroke-width="2""#));
        // Both point markers present
        assert_eq!(svg.matches("<circle").count(), 2);
    }

    #[test]
    fn test_render_empty_shows_placeholder() {
        let config = config_for(&[]);

        let svg = render_svg(&config);

        assert!(svg.contains("No data"));
        assert!(!svg.contains("<polyline"));
        assert!(!svg.contains("<circle"));
    }

    #[test]
    fn test_render_single_point() {
        let config = config_for(&[("2024-01-01 00:00:00", 21.5)]);

        let svg = render_svg(&config);

        assert_eq!(svg.matches("<circle").count(), 1);
        // Lone point sits at the horizontal center of the plot area
        let expected_x = MARGIN_LEFT + (CHART_WIDTH as f64 - MARGIN_LEFT - MARGIN_RIGHT) / 2.0;
        assert!(svg.contains(&format!(r#"cx="{:.1}""#, expected_x)));
    }

    #[test]
    fn test_render_flat_line_stays_in_bounds() {
        let config = config_for(&[
            ("2024-01-01 00:00:00", 50.0),
            ("2024-01-01 01:00:00", 50.0),
            ("2024-01-01 02:00:00", 50.0),
        ]);

        let svg = render_svg(&config);

        // Degenerate y-range must not produce NaN coordinates
        assert!(!svg.contains("NaN"));
        assert!(svg.contains("<polyline"));
    }

    #[test]
    fn test_labels_are_escaped() {
        let config = config_for(&[("<script>&\"now\"", 1.0), ("later", 2.0)]);

        let svg = render_svg(&config);

        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&lt;script&gt;&amp;&quot;now&quot;"));
    }

    #[test]
    fn test_long_series_thins_x_labels() {
        let values: Vec<(String, f64)> = (0..48)
            .map(|i| (format!("2024-01-01 {:02}:00:00", i % 24), i as f64))
            .collect();
        let refs: Vec<(&str, f64)> = values.iter().map(|(t, v)| (t.as_str(), *v)).collect();

        let svg = render_svg(&config_for(&refs));

        let x_labels = svg
            .lines()
            .filter(|l| l.contains("text-anchor=\"middle\""))
            .count();
        assert!(x_labels <= MAX_X_LABELS);
        // Every point still drawn even when labels thin out
        assert_eq!(svg.matches("<circle").count(), 48);
    }
}
