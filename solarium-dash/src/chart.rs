//! Chart Model
//!
//! Line chart configuration derived from sensor readings. The shape
//! mirrors a chart.js config (`type` / `data` / `datasets`) so the JSON
//! form is directly usable by web tooling, while the SVG renderer
//! consumes the same struct.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stroke color applied to every dataset
pub const LINE_COLOR: &str = "rgba(75, 192, 192, 1)";

/// Stroke width applied to every dataset
pub const LINE_WIDTH: u32 = 2;

/// A reading as served by the API
///
/// Only the fields the dashboard needs; anything else in the payload is
/// ignored. Timestamps arrive as strings from Solarium but epoch numbers
/// are accepted too.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Reading {
    pub timestamp: TimeLabel,
    pub value: f64,
}

/// A timestamp used as a category label, kept verbatim
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TimeLabel {
    Text(String),
    Number(f64),
}

impl fmt::Display for TimeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeLabel::Text(s) => f.write_str(s),
            // Epoch timestamps print without a trailing ".0"
            TimeLabel::Number(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            TimeLabel::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Parallel label and value arrays for one sensor
///
/// Order matches the API response; no sorting happens here, so whatever
/// order the server stored is the order the chart shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub sensor: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl Series {
    /// Split readings into labels and values, preserving response order
    pub fn from_readings(sensor: impl Into<String>, readings: &[Reading]) -> Self {
        Self {
            sensor: sensor.into(),
            labels: readings.iter().map(|r| r.timestamp.to_string()).collect(),
            values: readings.iter().map(|r| r.value).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Complete line chart configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: ChartData,
}

/// Chart data block: category labels plus datasets
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// One plotted series with its fixed style
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub border_width: u32,
    pub fill: bool,
}

impl ChartConfig {
    /// Build a line chart for one series
    ///
    /// The dataset label is the sensor name and the style is fixed: teal
    /// stroke, width 2, no fill.
    pub fn line(series: Series) -> Self {
        Self {
            kind: "line".to_string(),
            data: ChartData {
                labels: series.labels,
                datasets: vec![Dataset {
                    label: series.sensor,
                    data: series.values,
                    border_color: LINE_COLOR.to_string(),
                    border_width: LINE_WIDTH,
                    fill: false,
                }],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_decodes_string_and_number_timestamps() {
        let readings: Vec<Reading> = serde_json::from_str(
            r#"[
                {"id": 1, "timestamp": "2024-01-01T00:00", "unit": "C", "value": 21.5},
                {"timestamp": 1704070800, "value": 22.0}
            ]"#,
        )
        .unwrap();

        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].timestamp.to_string(), "2024-01-01T00:00");
        assert_eq!(readings[1].timestamp.to_string(), "1704070800");
        assert_eq!(readings[1].value, 22.0);
    }

    #[test]
    fn test_series_preserves_response_order() {
        // Timestamps deliberately not chronological
        let readings: Vec<Reading> = serde_json::from_str(
            r#"[
                {"timestamp": "2024-01-03 00:00:00", "value": 3.0},
                {"timestamp": "2024-01-01 00:00:00", "value": 1.0},
                {"timestamp": "2024-01-02 00:00:00", "value": 2.0}
            ]"#,
        )
        .unwrap();

        let series = Series::from_readings("temperature", &readings);

        assert_eq!(
            series.labels,
            vec![
                "2024-01-03 00:00:00",
                "2024-01-01 00:00:00",
                "2024-01-02 00:00:00"
            ]
        );
        assert_eq!(series.values, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_line_config_from_two_readings() {
        let readings: Vec<Reading> = serde_json::from_str(
            r#"[
                {"timestamp": "2024-01-01T00:00", "value": 21.5},
                {"timestamp": "2024-01-01T01:00", "value": 22.0}
            ]"#,
        )
        .unwrap();

        let config = ChartConfig::line(Series::from_readings("temperature", &readings));

        assert_eq!(config.kind, "line");
        assert_eq!(
            config.data.labels,
            vec!["2024-01-01T00:00", "2024-01-01T01:00"]
        );
        assert_eq!(config.data.datasets.len(), 1);

        let dataset = &config.data.datasets[0];
        assert_eq!(dataset.label, "temperature");
        assert_eq!(dataset.data, vec![21.5, 22.0]);
        assert_eq!(dataset.border_color, LINE_COLOR);
        assert_eq!(dataset.border_width, 2);
        assert!(!dataset.fill);
    }

    #[test]
    fn test_config_serializes_with_camel_case_style_keys() {
        let readings = vec![Reading {
            timestamp: TimeLabel::Text("2024-01-01 00:00:00".to_string()),
            value: 55.0,
        }];
        let config = ChartConfig::line(Series::from_readings("humidity", &readings));

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["type"], "line");
        assert_eq!(json["data"]["datasets"][0]["borderColor"], LINE_COLOR);
        assert_eq!(json["data"]["datasets"][0]["borderWidth"], 2);
        assert_eq!(json["data"]["datasets"][0]["fill"], false);
    }

    #[test]
    fn test_empty_series_builds_empty_config() {
        let series = Series::from_readings("light", &[]);
        assert!(series.is_empty());

        let config = ChartConfig::line(series);
        assert!(config.data.labels.is_empty());
        assert!(config.data.datasets[0].data.is_empty());
        assert_eq!(config.data.datasets[0].label, "light");
    }
}
