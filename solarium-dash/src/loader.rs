//! Chart Loading
//!
//! Drives the fetch-decode-render pipeline for each dashboard slot. Every
//! sensor loads independently: one unreachable or unknown sensor produces
//! an error for its own slot and nothing else.

use crate::chart::{ChartConfig, Series};
use crate::client::{ClientError, DashClient};
use crate::render::render_svg;
use futures_util::future::join_all;
use thiserror::Error;

/// One sensor-to-slot assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesRequest {
    /// Sensor type queried from the API, e.g. "temperature"
    pub sensor: String,
    /// Page slot the rendered chart mounts into, e.g. "temperatureChart"
    pub slot: String,
}

impl SeriesRequest {
    pub fn new(sensor: impl Into<String>, slot: impl Into<String>) -> Self {
        Self {
            sensor: sensor.into(),
            slot: slot.into(),
        }
    }
}

/// The standard dashboard: temperature, humidity and light
pub fn default_requests() -> Vec<SeriesRequest> {
    vec![
        SeriesRequest::new("temperature", "temperatureChart"),
        SeriesRequest::new("humidity", "humidityChart"),
        SeriesRequest::new("light", "lightChart"),
    ]
}

/// A chart ready to mount: the config it was built from plus its SVG
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub slot: String,
    pub sensor: String,
    pub config: ChartConfig,
    pub svg: String,
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{sensor}: {source}")]
    Fetch {
        sensor: String,
        #[source]
        source: ClientError,
    },
}

/// Fetches sensor readings and renders them into charts
pub struct ChartLoader {
    client: DashClient,
}

impl ChartLoader {
    pub fn new(client: DashClient) -> Self {
        Self { client }
    }

    /// Load one sensor's readings and render its chart
    ///
    /// Readings are charted in the order the API returns them; the loader
    /// never reorders. An empty response still yields a chart config and
    /// an SVG with the "No data" placeholder.
    pub async fn load(&self, request: &SeriesRequest) -> Result<RenderedChart, LoadError> {
        let readings =
            self.client
                .fetch_readings(&request.sensor)
                .await
                .map_err(|source| LoadError::Fetch {
                    sensor: request.sensor.clone(),
                    source,
                })?;

        let series = Series::from_readings(&request.sensor, &readings);
        let config = ChartConfig::line(series);
        let svg = render_svg(&config);

        tracing::debug!(
            sensor = %request.sensor,
            slot = %request.slot,
            points = readings.len(),
            "Rendered chart"
        );

        Ok(RenderedChart {
            slot: request.slot.clone(),
            sensor: request.sensor.clone(),
            config,
            svg,
        })
    }

    /// Load every requested sensor concurrently
    ///
    /// Results come back in request order, one per request. Failures stay
    /// per-slot: a sensor that errors leaves the other results untouched.
    pub async fn load_all(
        &self,
        requests: &[SeriesRequest],
    ) -> Vec<Result<RenderedChart, LoadError>> {
        join_all(requests.iter().map(|request| self.load(request))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_requests_cover_standard_slots() {
        let requests = default_requests();

        assert_eq!(requests.len(), 3);
        assert_eq!(
            requests[0],
            SeriesRequest::new("temperature", "temperatureChart")
        );
        assert_eq!(requests[1], SeriesRequest::new("humidity", "humidityChart"));
        assert_eq!(requests[2], SeriesRequest::new("light", "lightChart"));
    }

    #[test]
    fn test_load_error_names_the_sensor() {
        let err = LoadError::Fetch {
            sensor: "temperature".to_string(),
            source: ClientError::Unavailable,
        };

        assert!(err.to_string().starts_with("temperature:"));
    }
}
