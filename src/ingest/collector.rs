//! Reading Collector
//!
//! Polls sensor sources on a fixed interval and posts each sample to the
//! Solarium API. One sensor failing to sample or post never blocks the
//! others; failures are logged and the loop keeps going.

use super::{IngestError, SensorSource};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Synthetic sensor source for development and demos
///
/// Produces a daily sine wave around a baseline with a little jitter so
/// charts have some texture without real hardware attached.
pub struct SyntheticSource {
    sensor: String,
    unit: String,
    baseline: f64,
    amplitude: f64,
    period_secs: f64,
    jitter: f64,
    range: Option<(f64, f64)>,
}

impl SyntheticSource {
    /// Create a source with a daily cycle around `baseline`
    pub fn new(
        sensor: impl Into<String>,
        unit: impl Into<String>,
        baseline: f64,
        amplitude: f64,
    ) -> Self {
        Self {
            sensor: sensor.into(),
            unit: unit.into(),
            baseline,
            amplitude,
            period_secs: 24.0 * 3600.0,
            jitter: amplitude * 0.05,
            range: None,
        }
    }

    /// Clamp samples to `[min, max]`
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range = Some((min, max));
        self
    }

    /// Indoor temperature around 21 C
    pub fn temperature() -> Self {
        Self::new("temperature", "C", 21.0, 4.0)
    }

    /// Relative humidity around 50 %
    pub fn humidity() -> Self {
        Self::new("humidity", "%", 50.0, 15.0).with_range(0.0, 100.0)
    }

    /// Ambient light around 500 lux
    pub fn light() -> Self {
        Self::new("light", "lux", 500.0, 450.0).with_range(0.0, 1000.0)
    }
}

#[async_trait]
impl SensorSource for SyntheticSource {
    fn sensor(&self) -> &str {
        &self.sensor
    }

    fn unit(&self) -> &str {
        &self.unit
    }

    async fn sample(&self) -> Result<f64, IngestError> {
        use std::time::{SystemTime, UNIX_EPOCH};

        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs_f64();

        let phase = (secs % self.period_secs) / self.period_secs * std::f64::consts::TAU;
        let noise = (rand_simple() - 0.5) * 2.0 * self.jitter;
        let mut value = self.baseline + self.amplitude * phase.sin() + noise;

        if let Some((min, max)) = self.range {
            value = value.clamp(min, max);
        }

        Ok(value)
    }
}

/// Simple pseudo-random fraction in [0, 1) without pulling in a RNG crate
fn rand_simple() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos();
    (nanos % 1000) as f64 / 1000.0
}

/// Polls sensor sources and posts readings to the API
pub struct Collector {
    client: Client,
    api_url: String,
    interval: Duration,
    sources: Vec<Box<dyn SensorSource>>,
}

impl Collector {
    /// Create a collector posting to the given API base URL
    pub fn new(api_url: impl Into<String>, interval: Duration) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_url: api_url.into(),
            interval,
            sources: Vec::new(),
        }
    }

    /// Register a sensor source
    pub fn with_source(mut self, source: Box<dyn SensorSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// The synthetic trio matching the default sensor catalog
    pub fn default_sources() -> Vec<Box<dyn SensorSource>> {
        vec![
            Box::new(SyntheticSource::temperature()),
            Box::new(SyntheticSource::humidity()),
            Box::new(SyntheticSource::light()),
        ]
    }

    /// Sample every source once and post the results
    ///
    /// Returns how many readings were posted and how many attempts failed.
    pub async fn collect_once(&self) -> (usize, usize) {
        let mut posted = 0;
        let mut failed = 0;

        for source in &self.sources {
            let sensor = source.sensor();

            match source.sample().await {
                Ok(value) => match self.post_reading(sensor, source.unit(), value).await {
                    Ok(()) => {
                        tracing::debug!(sensor = %sensor, value, "Posted reading");
                        posted += 1;
                    }
                    Err(e) => {
                        tracing::warn!(sensor = %sensor, error = %e, "Failed to post reading");
                        failed += 1;
                    }
                },
                Err(e) => {
                    tracing::warn!(sensor = %sensor, error = %e, "Failed to sample sensor");
                    failed += 1;
                }
            }
        }

        (posted, failed)
    }

    /// Run the collection loop forever
    pub async fn run(&self) {
        tracing::info!(
            api_url = %self.api_url,
            interval_secs = self.interval.as_secs(),
            sources = self.sources.len(),
            "Collector started"
        );

        let mut interval = tokio::time::interval(self.interval);

        loop {
            interval.tick().await;

            let (posted, failed) = self.collect_once().await;
            if failed > 0 {
                tracing::warn!(posted, failed, "Collection cycle finished with errors");
            } else {
                tracing::debug!(posted, "Collection cycle finished");
            }
        }
    }

    /// POST one reading to /api/:sensor
    pub async fn post_reading(
        &self,
        sensor: &str,
        unit: &str,
        value: f64,
    ) -> Result<(), IngestError> {
        let url = format!("{}/api/{}", self.api_url, sensor);
        let body = serde_json::json!({ "value": value, "unit": unit });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    IngestError::Timeout
                } else if e.is_connect() {
                    IngestError::Unavailable
                } else {
                    IngestError::Request(e)
                }
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            Err(IngestError::Api { status, message })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{build_router, ApiConfig, AppState};
    use crate::sensors::SensorCatalog;
    use crate::storage::{ReadingStore, StoreConfig};
    use std::sync::Arc;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_synthetic_source_metadata() {
        let source = SyntheticSource::temperature();
        assert_eq!(source.sensor(), "temperature");
        assert_eq!(source.unit(), "C");
    }

    #[tokio::test]
    async fn test_synthetic_source_stays_in_range() {
        let temp = SyntheticSource::temperature();
        let humidity = SyntheticSource::humidity();

        for _ in 0..10 {
            let value = temp.sample().await.unwrap();
            assert!(value > 21.0 - 4.5 && value < 21.0 + 4.5);

            let value = humidity.sample().await.unwrap();
            assert!((0.0..=100.0).contains(&value));
        }
    }

    #[test]
    fn test_default_sources_match_catalog() {
        let sources = Collector::default_sources();
        let names: Vec<&str> = sources.iter().map(|s| s.sensor()).collect();
        assert_eq!(names, vec!["temperature", "humidity", "light"]);
    }

    async fn spawn_test_api() -> (String, Arc<ReadingStore>, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = Arc::new(
            ReadingStore::open(StoreConfig::new(dir.path()))
                .await
                .unwrap(),
        );
        let state = AppState::new(
            Arc::clone(&store),
            SensorCatalog::default(),
            ApiConfig::default(),
        );
        let router = build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        (format!("http://{}", addr), store, dir)
    }

    #[tokio::test]
    async fn test_collect_once_posts_to_api() {
        let (api_url, store, _dir) = spawn_test_api().await;

        let collector = Collector::new(api_url, Duration::from_secs(60))
            .with_source(Box::new(SyntheticSource::temperature()))
            .with_source(Box::new(SyntheticSource::humidity()));

        let (posted, failed) = collector.collect_once().await;
        assert_eq!(posted, 2);
        assert_eq!(failed, 0);

        assert_eq!(store.count("temperature").await.unwrap(), 1);
        assert_eq!(store.count("humidity").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unknown_sensor_does_not_block_others() {
        let (api_url, store, _dir) = spawn_test_api().await;

        let collector = Collector::new(api_url, Duration::from_secs(60))
            .with_source(Box::new(SyntheticSource::new("pressure", "hPa", 1013.0, 10.0)))
            .with_source(Box::new(SyntheticSource::light()));

        let (posted, failed) = collector.collect_once().await;
        assert_eq!(posted, 1);
        assert_eq!(failed, 1);

        assert_eq!(store.count("light").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_post_reading_reports_api_errors() {
        let (api_url, _store, _dir) = spawn_test_api().await;

        let collector = Collector::new(api_url, Duration::from_secs(60));
        let err = collector
            .post_reading("pressure", "hPa", 1013.0)
            .await
            .unwrap_err();

        assert!(matches!(err, IngestError::Api { status: 404, .. }));
    }
}
