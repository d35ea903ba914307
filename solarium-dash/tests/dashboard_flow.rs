//! End-to-end dashboard tests against a live API instance.

use solarium::{
    build_router, ApiConfig, AppState, NewReading, ReadingStore, SensorCatalog, StoreConfig,
};
use solarium_dash::{
    default_requests, ChartLoader, ClientError, DashClient, DashConfig, DashboardPage, LoadError,
    SeriesRequest,
};
use std::sync::Arc;
use tempfile::TempDir;

/// Spin up the API on an ephemeral port backed by a fresh store.
async fn spawn_server() -> (String, Arc<ReadingStore>, TempDir) {
    let dir = TempDir::new().unwrap();
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
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), store, dir)
}

fn loader_for(base_url: &str) -> ChartLoader {
    let config = DashConfig {
        base_url: base_url.to_string(),
        request_timeout_ms: 2000,
    };
    ChartLoader::new(DashClient::new(config))
}

#[tokio::test]
async fn test_dashboard_end_to_end() {
    let (base_url, store, _dir) = spawn_server().await;

    store
        .insert(
            "temperature",
            NewReading::new("2024-01-01 00:00:00", "C", 21.5),
        )
        .await
        .unwrap();
    store
        .insert(
            "temperature",
            NewReading::new("2024-01-01 01:00:00", "C", 22.0),
        )
        .await
        .unwrap();
    store
        .insert("light", NewReading::new("2024-01-01 00:00:00", "lux", 0.0))
        .await
        .unwrap();
    store
        .insert(
            "light",
            NewReading::new("2024-01-01 12:00:00", "lux", 840.0),
        )
        .await
        .unwrap();

    let loader = loader_for(&base_url);
    let results = loader.load_all(&default_requests()).await;
    assert_eq!(results.len(), 3);

    let mut page = DashboardPage::default();
    for result in results {
        let chart = result.expect("every default sensor should load");

        if chart.sensor == "temperature" {
            assert_eq!(
                chart.config.data.labels,
                vec!["2024-01-01 00:00:00", "2024-01-01 01:00:00"]
            );
            assert_eq!(chart.config.data.datasets[0].data, vec![21.5, 22.0]);
            assert_eq!(chart.config.data.datasets[0].label, "temperature");
            assert!(chart.svg.contains("<polyline"));
        }
        if chart.sensor == "humidity" {
            // No readings stored: empty chart with the placeholder SVG
            assert!(chart.config.data.labels.is_empty());
            assert!(chart.svg.contains("No data"));
        }

        page.mount(chart).unwrap();
    }

    let html = page.to_html();
    assert!(html.contains("id=\"temperatureChart\""));
    assert!(html.contains("id=\"humidityChart\""));
    assert!(html.contains("id=\"lightChart\""));

    let out = _dir.path().join("dashboard.html");
    page.write_to(&out).unwrap();
    assert!(out.exists());
}

#[tokio::test]
async fn test_unknown_sensor_does_not_block_others() {
    let (base_url, store, _dir) = spawn_server().await;

    store
        .insert(
            "temperature",
            NewReading::new("2024-01-01 00:00:00", "C", 20.0),
        )
        .await
        .unwrap();

    let mut requests = default_requests();
    requests.push(SeriesRequest::new("pressure", "pressureChart"));

    let loader = loader_for(&base_url);
    let results = loader.load_all(&requests).await;

    assert!(results[0].is_ok());
    assert!(results[1].is_ok());
    assert!(results[2].is_ok());
    match &results[3] {
        Err(LoadError::Fetch { sensor, source }) => {
            assert_eq!(sensor, "pressure");
            assert!(matches!(source, ClientError::Api { status: 404, .. }));
        }
        other => panic!("Expected a fetch error for pressure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_loading_twice_yields_same_chart() {
    let (base_url, store, _dir) = spawn_server().await;

    store
        .insert(
            "humidity",
            NewReading::new("2024-01-01 00:00:00", "%", 55.0),
        )
        .await
        .unwrap();
    store
        .insert(
            "humidity",
            NewReading::new("2024-01-01 01:00:00", "%", 57.5),
        )
        .await
        .unwrap();

    let loader = loader_for(&base_url);
    let request = SeriesRequest::new("humidity", "humidityChart");

    let first = loader.load(&request).await.unwrap();
    let second = loader.load(&request).await.unwrap();

    assert_eq!(first.config, second.config);
    assert_eq!(first.svg, second.svg);
}

#[tokio::test]
async fn test_readings_chart_in_response_order() {
    let (base_url, store, _dir) = spawn_server().await;

    // Inserted out of chronological order; the chart keeps insertion order
    store
        .insert("light", NewReading::new("2024-01-01 02:00:00", "lux", 3.0))
        .await
        .unwrap();
    store
        .insert("light", NewReading::new("2024-01-01 00:00:00", "lux", 1.0))
        .await
        .unwrap();
    store
        .insert("light", NewReading::new("2024-01-01 01:00:00", "lux", 2.0))
        .await
        .unwrap();

    let loader = loader_for(&base_url);
    let chart = loader
        .load(&SeriesRequest::new("light", "lightChart"))
        .await
        .unwrap();

    assert_eq!(chart.config.data.datasets[0].data, vec![3.0, 1.0, 2.0]);
    assert_eq!(
        chart.config.data.labels,
        vec![
            "2024-01-01 02:00:00",
            "2024-01-01 00:00:00",
            "2024-01-01 01:00:00"
        ]
    );
}
