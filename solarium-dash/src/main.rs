//! Solarium Dashboard Generator
//!
//! Fetches readings from a running Solarium API, renders one SVG line
//! chart per sensor and writes a self-contained HTML dashboard.
//!
//! ```text
//! solarium-dash --api-url http://localhost:8000 -o dashboard.html
//! solarium-dash --sensor temperature --sensor co2:co2Chart
//! ```

use clap::Parser;
use solarium_dash::{
    default_requests, ChartLoader, DashClient, DashConfig, DashboardPage, SeriesRequest,
};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "solarium-dash")]
#[command(about = "Render Solarium sensor charts into a static dashboard")]
#[command(version)]
struct Cli {
    /// Base URL of the Solarium API
    #[arg(long, default_value = "http://localhost:8000")]
    api_url: String,

    /// Output HTML file
    #[arg(short, long, default_value = "solarium-dashboard.html")]
    out: PathBuf,

    /// Request timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    timeout_ms: u64,

    /// Extra sensor to chart, as "name" or "name:slot" (repeatable)
    #[arg(long = "sensor")]
    sensors: Vec<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("solarium_dash=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = DashConfig {
        base_url: cli.api_url.clone(),
        request_timeout_ms: cli.timeout_ms,
    };
    let loader = ChartLoader::new(DashClient::new(config));

    let mut page = DashboardPage::default();
    let mut requests = default_requests();
    for extra in &cli.sensors {
        let (sensor, slot) = match extra.split_once(':') {
            Some((sensor, slot)) => (sensor.to_string(), slot.to_string()),
            None => (extra.clone(), format!("{}Chart", extra)),
        };
        page = page.with_slot(&slot, &sensor);
        requests.push(SeriesRequest::new(sensor, slot));
    }

    let mut mounted = 0usize;
    let mut failed = 0usize;
    for result in loader.load_all(&requests).await {
        match result {
            Ok(chart) => match page.mount(chart) {
                Ok(()) => mounted += 1,
                Err(e) => {
                    tracing::warn!("Failed to mount chart: {}", e);
                    failed += 1;
                }
            },
            Err(e) => {
                tracing::warn!("Failed to load chart: {}", e);
                failed += 1;
            }
        }
    }

    if let Err(e) = page.write_to(&cli.out) {
        eprintln!("Failed to write {}: {}", cli.out.display(), e);
        process::exit(1);
    }

    println!(
        "Wrote {} chart(s) to {} ({} failed)",
        mounted,
        cli.out.display(),
        failed
    );
}
