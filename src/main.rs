//! Solarium Server
//!
//! Main binary for Solarium operations:
//! - Serve the REST API
//! - Seed sample CSV data
//! - Run the reading collector
//! - Generate a config file
//!
//! # Configuration
//!
//! Settings come from a TOML config file plus environment overrides:
//! - `SOLARIUM_DATA_DIR`: Data directory
//! - `SOLARIUM_HOST` / `SOLARIUM_PORT`: Server bind address
//! - `SOLARIUM_SAMPLE_DIR`: Sample CSV directory
//! - `SOLARIUM_API_URL`: API base URL for the collector
//! - `SOLARIUM_COLLECT_INTERVAL`: Seconds between collection rounds
//! - `RUST_LOG`: Log filter (default: info)

use clap::{Parser, Subcommand};
use solarium::api::{serve, ApiConfig, AppState};
use solarium::config::Config;
use solarium::ingest::{Collector, CsvSeeder};
use solarium::storage::{ReadingStore, StoreConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "solarium")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Environmental sensor telemetry server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a config file (default: search standard locations)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Load sample CSV data into the store
    Seed {
        /// Directory of <sensor>.csv files (overrides config)
        #[arg(long)]
        sample_dir: Option<PathBuf>,
        /// Remove existing readings first
        #[arg(long)]
        fresh: bool,
    },

    /// Poll sensor sources and post readings to a running server
    Collect {
        /// API base URL (overrides config)
        #[arg(long)]
        api_url: Option<String>,
        /// Seconds between sampling rounds (overrides config)
        #[arg(long)]
        interval: Option<u64>,
        /// Sample and post once, then exit
        #[arg(long)]
        once: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    init_tracing(&config);

    match cli.command {
        Commands::Serve { host, port } => serve_command(config, host, port).await,
        Commands::Seed { sample_dir, fresh } => seed_command(config, sample_dir, fresh).await,
        Commands::Collect {
            api_url,
            interval,
            once,
        } => collect_command(config, api_url, interval, once).await,
        Commands::Config { output } => config_command(output),
    }
}

/// Initialize tracing from the logging config
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("solarium={},tower_http=debug", config.logging.level).into()
    });

    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn serve_command(
    config: Config,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting Solarium v{}", env!("CARGO_PKG_VERSION"));

    let store_config = StoreConfig::new(&config.storage.data_dir);
    tracing::info!("Data directory: {:?}", store_config.data_dir);

    let store = Arc::new(ReadingStore::open(store_config).await?);
    let catalog = config.sensors.clone();

    // Optionally seed sample data before accepting traffic
    if config.seed.on_start {
        let seeder = CsvSeeder::new(&config.seed.sample_dir);
        match seeder.seed(&store, &catalog, false).await {
            Ok(report) => tracing::info!("Seeded sample data: {}", report),
            Err(e) => tracing::warn!("Seeding failed: {}", e),
        }
    }

    let api_config = ApiConfig::new(
        host.unwrap_or(config.server.host),
        port.unwrap_or(config.server.port),
    );

    let state = AppState::new(store, catalog, api_config.clone());

    serve(state, &api_config).await?;

    tracing::info!("Solarium stopped");
    Ok(())
}

async fn seed_command(
    config: Config,
    sample_dir: Option<PathBuf>,
    fresh: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = ReadingStore::open(StoreConfig::new(&config.storage.data_dir)).await?;
    let dir = sample_dir.unwrap_or_else(|| PathBuf::from(&config.seed.sample_dir));

    tracing::info!("Seeding from {:?}", dir);

    let seeder = CsvSeeder::new(dir);
    let report = seeder.seed(&store, &config.sensors, fresh).await?;

    println!("Seeded {}", report);
    for error in &report.errors {
        eprintln!("  {}", error);
    }

    Ok(())
}

async fn collect_command(
    config: Config,
    api_url: Option<String>,
    interval: Option<u64>,
    once: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let api_url = api_url.unwrap_or(config.collector.api_url);
    let interval = Duration::from_secs(interval.unwrap_or(config.collector.interval_secs));

    let mut collector = Collector::new(api_url, interval);
    for source in Collector::default_sources() {
        collector = collector.with_source(source);
    }

    if once {
        let (posted, failed) = collector.collect_once().await;
        println!("Posted {} reading(s), {} failed", posted, failed);
        if failed > 0 {
            std::process::exit(1);
        }
        return Ok(());
    }

    collector.run().await;
    Ok(())
}

fn config_command(output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = solarium::config::generate_default_config();

    match output {
        Some(path) => {
            // Create parent directory if needed
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }

    Ok(())
}
