//! Solarium CLI
//!
//! Command-line interface for Solarium operations:
//! - Log readings
//! - List readings
//! - Count readings
//! - Check server status

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "solarium-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Client for the Solarium sensor telemetry API")]
#[command(
    long_about = "Talks to a running Solarium server.\nLog readings, inspect stored data, and check server health."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8000", global = true)]
    pub api_url: String,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log a reading
    Log {
        /// Sensor type (e.g., temperature)
        sensor: String,
        /// Value
        value: f64,
        /// Timestamp (default: now). Supports ISO 8601, Unix epoch, "now-1h"
        #[arg(short, long)]
        time: Option<String>,
        /// Unit (default: the sensor's configured unit)
        #[arg(short, long)]
        unit: Option<String>,
    },

    /// List a sensor's readings
    List {
        /// Sensor type
        sensor: String,
        /// Only readings from the last period (e.g. 24h, 7d, 4w)
        #[arg(short, long)]
        last: Option<String>,
        /// Inclusive lower timestamp bound
        #[arg(long)]
        start: Option<String>,
        /// Inclusive upper timestamp bound
        #[arg(long)]
        end: Option<String>,
        /// Order by "timestamp" or "value" (default: recorded order)
        #[arg(short, long)]
        order_by: Option<String>,
    },

    /// Count a sensor's readings
    Count {
        /// Sensor type
        sensor: String,
    },

    /// Show server status
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Log {
            sensor,
            value,
            time,
            unit,
        } => {
            let mut body = serde_json::json!({ "value": value });
            if let Some(time) = time {
                body["timestamp"] = serde_json::Value::String(time);
            }
            if let Some(unit) = unit {
                body["unit"] = serde_json::Value::String(unit);
            }

            let response = client
                .post(format!("{}/api/{}", cli.api_url, sensor))
                .json(&body)
                .send()
                .await?;

            if response.status().is_success() {
                let reading: serde_json::Value = response.json().await?;
                println!(
                    "Logged {} = {} {} at {}",
                    sensor,
                    reading["value"],
                    reading["unit"].as_str().unwrap_or(""),
                    reading["timestamp"].as_str().unwrap_or("unknown")
                );
            } else {
                print_api_error(response).await;
                std::process::exit(1);
            }
        }

        Commands::List {
            sensor,
            last,
            start,
            end,
            order_by,
        } => {
            // --last is shorthand for a relative start bound
            let start = match (last, start) {
                (Some(last), _) => Some(format!("now-{}", last)),
                (None, start) => start,
            };

            let mut params = Vec::new();
            if let Some(start) = &start {
                params.push(format!("start={}", urlencoding::encode(start)));
            }
            if let Some(end) = &end {
                params.push(format!("end={}", urlencoding::encode(end)));
            }
            if let Some(order) = &order_by {
                params.push(format!("order-by={}", urlencoding::encode(order)));
            }

            let mut url = format!("{}/api/{}", cli.api_url, sensor);
            if !params.is_empty() {
                url.push('?');
                url.push_str(&params.join("&"));
            }

            let response = client.get(&url).send().await?;

            if !response.status().is_success() {
                print_api_error(response).await;
                std::process::exit(1);
            }

            let readings: Vec<serde_json::Value> = response.json().await?;

            match cli.format.as_str() {
                "json" => {
                    println!("{}", serde_json::to_string_pretty(&readings)?);
                }
                "csv" => {
                    print_csv(&readings);
                }
                _ => {
                    print_table(&sensor, &readings);
                }
            }
        }

        Commands::Count { sensor } => {
            let response = client
                .get(format!("{}/api/{}/count", cli.api_url, sensor))
                .send()
                .await?;

            if !response.status().is_success() {
                print_api_error(response).await;
                std::process::exit(1);
            }

            let body: serde_json::Value = response.json().await?;
            println!("{}", body["count"].as_u64().unwrap_or(0));
        }

        Commands::Status => {
            let response = client.get(format!("{}/health", cli.api_url)).send().await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    println!("Solarium v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!(
                        "API Status: {}",
                        health["status"].as_str().unwrap_or("unknown")
                    );
                    println!(
                        "Storage: {}",
                        health["storage"].as_str().unwrap_or("unknown")
                    );

                    if let Some(stats) = health.get("stats") {
                        if let Some(total) = stats["total_readings"].as_u64() {
                            println!();
                            println!("Readings: {}", total);
                        }
                        if let Some(sensors) = stats["sensors"].as_object() {
                            for (sensor, count) in sensors {
                                println!("  {}: {}", sensor, count);
                            }
                        }
                    }

                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!();
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    eprintln!("API returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to Solarium API at {}", cli.api_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the Solarium server is running:");
                    eprintln!("  solarium serve");
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// Print the error body from a failed API response
async fn print_api_error(response: reqwest::Response) {
    let status = response.status();
    let body: serde_json::Value = response.json().await.unwrap_or_default();

    match body["error"]["message"].as_str() {
        Some(message) => eprintln!("Failed ({}): {}", status, message),
        None => eprintln!("Failed ({})", status),
    }
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

fn print_table(sensor: &str, readings: &[serde_json::Value]) {
    if readings.is_empty() {
        println!("No readings for {}", sensor);
        return;
    }

    println!("{:<6} {:<20} {:<8} {}", "ID", "Timestamp", "Unit", "Value");
    println!("{}", "-".repeat(46));

    for reading in readings {
        println!(
            "{:<6} {:<20} {:<8} {}",
            reading["id"].as_i64().unwrap_or(0),
            reading["timestamp"].as_str().unwrap_or("-"),
            reading["unit"].as_str().unwrap_or("-"),
            reading["value"]
                .as_f64()
                .map(|v| format!("{:.2}", v))
                .unwrap_or_else(|| "-".to_string())
        );
    }
}

fn print_csv(readings: &[serde_json::Value]) {
    println!("id,timestamp,unit,value");

    for reading in readings {
        println!(
            "{},{},{},{}",
            reading["id"].as_i64().unwrap_or(0),
            reading["timestamp"].as_str().unwrap_or(""),
            reading["unit"].as_str().unwrap_or(""),
            reading["value"]
                .as_f64()
                .map(|v| v.to_string())
                .unwrap_or_default()
        );
    }
}
