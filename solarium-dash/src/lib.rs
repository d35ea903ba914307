//! Solarium Dash
//!
//! Static dashboard generator for the Solarium sensor API.
//!
//! # Features
//!
//! - Fetches readings per sensor from the HTTP API
//! - Builds line chart configs in the familiar chart.js shape
//! - Renders each config to a standalone SVG
//! - Assembles the charts into a single static HTML page
//!
//! # Architecture
//!
//! The pipeline runs fetch -> decode -> chart config -> SVG -> page. Each
//! sensor loads concurrently and independently; a failing sensor leaves
//! the other charts untouched and its slot shows a placeholder.
//!
//! ```rust,no_run
//! use solarium_dash::{ChartLoader, DashClient, DashConfig, DashboardPage};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = DashClient::new(DashConfig::default());
//! let loader = ChartLoader::new(client);
//! let mut page = DashboardPage::default();
//!
//! for result in loader.load_all(&solarium_dash::default_requests()).await {
//!     if let Ok(chart) = result {
//!         page.mount(chart)?;
//!     }
//! }
//! page.write_to("dashboard.html".as_ref())?;
//! # Ok(())
//! # }
//! ```

pub mod chart;
pub mod client;
pub mod loader;
pub mod page;
pub mod render;

pub use chart::{ChartConfig, ChartData, Dataset, Reading, Series, TimeLabel, LINE_COLOR, LINE_WIDTH};
pub use client::{ClientError, DashClient, DashConfig};
pub use loader::{default_requests, ChartLoader, LoadError, RenderedChart, SeriesRequest};
pub use page::{DashboardPage, PageError};
pub use render::{render_svg, CHART_HEIGHT, CHART_WIDTH};
