//! Solarium REST API Client
//!
//! HTTP client for fetching readings from a running Solarium server.

use crate::chart::Reading;
use reqwest::Client;
use thiserror::Error;

/// Solarium API client
pub struct DashClient {
    client: Client,
    config: DashConfig,
}

/// Configuration for the dashboard client
#[derive(Debug, Clone)]
pub struct DashConfig {
    /// Base URL for the Solarium API (e.g., "http://localhost:8000")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout_ms: 5000,
        }
    }
}

/// Errors from talking to the Solarium API
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Server unreachable")]
    Unavailable,

    #[error("Request timed out")]
    Timeout,

    #[error("API error: status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl DashClient {
    /// Create a new client with the given configuration
    pub fn new(config: DashConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Get the current configuration
    pub fn config(&self) -> &DashConfig {
        &self.config
    }

    /// Check if the Solarium server is ready
    pub async fn health_check(&self) -> Result<(), ClientError> {
        let url = format!("{}/health/ready", self.config.base_url);

        let response = self.client.get(&url).send().await.map_err(map_send_error)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ClientError::Unavailable)
        }
    }

    /// Fetch one sensor's readings in stored order
    ///
    /// The response is a bare JSON array; decode failures cover the whole
    /// payload, there is no partial salvage of individual elements.
    pub async fn fetch_readings(&self, sensor: &str) -> Result<Vec<Reading>, ClientError> {
        let url = format!(
            "{}/api/{}",
            self.config.base_url,
            urlencoding::encode(sensor)
        );

        let response = self.client.get(&url).send().await.map_err(map_send_error)?;

        if response.status().is_success() {
            response
                .json::<Vec<Reading>>()
                .await
                .map_err(|e| ClientError::Decode(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            Err(ClientError::Api { status, message })
        }
    }
}

fn map_send_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else if e.is_connect() {
        ClientError::Unavailable
    } else {
        ClientError::Request(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DashConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout_ms, 5000);
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        // Port 9 (discard) is about as unreachable as it gets
        let client = DashClient::new(DashConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            request_timeout_ms: 500,
        });

        let err = client.fetch_readings("temperature").await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Unavailable | ClientError::Timeout | ClientError::Request(_)
        ));
    }
}
