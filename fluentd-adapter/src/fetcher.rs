//! Fetcher for fluentd's `monitor_agent` HTTP API.
//!
//! `monitor_agent` serves a JSON document of the form
//! `{"plugins": [{"plugin_id": ..., "output_plugin": ..., ...}]}` on
//! `/api/plugins.json`, typically on port 24220.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fluentd_adapter::fetcher::StatusFetcher;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = StatusFetcher::builder()
//!         .endpoint("fluentd.local", 24220)
//!         .build()?;
//!
//!     for record in &fetcher.fetch()? {
//!         println!("{}: {} queued", record.id, record.buffer_queue_length);
//!     }
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use fluentd_types::StatusSnapshot;

use crate::FetchError;

/// Default `monitor_agent` host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default `monitor_agent` port.
pub const DEFAULT_PORT: u16 = 24220;

/// Compose the plugin status URL for a `monitor_agent` endpoint.
pub fn plugins_url(host: &str, port: u16) -> String {
    format!("http://{}:{}/api/plugins.json", host, port)
}

/// Fetch a snapshot from `url` with a default client.
pub fn fetch(url: &str) -> Result<StatusSnapshot, FetchError> {
    StatusFetcher::builder().url(url).build()?.fetch()
}

/// Blocking client for the plugin status endpoint.
#[derive(Debug, Clone)]
pub struct StatusFetcher {
    client: Client,
    url: String,
}

impl StatusFetcher {
    /// Create a new builder for configuring the fetcher.
    pub fn builder() -> StatusFetcherBuilder {
        StatusFetcherBuilder::default()
    }

    /// The URL this fetcher queries.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Perform a single GET and decode the plugin list.
    ///
    /// Records are returned in the order the endpoint lists them. There is
    /// no retry: a failure is reported to the caller as-is.
    pub fn fetch(&self) -> Result<StatusSnapshot, FetchError> {
        debug!("Fetching plugin status from {}", self.url);

        let response = self.client.get(&self.url).send()?;

        if !response.status().is_success() {
            return Err(FetchError::Transport(format!(
                "{} returned status {}",
                self.url,
                response.status()
            )));
        }

        let body = response.bytes()?;
        let snapshot: StatusSnapshot = serde_json::from_slice(&body)?;

        debug!("Fetched {} plugin records", snapshot.len());
        Ok(snapshot)
    }
}

/// Builder for StatusFetcher.
#[derive(Debug, Default)]
pub struct StatusFetcherBuilder {
    url: Option<String>,
    timeout: Option<Duration>,
}

impl StatusFetcherBuilder {
    /// Set the full plugin status URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the URL from a `monitor_agent` host and port.
    pub fn endpoint(self, host: &str, port: u16) -> Self {
        self.url(plugins_url(host, port))
    }

    /// Override the request timeout. Unset, the transport default applies.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the fetcher.
    pub fn build(self) -> Result<StatusFetcher, FetchError> {
        let mut client = Client::builder();
        if let Some(timeout) = self.timeout {
            client = client.timeout(timeout);
        }
        let client = client
            .build()
            .map_err(|e| FetchError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(StatusFetcher {
            client,
            url: self
                .url
                .unwrap_or_else(|| plugins_url(DEFAULT_HOST, DEFAULT_PORT)),
        })
    }
}
