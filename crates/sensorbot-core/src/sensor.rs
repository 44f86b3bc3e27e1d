//! HTTP client for the local sensor endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::error::{SensorError, SensorResult};
use crate::types::SensorReading;

/// Default sensor endpoint.
pub const DEFAULT_SENSOR_URL: &str = "http://localhost:9111/sensor-data";

/// Default bound on a single fetch, connect through body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Something that can produce a fresh [`SensorReading`].
#[async_trait]
pub trait SensorSource: Send + Sync {
    /// Fetch one reading.
    async fn fetch(&self) -> SensorResult<SensorReading>;
}

#[async_trait]
impl<S: SensorSource + ?Sized> SensorSource for std::sync::Arc<S> {
    async fn fetch(&self) -> SensorResult<SensorReading> {
        (**self).fetch().await
    }
}

/// Fetches readings with one `GET` per call. No retries, no caching.
#[derive(Debug, Clone)]
pub struct SensorClient {
    client: Client,
    url: String,
}

impl SensorClient {
    /// Create a client for `url` whose requests are cut off after
    /// `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError::Network`] if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> SensorResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// The endpoint this client queries.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SensorSource for SensorClient {
    async fn fetch(&self) -> SensorResult<SensorReading> {
        debug!(url = %self.url, "fetching sensor data");

        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SensorError::BadStatus { status });
        }

        let body = response.bytes().await?;
        let reading: SensorReading = serde_json::from_slice(&body)?;

        debug!(?reading, "decoded sensor data");
        Ok(reading)
    }
}
