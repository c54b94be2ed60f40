//! HTTP transport backed by `reqwest`.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::TransportError;
use crate::Transport;

/// Real transport. The inner client is a connection-pool handle, cheap to
/// clone and safe to share; timeout behavior is whatever is configured
/// here and surfaces as [`TransportError::Timeout`].
#[derive(Clone)]
pub struct HttpTransport {
    http_client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");
        Self { http_client }
    }

    /// Use an already-configured `reqwest` client.
    pub fn with_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn upload(&self, url: &str, body: &str) -> Result<String, TransportError> {
        let response = self
            .http_client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "text/xml")
            .body(body.to_string())
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }

    async fn download(&self, url: &str) -> Result<String, TransportError> {
        let response = self
            .http_client
            .get(url)
            .header(reqwest::header::CONTENT_TYPE, "text/xml")
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}
