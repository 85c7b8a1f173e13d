//! HTTP transport implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the configured user agent and timeouts
//! - GET requests for post pages and root comment fragments
//! - POST requests for lazy comment branches
//! - Error classification

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::crawler::{FetchMethod, Transport};
use crate::TransportError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `crawler` - Timeouts for each request
///
/// # Example
///
/// ```no_run
/// use rat::config::{CrawlerConfig, UserAgentConfig};
/// use rat::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_millis(crawler.request_timeout))
        .connect_timeout(Duration::from_millis(crawler.connect_timeout))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`Transport`] backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds a transport from configuration
    pub fn new(
        user_agent: &UserAgentConfig,
        crawler: &CrawlerConfig,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(user_agent, crawler)?))
    }

    /// Wraps an already configured client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, method: FetchMethod, url: &Url) -> Result<Vec<u8>, TransportError> {
        let request = match method {
            FetchMethod::Get => self.client.get(url.clone()),
            FetchMethod::Post => self.client.post(url.clone()),
        };

        let response = request.send().await.map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| classify_error(url, e))?;
        tracing::trace!("{} {} -> {} bytes", method, url, body.len());

        Ok(body.to_vec())
    }
}

/// Maps a `reqwest` failure to the transport error taxonomy
fn classify_error(url: &Url, error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        TransportError::Connect {
            url: url.to_string(),
        }
    } else {
        TransportError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
