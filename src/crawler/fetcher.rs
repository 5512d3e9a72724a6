//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper, including:
//! - Building the HTTP client shared by every request of a run
//! - GET requests for page bodies and image bytes
//! - Bounded retry logic for transient failures
//! - Error classification

use crate::config::HttpConfig;
use crate::FetchError;
use reqwest::{Client, Response};
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use catalogue_scraper::config::HttpConfig;
/// use catalogue_scraper::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues GET requests over one reused client, retrying transient failures
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | HTTP 2xx | Success |
/// | HTTP 429 / 5xx | Retry up to `max-retries` times, fixed delay |
/// | Timeout / connection error | Retry up to `max-retries` times, fixed delay |
/// | Other HTTP 4xx | Immediate failure |
/// | Malformed URL | Immediate failure |
///
/// When the retries are used up the last error is wrapped in
/// [`FetchError::Exhausted`].
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    max_retries: u32,
    retry_delay: Duration,
}

impl Fetcher {
    /// Creates a fetcher with a freshly built client
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(config)?, config))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client, config: &HttpConfig) -> Self {
        Self {
            client,
            max_retries: config.max_retries,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        }
    }

    /// Fetches a URL and returns its body decoded as text
    pub async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self.with_retries(url, move || async move {
            let response = self.get(url).await?;
            response.text().await.map_err(|source| FetchError::Network {
                url: url.to_string(),
                source,
            })
        })
        .await
    }

    /// Fetches a URL and returns its raw body
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.with_retries(url, move || async move {
            let response = self.get(url).await?;
            response
                .bytes()
                .await
                .map(|bytes| bytes.to_vec())
                .map_err(|source| FetchError::Network {
                    url: url.to_string(),
                    source,
                })
        })
        .await
    }

    /// Sends a single GET and rejects non-success statuses
    async fn get(&self, url: &str) -> Result<Response, FetchError> {
        let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    async fn with_retries<T, F, Fut>(&self, url: &str, mut attempt_fn: F) -> Result<T, FetchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let max_attempts = self.max_retries + 1;
        let mut attempt = 0;

        loop {
            attempt += 1;
            tracing::debug!("GET {} (attempt {}/{})", url, attempt, max_attempts);

            let err = match attempt_fn().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            if !err.is_transient() {
                return Err(err);
            }

            tracing::warn!(
                "Attempt {}/{} for {} failed: {}",
                attempt,
                max_attempts,
                url,
                err
            );

            if attempt >= max_attempts {
                return Err(FetchError::Exhausted {
                    url: url.to_string(),
                    attempts: attempt,
                    last: err.to_string(),
                });
            }

            tokio::time::sleep(self.retry_delay).await;
        }
    }
}
