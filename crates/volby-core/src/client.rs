//! HTTP client with rate limiting for volby.cz
//!
//! This module provides a throttled HTTP client for the election results
//! pages. Requests are issued one at a time and are never retried: a
//! failed request is reported to the caller as-is.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;
use url::Url;

use crate::error::{Result, VolbyError};

/// Results root of the 2017 Chamber of Deputies election
pub const DEFAULT_BASE_URL: &str = "https://www.volby.cz/pls/ps2017nss/";

/// Default User-Agent mimicking a modern browser
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default Accept-Language header for Czech content
const DEFAULT_ACCEPT_LANGUAGE: &str = "cs-CZ,cs;q=0.9,en;q=0.8";

/// Rate limiter to control request frequency
///
/// Ensures that requests are spaced at least `min_interval` apart
/// to avoid overwhelming the volby.cz server.
pub struct RateLimiter {
    /// Minimum interval between requests
    min_interval: Duration,
    /// Timestamp of the last request
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the specified requests per second
    ///
    /// A rate of zero (or below) disables throttling.
    ///
    /// # Example
    /// ```
    /// use volby_core::client::RateLimiter;
    ///
    /// let limiter = RateLimiter::new(2.0); // 2 requests per second
    /// ```
    pub fn new(requests_per_second: f64) -> Self {
        let min_interval = if requests_per_second > 0.0 && requests_per_second.is_finite() {
            Duration::from_secs_f64(1.0 / requests_per_second)
        } else {
            Duration::ZERO
        };
        Self {
            min_interval,
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Acquire permission to make a request
    ///
    /// Waits if necessary so that the minimum interval between
    /// requests is respected.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }

        *last = Some(Instant::now());
    }

    /// Get the minimum interval between requests
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// Configuration for the volby.cz HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root URL that relative page paths are resolved against
    pub base_url: String,
    /// Maximum requests per second (default: 5.0, 0 disables throttling)
    pub requests_per_second: f64,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            requests_per_second: 5.0,
            timeout_secs: 30,
        }
    }
}

/// HTTP client for volby.cz with rate limiting
pub struct VolbyClient {
    /// Underlying HTTP client
    client: reqwest::Client,
    /// Results root, always ending with `/`
    base_url: Url,
    /// Rate limiter for request throttling
    rate_limiter: RateLimiter,
}

impl VolbyClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// - `VolbyError::InvalidUrl` - `config.base_url` is not an absolute URL
    /// - `VolbyError::HttpError` - the HTTP client cannot be built
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            reqwest::header::HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE),
        );

        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let rate_limiter = RateLimiter::new(config.requests_per_second);

        Ok(Self {
            client,
            base_url,
            rate_limiter,
        })
    }

    /// Resolve a page path (e.g. `ps3?xjazyk=CZ`) against the results root
    pub fn page_url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| VolbyError::InvalidUrl(format!("{}: {}", path, e)))
    }

    /// Fetch the HTML body of a page
    ///
    /// # Errors
    /// - `VolbyError::HttpError` - network failure or timeout
    /// - `VolbyError::HttpStatus` - server answered with a non-2xx status
    pub async fn fetch(&self, url: &Url) -> Result<String> {
        self.rate_limiter.acquire().await;

        tracing::debug!(%url, "GET");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(VolbyError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Parse the configured root, forcing a trailing slash so that
/// relative page paths land inside it rather than replacing its last segment.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }

    let url =
        Url::parse(&normalized).map_err(|e| VolbyError::InvalidUrl(format!("{}: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(VolbyError::InvalidUrl(raw.to_string()));
    }
    Ok(url)
}
