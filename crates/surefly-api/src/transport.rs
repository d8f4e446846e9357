// Shared transport configuration for building reqwest::Client instances.
//
// The vendor runs a single public HTTPS endpoint, so there are no TLS
// knobs here -- only the timeout, retry policy, and the fixed header
// set the API expects on every request.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, ORIGIN, REFERER};
use url::Url;

/// Production API root.
pub const PRODUCTION_API_URL: &str = "https://app-api.blue.production.surehub.io/api";

/// Origin the vendor expects on browser-style requests.
const WEB_ORIGIN: &str = "https://surepetcare.io";

const USER_AGENT: &str = concat!("surefly/", env!("CARGO_PKG_VERSION"));

/// Retry policy for transient network failures.
///
/// Only connect errors and timeouts are retried; HTTP error statuses
/// never are. Backoff doubles after each failed attempt.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Extra attempts after the first failure.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_backoff: Duration::from_millis(250),
        }
    }
}

/// Shared transport configuration for building the HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// API root. Overridable for tests and self-hosted mirrors.
    pub api_url: Url,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(PRODUCTION_API_URL).expect("production URL is valid"),
            timeout: Duration::from_secs(45),
            retry: RetryPolicy::default(),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    ///
    /// Installs the header set the vendor API expects on every call;
    /// the bearer token and device id are attached per request.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .default_headers(default_headers())
            .build()
            .map_err(crate::error::Error::Transport)
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(ORIGIN, HeaderValue::from_static(WEB_ORIGIN));
    headers.insert(REFERER, HeaderValue::from_static(WEB_ORIGIN));
    headers.insert(
        "X-Requested-With",
        HeaderValue::from_static("com.sureflap.surepetcare"),
    );
    headers
}
