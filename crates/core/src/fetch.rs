//! HTML fetching for URL inputs.
//!
//! One HTTP GET with a browser-like User-Agent, a bounded timeout, and a
//! bounded redirect count. Transport failures map onto the user-facing
//! [`ShapeshiftError`] fetch variants; a fetch never yields a partial body.

use std::time::Duration;

use reqwest::{Client, StatusCode, redirect};
use tracing::debug;
use url::Url;

use crate::{Result, ShapeshiftError};

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Maximum number of redirects to follow.
    pub max_redirects: usize,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 10,
            max_redirects: 5,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
                         Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
        }
    }
}

/// Fetches HTML content from a URL.
///
/// Follows up to `max_redirects` redirects and enforces the configured
/// timeout. Network and HTTP-status failures are mapped to the specific
/// fetch error variants so the caller can surface a correctable message.
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = Url::parse(url).map_err(|e| ShapeshiftError::InvalidUrl(e.to_string()))?;

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .redirect(redirect::Policy::limited(config.max_redirects))
        .build()
        .map_err(|e| ShapeshiftError::Unexpected(e.to_string()))?;

    debug!(url = %parsed_url, "fetching page");

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8")
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(map_transport_error)?;

    match response.status() {
        StatusCode::NOT_FOUND => return Err(ShapeshiftError::PageNotFound),
        StatusCode::FORBIDDEN => return Err(ShapeshiftError::AccessDenied),
        status if !status.is_success() => {
            return Err(ShapeshiftError::FetchFailed(format!("HTTP status {}", status)));
        }
        _ => {}
    }

    let body = response.text().await.map_err(map_transport_error)?;

    debug!(bytes = body.len(), "page fetched");

    Ok(body)
}

fn map_transport_error(err: reqwest::Error) -> ShapeshiftError {
    if err.is_timeout() {
        ShapeshiftError::Timeout
    } else if err.is_connect() {
        ShapeshiftError::ConnectionRefused
    } else {
        ShapeshiftError::FetchFailed(err.to_string())
    }
}
