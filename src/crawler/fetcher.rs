//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the shared HTTP client with a proper user agent string
//! - GET requests for mirror listing pages with a per-request timeout
//! - Content-Type screening so only HTML reaches the link extractor
//! - Error classification

use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;

/// Errors produced when fetching a mirror listing page
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection failure, DNS failure, timeout, or a broken body read
    #[error("network error fetching {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    /// Server answered with a non-success status
    #[error("HTTP {status} fetching {url}")]
    HttpStatus { url: String, status: u16 },

    /// Response carries something other than an HTML listing, so there is
    /// nothing to expand (plain-text indexes, stray binaries)
    #[error("not a navigable listing at {url}: content-type '{content_type}'")]
    NotNavigable { url: String, content_type: String },
}

impl FetchError {
    /// Returns true if the URL was reachable but simply not an HTML page
    pub fn is_not_navigable(&self) -> bool {
        matches!(self, Self::NotNavigable { .. })
    }
}

/// Builds the HTTP client shared by all crawl workers
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use mirror_scout::crawler::build_http_client;
///
/// let client = build_http_client().unwrap();
/// ```
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    let user_agent = format!("mirror-scout/{}", env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a mirror listing page as HTML text
///
/// Sends a GET request with the given timeout covering the whole exchange.
/// Redirects are followed, so directory URLs missing their trailing slash
/// still land on the listing.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `timeout` - Total time allowed for the request
///
/// # Returns
///
/// * `Ok(String)` - The HTML body of the listing
/// * `Err(FetchError::Network)` - The request never completed
/// * `Err(FetchError::HttpStatus)` - The server answered with a non-2xx status
/// * `Err(FetchError::NotNavigable)` - The response is not HTML
pub async fn fetch_listing(
    client: &Client,
    url: &str,
    timeout: Duration,
) -> Result<String, FetchError> {
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| FetchError::Network {
            url: url.to_string(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    // Some mirrors serve plain-text directory indexes; only HTML is worth
    // handing to the link extractor. A missing Content-Type counts as
    // not navigable.
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.to_ascii_lowercase().contains("text/html") {
        return Err(FetchError::NotNavigable {
            url: url.to_string(),
            content_type,
        });
    }

    response.text().await.map_err(|e| FetchError::Network {
        url: url.to_string(),
        source: e,
    })
}
