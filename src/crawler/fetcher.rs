//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with a proper user agent string
//! - GET requests for results pages
//! - Error classification (transport vs. undecodable body)
//!
//! There is no retry: any failure here aborts the crawl that asked for the
//! page. An empty results page and a failed request must never look alike.

use crate::config::Config;
use crate::{ParseError, ScoutError, TransportError};
use reqwest::Client;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The scout configuration (user agent and timeouts)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(TransportError)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use bazos_scout::config::Config;
/// use bazos_scout::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, TransportError> {
    Client::builder()
        .user_agent(user_agent(config))
        .timeout(Duration::from_secs(config.http.timeout_secs))
        .connect_timeout(Duration::from_secs(config.http.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
        .map_err(TransportError::Client)
}

/// Formats the user agent: `Name/Version (+ContactURL)`
pub fn user_agent(config: &Config) -> String {
    format!(
        "{}/{} (+{})",
        config.user_agent.crawler_name,
        config.user_agent.crawler_version,
        config.user_agent.contact_url
    )
}

/// Fetches one results page and returns its body as text
///
/// Exactly one GET request is made.
///
/// # Errors
///
/// | Condition                    | Error                           |
/// |------------------------------|---------------------------------|
/// | Connection/timeout/TLS error | `TransportError::Request`       |
/// | Non-2xx status               | `TransportError::Status`        |
/// | Body read interrupted        | `TransportError::Request`       |
/// | Body is not UTF-8            | `ParseError::Encoding`          |
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, ScoutError> {
    tracing::debug!("GET {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| TransportError::Request {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(TransportError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        }
        .into());
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|source| TransportError::Request {
            url: url.to_string(),
            source,
        })?;

    let body = String::from_utf8(bytes.to_vec()).map_err(|_| ParseError::Encoding {
        url: url.to_string(),
    })?;

    tracing::debug!("Fetched {} bytes from {}", body.len(), url);
    Ok(body)
}
