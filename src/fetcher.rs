//! Single-shot HTTP fetching for scraper targets.
//!
//! One GET per call, with the caller's headers and timeout, and no retries.
//! Every failure comes back as a [`FetchError`] so the pipeline can turn it
//! into a `500` envelope instead of propagating a transport fault.

use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, instrument, warn};
use url::Url;

/// Why a fetch produced no usable body.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid url `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid header `{name}`")]
    InvalidHeader { name: String },
    #[error("timeout must be greater than zero")]
    InvalidTimeout,
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("failed to read body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// A successfully fetched response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub status: u16,
    pub body: String,
}

/// Thin wrapper around a shared [`reqwest::Client`].
///
/// Cloning is cheap and clones share one connection pool.
#[derive(Debug, Clone, Default)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// GET `url` once with `headers`, giving up after `timeout`.
    #[instrument(level = "info", skip_all, fields(%url, ?timeout))]
    pub async fn fetch(
        &self,
        url: &str,
        headers: &BTreeMap<String, String>,
        timeout: Duration,
    ) -> Result<Fetched, FetchError> {
        let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        if timeout.is_zero() {
            return Err(FetchError::InvalidTimeout);
        }
        let headers = header_map(headers)?;

        let t0 = Instant::now();
        let response = self
            .client
            .get(parsed)
            .headers(headers)
            .timeout(timeout)
            .send()
            .await
            .map_err(|source| classify(url, timeout, source))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Upstream returned non-success status");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| {
            if source.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                    timeout,
                }
            } else {
                FetchError::Body {
                    url: url.to_string(),
                    source,
                }
            }
        })?;

        debug!(
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched upstream body"
        );
        Ok(Fetched {
            status: status.as_u16(),
            body,
        })
    }
}

fn classify(url: &str, timeout: Duration, source: reqwest::Error) -> FetchError {
    if source.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
            timeout,
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            source,
        }
    }
}

fn header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap, FetchError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let invalid = || FetchError::InvalidHeader { name: name.clone() };
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}
