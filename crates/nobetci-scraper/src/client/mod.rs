//! HTTP fetcher for listing and detail pages.

mod charset;

use std::time::Duration;

use encoding_rs::Encoding;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_CHARSET, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode, Url};

use crate::error::ScraperError;

pub(crate) use charset::decode_html;

/// Upper bound on the TCP/TLS handshake, independent of the overall timeout.
const CONNECT_TIMEOUT_SECS: u64 = 10;

const MAX_REDIRECTS: usize = 10;

const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Fetches pages from the listing site and returns them as UTF-8 text.
///
/// Only an HTTP 200 counts as success. Redirects are followed; every request
/// is bounded by the configured timeout and is never retried.
#[derive(Debug, Clone)]
pub struct EczaneClient {
    client: Client,
    fallback_encoding: &'static Encoding,
}

impl EczaneClient {
    /// Creates an `EczaneClient` with the given timeout, `User-Agent`, and the
    /// encoding assumed for undeclared, non-UTF-8 pages.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config or user agent).
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        fallback_encoding: &'static Encoding,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS.min(timeout_secs)))
            .user_agent(user_agent)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .default_headers(default_headers())
            .build()?;
        Ok(Self {
            client,
            fallback_encoding,
        })
    }

    /// GETs `url` and decodes the body to UTF-8.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`]: any final status other than 200.
    /// - [`ScraperError::Http`]: network, TLS, redirect-limit or timeout failure.
    pub async fn fetch_html(&self, url: &Url) -> Result<String, ScraperError> {
        tracing::debug!(%url, "fetching page");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status != StatusCode::OK {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        // Read the header before the body consumes the response.
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let body = response.bytes().await?;
        tracing::debug!(%url, bytes = body.len(), "page fetched");

        Ok(decode_html(
            &body,
            content_type.as_deref(),
            self.fallback_encoding,
        ))
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(ACCEPT_CHARSET, HeaderValue::from_static("UTF-8"));
    headers
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
