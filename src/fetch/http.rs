// src/fetch/http.rs
// =============================================================================
// This module implements PageFetcher over real HTTP using reqwest.
//
// Key functionality:
// - One shared Client with connection pooling (cheap to clone)
// - Follows up to 5 redirects and reports the *final* URL
// - Categorizes reqwest errors into our FetchError taxonomy
// - Normalizes the Content-Type header (drops charset, lowercases)
//
// Rust concepts:
// - async/await: For network I/O
// - Trait implementations: HttpFetcher is one PageFetcher among others
//   (the tests provide an in-memory one)
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::{FetchError, FetchedPage, PageFetcher};

// The user agent we identify ourselves with
const USER_AGENT: &str = "Mozilla/4.0 (compatible; LinkScoutBot/0.1.0)";

// How long we wait for any single request before giving up
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// reqwest-backed page fetcher.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds the fetcher with its own pooled HTTP client.
    ///
    /// Fails only if the TLS backend cannot initialize.
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            // Follow up to 5 redirects; the response we see is the final hop
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(categorize_error)?;

        // Capture response metadata before consuming the body
        let effective_url = response.url().to_string();
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(normalize_content_type);

        // reqwest decodes the body using the declared charset for us
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        Ok(FetchedPage {
            url: effective_url,
            status,
            content_type,
            body,
        })
    }
}

// Strips the charset suffix and lowercases the mime type
//
// Example: "Text/HTML; charset=UTF-8" -> "text/html"
fn normalize_content_type(header: &str) -> String {
    header
        .split(';')
        .next()
        .unwrap_or(header)
        .trim()
        .to_ascii_lowercase()
}

// Maps a reqwest error onto our FetchError taxonomy
//
// reqwest doesn't expose TLS failures as a dedicated predicate, so we
// fall back to inspecting the error text the same way we would in a log.
fn categorize_error(error: reqwest::Error) -> FetchError {
    let text = error.to_string();

    if error.is_timeout() {
        FetchError::Timeout
    } else if text.contains("certificate") || text.contains("tls") || text.contains("ssl") {
        FetchError::Tls(text)
    } else if error.is_body() || error.is_decode() {
        FetchError::Body(text)
    } else {
        FetchError::Network(text)
    }
}
