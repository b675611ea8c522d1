// src/fetch/mod.rs
// =============================================================================
// This module contains everything that touches the network or raw HTML.
//
// Submodules:
// - http: HttpFetcher, the reqwest-backed PageFetcher implementation
// - links: extracts anchor links from a fetched page
//
// This file (mod.rs) defines the narrow contract the crawler depends on:
// the PageFetcher trait and the FetchedPage / FetchError types. The crawl
// scheduler only ever sees these - it never inspects raw bytes, headers,
// or response objects. That boundary is what lets the scheduler tests run
// against an in-memory fetcher with no network at all.
//
// Rust concepts:
// - Traits as seams: swap the real HTTP client for a mock in tests
// - async-trait: async methods in trait definitions
// =============================================================================

mod http;
mod links;

pub use http::HttpFetcher;
pub use links::extract_links;

use async_trait::async_trait;
use thiserror::Error;

// A fetched page, reduced to exactly what the crawler needs
//
// Fields:
//   url: the *effective* URL after following redirects - the crawler
//        checks this against the domain mask, so a redirect that leaves
//        the domain is caught even when the original URL was in-domain
//   status: HTTP status code of the final response
//   content_type: lowercased mime type without the charset suffix
//                 (e.g. "text/html"), if the server declared one
//   body: the decoded body text
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

// Why a page fetch can fail
//
// The crawler treats every variant the same way (the page contributed no
// links), but the distinction matters for diagnostics.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Could not connect, DNS failure, connection reset, etc.
    #[error("network error: {0}")]
    Network(String),
    /// The request did not complete in time
    #[error("request timed out")]
    Timeout,
    /// TLS negotiation or certificate problem
    #[error("tls error: {0}")]
    Tls(String),
    /// The response body could not be decoded as text
    #[error("undecodable body: {0}")]
    Body(String),
}

// The Fetcher collaborator
//
// One method: fetch a URL, hand back a FetchedPage or a FetchError.
// Implementations must follow redirects themselves and report the final
// URL in FetchedPage::url. Timeouts are the implementation's job too -
// the scheduler never cancels a fetch.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}
