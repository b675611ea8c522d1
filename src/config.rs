// src/config.rs
// =============================================================================
// This file defines the crawl configuration.
//
// A CrawlConfig is built once, validated up front, and never mutated. The
// two regular expressions (domain mask and blacklist) are compiled here so
// that a bad pattern aborts the run before the crawl ever starts - a crawl
// that silently matched nothing would be much harder to debug.
//
// Rust concepts:
// - Builder-style constructors that return Result for fallible setup
// - anyhow::Context: attaching human-readable context to errors
// =============================================================================

use anyhow::{ensure, Context, Result};
use regex::Regex;
use std::time::Duration;

/// Default number of concurrent crawl workers.
pub const DEFAULT_POOL_SIZE: usize = 4;

/// Default pause before each fetch (polite crawling).
pub const DEFAULT_FETCH_DELAY: Duration = Duration::from_millis(100);

// Immutable configuration for one crawl run
//
// Fields:
//   seed_url: where the crawl starts (depth 0)
//   domain_mask: URLs matching this regex are "inside" the domain boundary
//   blacklist: in-domain links matching this regex are never followed
//   max_depth: inclusive bound - pages at this depth are marked visited
//              but never fetched, so their links are never discovered
//   pool_size: number of concurrent workers (>= 1)
//   fetch_delay: fixed pause before each fetch; zero disables it
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub seed_url: String,
    pub domain_mask: Regex,
    pub blacklist: Regex,
    pub max_depth: usize,
    pub pool_size: usize,
    pub fetch_delay: Duration,
}

impl CrawlConfig {
    /// Builds a validated configuration.
    ///
    /// Fails if either pattern is not a valid regular expression or if the
    /// pool size is zero. These are the only fatal errors in the whole
    /// crawler - everything after construction degrades gracefully.
    pub fn new(
        seed_url: &str,
        domain_mask: &str,
        blacklist: &str,
        max_depth: usize,
        pool_size: usize,
    ) -> Result<Self> {
        let domain_mask = Regex::new(domain_mask)
            .with_context(|| format!("Invalid domain mask pattern '{}'", domain_mask))?;
        let blacklist = Regex::new(blacklist)
            .with_context(|| format!("Invalid blacklist pattern '{}'", blacklist))?;

        ensure!(pool_size >= 1, "Pool size must be at least 1");

        Ok(Self {
            seed_url: seed_url.to_string(),
            domain_mask,
            blacklist,
            max_depth,
            pool_size,
            fetch_delay: DEFAULT_FETCH_DELAY,
        })
    }

    /// Overrides the politeness delay (tests use zero).
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }

    /// True if `url` falls inside the domain boundary.
    ///
    /// The mask is matched against the full URL string, not just the host,
    /// so a mask like `.*example\.com.*` covers subdomains too.
    pub fn in_domain(&self, url: &str) -> bool {
        self.domain_mask.is_match(url)
    }

    /// True if an in-domain `url` should never be followed.
    ///
    /// Only consulted for in-domain links - external links are reported
    /// regardless of what the blacklist says.
    pub fn is_blacklisted(&self, url: &str) -> bool {
        self.blacklist.is_match(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(domain: &str, blacklist: &str) -> Result<CrawlConfig> {
        CrawlConfig::new("https://a.test/", domain, blacklist, 2, 4)
    }

    #[test]
    fn test_valid_config() {
        let cfg = config(r".*a\.test.*", "(^mailto:)").unwrap();
        assert_eq!(cfg.max_depth, 2);
        assert_eq!(cfg.pool_size, 4);
    }

    #[test]
    fn test_invalid_domain_mask_is_fatal() {
        let err = config("(unclosed", "(^mailto:)").unwrap_err();
        assert!(err.to_string().contains("domain mask"));
    }

    #[test]
    fn test_invalid_blacklist_is_fatal() {
        let err = config(r".*a\.test.*", "[bad").unwrap_err();
        assert!(err.to_string().contains("blacklist"));
    }

    #[test]
    fn test_zero_pool_size_is_fatal() {
        let err = CrawlConfig::new("https://a.test/", ".*", "^$", 2, 0).unwrap_err();
        assert!(err.to_string().contains("Pool size"));
    }

    #[test]
    fn test_domain_and_blacklist_predicates() {
        let cfg = config(r".*a\.test.*", "(^mailto:)").unwrap();
        assert!(cfg.in_domain("https://a.test/page"));
        assert!(!cfg.in_domain("https://b.test/page"));
        assert!(cfg.is_blacklisted("mailto:x@a.test"));
        assert!(!cfg.is_blacklisted("https://a.test/contact"));
    }
}
