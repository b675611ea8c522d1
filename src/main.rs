// src/main.rs
// =============================================================================
// This is the entry point of our crawler.
//
// What happens here:
// 1. Read the crawl configuration from LINK_SCOUT_* environment variables
//    (with defaults), validating it up front
// 2. Run the crawl to completion
// 3. Print every external link found to stdout (table or JSON)
// 4. Exit with proper code (0 = no external links, 1 = external links
//    found, 2 = fatal error)
//
// Diagnostics go to stderr through `tracing` (enable with RUST_LOG=debug),
// so stdout stays clean for the result stream.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod config; // src/config.rs - crawl configuration
mod crawl; // src/crawl/ - frontier, classifier, scheduler
mod fetch; // src/fetch/ - HTTP fetching and link extraction

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use config::{CrawlConfig, DEFAULT_POOL_SIZE};
use crawl::{Crawler, ExternalLink};
use fetch::HttpFetcher;

#[tokio::main]
async fn main() {
    // Diagnostics on stderr; results stay on stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // Fatal error (bad configuration, etc.) - print and exit 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Reads an environment variable, falling back to a default
fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

// Main application logic
//
// Returns:
//   Ok(0) = crawl finished, no external links
//   Ok(1) = crawl finished, external links found
//   Err   = fatal error (the crawl never started)
async fn run() -> Result<i32> {
    // Configuration surface, kept minimal: seed, domain mask, blacklist,
    // depth, pool size, politeness delay
    let seed_url = env_or("LINK_SCOUT_SEED", "https://www.iis.se/");
    let domain_mask = env_or("LINK_SCOUT_DOMAIN_MASK", r".*iis\.se.*");
    let blacklist = env_or("LINK_SCOUT_BLACKLIST", "(^mailto:)");

    let max_depth: usize = env_or("LINK_SCOUT_MAX_DEPTH", "2")
        .parse()
        .context("LINK_SCOUT_MAX_DEPTH must be a non-negative integer")?;
    let pool_size: usize = env_or("LINK_SCOUT_POOL_SIZE", &DEFAULT_POOL_SIZE.to_string())
        .parse()
        .context("LINK_SCOUT_POOL_SIZE must be a positive integer")?;
    let delay_ms: u64 = env_or("LINK_SCOUT_FETCH_DELAY_MS", "100")
        .parse()
        .context("LINK_SCOUT_FETCH_DELAY_MS must be an integer")?;

    let json = env_or("LINK_SCOUT_JSON", "0") == "1";

    // Malformed patterns abort here, before anything is fetched
    let config = CrawlConfig::new(&seed_url, &domain_mask, &blacklist, max_depth, pool_size)?
        .with_fetch_delay(Duration::from_millis(delay_ms));

    eprintln!("🔍 Crawling: {}", seed_url);
    eprintln!("📊 Max depth: {}, pool size: {}", max_depth, pool_size);

    let fetcher = Arc::new(HttpFetcher::new()?);
    let results = Crawler::new(config, fetcher).find_external_links().await;

    print_results(&results, json)?;

    // Exit code 1 when the domain leaks links, handy for CI checks
    if results.is_empty() {
        Ok(0)
    } else {
        Ok(1)
    }
}

// Prints the results either as a table or JSON
fn print_results(results: &[ExternalLink], json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(results)?;
        println!("{}", json_output);
    } else {
        print_table(results);
    }
    Ok(())
}

// Prints results as a human-readable table in the terminal
fn print_table(results: &[ExternalLink]) {
    println!("{:<7} {:<50} {:<50}", "DEPTH", "SOURCE", "TARGET");
    println!("{}", "=".repeat(107));

    for result in results {
        println!(
            "{:<7} {:<50} {:<50}",
            result.depth,
            truncate(&result.source, 47),
            truncate(&result.target, 47)
        );
    }

    println!();
    println!("📊 External links found: {}", results.len());
}

// Truncates a URL for table display
fn truncate(url: &str, max: usize) -> String {
    if url.len() > max {
        format!("{}...", &url[..max])
    } else {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_url_untouched() {
        assert_eq!(truncate("https://a.test/", 47), "https://a.test/");
    }

    #[test]
    fn test_truncate_long_url() {
        let long = "https://a.test/".repeat(10);
        let shown = truncate(&long, 47);
        assert_eq!(shown.len(), 50);
        assert!(shown.ends_with("..."));
    }
}
