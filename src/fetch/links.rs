// src/fetch/links.rs
// =============================================================================
// This module extracts links from a fetched page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// We also use the `url` crate to resolve relative hrefs against the page's
// effective URL - the post-redirect one, so relative links resolve where
// the browser would resolve them.
//
// Note what this module does NOT do: it never filters by scheme or domain.
// A mailto: link or an off-site link comes out of here as-is; deciding
// what to do with it is the classifier's job, not the extractor's.
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

use super::FetchedPage;

// Extracts all anchor links from a page as absolute URL strings
//
// Parameters:
//   page: the fetched page (body + effective URL)
//
// Returns: Vec<String> of absolute URLs, in document order
//
// Hrefs that cannot be resolved to an absolute form (and bare fragment
// references like "#top") are dropped silently.
pub fn extract_links(page: &FetchedPage) -> Vec<String> {
    let mut links = Vec::new();

    let document = Html::parse_document(&page.body);

    // "a[href]" is a constant selector, known to be valid
    let selector = Selector::parse("a[href]").unwrap();

    // Relative links resolve against the effective URL
    let base = match Url::parse(&page.url) {
        Ok(url) => url,
        Err(_) => return links,
    };

    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(absolute) = resolve_href(&base, href) {
                links.push(absolute);
            }
        }
    }

    links
}

// Resolves a possibly-relative href to an absolute URL string
//
// Examples:
//   base = "https://a.test/page"
//   href = "/docs"        -> Some("https://a.test/docs")
//   href = "https://b.test" -> Some("https://b.test/")
//   href = "#section"     -> None (same page, nothing to crawl)
fn resolve_href(base: &Url, href: &str) -> Option<String> {
    // A fragment-only href points back at the page itself
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    match base.join(href) {
        Ok(url) => Some(url.to_string()),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> FetchedPage {
        FetchedPage {
            url: "https://a.test/page/".to_string(),
            status: 200,
            content_type: Some("text/html".to_string()),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_extract_absolute_link() {
        let links = extract_links(&page(r#"<a href="https://b.test/x">x</a>"#));
        assert_eq!(links, vec!["https://b.test/x"]);
    }

    #[test]
    fn test_resolve_relative_link() {
        let links = extract_links(&page(r#"<a href="/docs">Docs</a>"#));
        assert_eq!(links, vec!["https://a.test/docs"]);
    }

    #[test]
    fn test_resolve_parent_relative_link() {
        let links = extract_links(&page(r#"<a href="../about">About</a>"#));
        assert_eq!(links, vec!["https://a.test/about"]);
    }

    #[test]
    fn test_mailto_passes_through() {
        // Scheme filtering is the classifier's job, not ours
        let links = extract_links(&page(r#"<a href="mailto:x@a.test">Mail</a>"#));
        assert_eq!(links, vec!["mailto:x@a.test"]);
    }

    #[test]
    fn test_fragment_only_is_dropped() {
        let links = extract_links(&page(r##"<a href="#top">Top</a>"##));
        assert!(links.is_empty());
    }

    #[test]
    fn test_anchor_without_href_is_ignored() {
        let links = extract_links(&page(r#"<a name="here">x</a>"#));
        assert!(links.is_empty());
    }

    #[test]
    fn test_document_order_preserved() {
        let links = extract_links(&page(
            r#"<a href="/one">1</a><a href="/two">2</a><a href="/three">3</a>"#,
        ));
        assert_eq!(
            links,
            vec![
                "https://a.test/one",
                "https://a.test/two",
                "https://a.test/three"
            ]
        );
    }
}
