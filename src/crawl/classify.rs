// src/crawl/classify.rs
// =============================================================================
// This module decides what happens to each link a page produces.
//
// Every raw link a worker extracts lands here exactly once and gets one of
// four verdicts:
//
//   External    -> recorded in the crawl's output
//   Duplicate   -> dropped (already visited)
//   Blacklisted -> dropped (in-domain but never followed)
//   Accept      -> becomes a new frontier task, one level deeper
//
// The check order is fixed and matters: the domain check comes FIRST, so
// an external link is always recorded even when it would also match the
// blacklist. The blacklist only governs in-domain traversal.
// =============================================================================

use crate::config::CrawlConfig;

use super::frontier::{Task, VisitedSet};

/// Verdict for one discovered link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkClass {
    /// Outside the domain boundary: record and stop
    External(Task),
    /// In-domain but already visited: drop silently
    Duplicate,
    /// In-domain but matching the blacklist: drop silently
    Blacklisted,
    /// In-domain, unvisited, allowed: crawl it next round
    Accept(Task),
}

// Classifies one raw absolute link found on `parent`'s page
//
// Pure decision logic: the only state it reads is the visited set as it
// stands right now. That snapshot can be stale under concurrency (another
// worker may accept the same URL in the same round), which is why the
// worker re-checks with VisitedSet::insert before fetching.
pub fn classify_link(
    link: &str,
    parent: &Task,
    config: &CrawlConfig,
    visited: &VisitedSet,
) -> LinkClass {
    // Domain check first: external links are recorded unconditionally
    if !config.in_domain(link) {
        return LinkClass::External(Task::new(link, parent.target.clone(), parent.depth + 1));
    }

    if visited.contains(link) {
        return LinkClass::Duplicate;
    }

    if config.is_blacklisted(link) {
        return LinkClass::Blacklisted;
    }

    LinkClass::Accept(Task::new(link, parent.target.clone(), parent.depth + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CrawlConfig;

    fn config() -> CrawlConfig {
        CrawlConfig::new(
            "https://a.test/",
            r".*a\.test.*",
            "(^mailto:)",
            2,
            4,
        )
        .unwrap()
    }

    fn parent() -> Task {
        Task::seed("https://a.test/")
    }

    #[test]
    fn test_external_link_recorded_with_incremented_depth() {
        let verdict = classify_link("https://b.test/x", &parent(), &config(), &VisitedSet::new());
        match verdict {
            LinkClass::External(task) => {
                assert_eq!(task.target, "https://b.test/x");
                assert_eq!(task.source, "https://a.test/");
                assert_eq!(task.depth, 1);
            }
            other => panic!("expected External, got {:?}", other),
        }
    }

    #[test]
    fn test_accept_builds_child_task() {
        let verdict = classify_link("https://a.test/p1", &parent(), &config(), &VisitedSet::new());
        match verdict {
            LinkClass::Accept(task) => {
                assert_eq!(task.target, "https://a.test/p1");
                assert_eq!(task.source, "https://a.test/");
                assert_eq!(task.depth, 1);
            }
            other => panic!("expected Accept, got {:?}", other),
        }
    }

    #[test]
    fn test_visited_link_is_duplicate() {
        let visited = VisitedSet::new();
        visited.add("https://a.test/p1");
        let verdict = classify_link("https://a.test/p1", &parent(), &config(), &visited);
        assert_eq!(verdict, LinkClass::Duplicate);
    }

    #[test]
    fn test_blacklisted_link_is_dropped() {
        let verdict = classify_link("mailto:x@a.test", &parent(), &config(), &VisitedSet::new());
        assert_eq!(verdict, LinkClass::Blacklisted);
    }

    #[test]
    fn test_duplicate_checked_before_blacklist() {
        // A visited URL reports Duplicate even if it also matches the
        // blacklist - matches the fixed check order
        let cfg = CrawlConfig::new("https://a.test/", r".*a\.test.*", "private", 2, 4).unwrap();
        let visited = VisitedSet::new();
        visited.add("https://a.test/private");
        let verdict = classify_link("https://a.test/private", &parent(), &cfg, &visited);
        assert_eq!(verdict, LinkClass::Duplicate);
    }

    #[test]
    fn test_external_wins_over_blacklist() {
        // Blacklist only governs in-domain traversal: an external link
        // matching the blacklist pattern is still recorded
        let cfg = CrawlConfig::new("https://a.test/", r".*a\.test.*", "tracker", 2, 4).unwrap();
        let verdict = classify_link("https://b.test/tracker", &parent(), &cfg, &VisitedSet::new());
        assert!(matches!(verdict, LinkClass::External(_)));
    }
}
