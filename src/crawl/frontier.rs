// src/crawl/frontier.rs
// =============================================================================
// This module holds the crawl's shared data structures:
//
// - Task: one unit of crawl work (target URL, where it was found, depth)
// - Frontier: the queue of tasks discovered but not yet dispatched
// - VisitedSet: URLs we have already dispatched, for deduplication
// - ExternalLink: one record in the crawl's final output
//
// All three shared structures are Mutex-guarded because workers mutate
// them concurrently. Every method locks, does one cheap operation, and
// unlocks - no lock is ever held across an await point.
//
// Rust concepts:
// - Mutex<T>: Interior mutability with exclusive access
// - HashSet: O(1) membership checks for visited URLs
// - VecDeque: Double-ended queue; pop_front gives breadth-first order
// =============================================================================

use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

// One unit of crawl work
//
// Immutable once created: built when a link is accepted (or when the crawl
// is seeded), consumed by exactly one worker, then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// The URL to fetch
    pub target: String,
    /// The page this link was found on (the seed points at itself)
    pub source: String,
    /// Link hops from the seed (seed = 0)
    pub depth: usize,
}

impl Task {
    pub fn new(target: impl Into<String>, source: impl Into<String>, depth: usize) -> Self {
        Self {
            target: target.into(),
            source: source.into(),
            depth,
        }
    }

    /// The crawl's starting task: depth 0, its own source.
    pub fn seed(url: &str) -> Self {
        Self::new(url, url, 0)
    }
}

// One link that leads outside the domain boundary
//
// These records are the crawl's entire output. `depth` is the depth at
// which the link was *found* plus one - the depth the target would have
// been crawled at, had it been in-domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLink {
    /// The in-domain page carrying the link
    pub source: String,
    /// The out-of-domain target
    pub target: String,
    /// Depth at which the link was found
    pub depth: usize,
}

impl ExternalLink {
    pub fn from_task(task: &Task) -> Self {
        Self {
            source: task.source.clone(),
            target: task.target.clone(),
            depth: task.depth,
        }
    }
}

/// Queue of pending crawl tasks.
///
/// Workers push newly accepted links from any thread; the scheduler pops
/// batches between rounds. `pop` returning None means "nothing queued right
/// now" - whether that means the crawl is done is the scheduler's call,
/// because in-flight workers may still push more.
#[derive(Debug, Default)]
pub struct Frontier {
    tasks: Mutex<VecDeque<Task>>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, task: Task) {
        self.tasks.lock().unwrap().push_back(task);
    }

    /// Removes and returns one task, or None if the queue is empty.
    ///
    /// Removal happens before the task is handed out, so no two callers
    /// can ever receive the same task.
    pub fn pop(&self) -> Option<Task> {
        self.tasks.lock().unwrap().pop_front()
    }

    pub fn len(&self) -> usize {
        self.tasks.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// URLs already dispatched for processing.
///
/// Grows for the lifetime of the crawl; nothing is ever removed.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: Mutex<HashSet<String>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.lock().unwrap().contains(url)
    }

    pub fn add(&self, url: &str) {
        self.insert(url);
    }

    /// Atomic check-and-insert: returns true if `url` was NOT already
    /// present (i.e. this call claimed it).
    ///
    /// Workers use this as the authoritative "first to process this URL"
    /// decision - the discovery-time contains() check in the classifier
    /// works from a snapshot that may be stale under concurrency, so
    /// duplicate tasks can reach the frontier; this is where the second
    /// copy gets dropped.
    pub fn insert(&self, url: &str) -> bool {
        self.urls.lock().unwrap().insert(url.to_string())
    }

    pub fn len(&self) -> usize {
        self.urls.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_task_points_at_itself() {
        let task = Task::seed("https://a.test/");
        assert_eq!(task.target, "https://a.test/");
        assert_eq!(task.source, "https://a.test/");
        assert_eq!(task.depth, 0);
    }

    #[test]
    fn test_frontier_fifo_order() {
        let frontier = Frontier::new();
        frontier.push(Task::seed("https://a.test/1"));
        frontier.push(Task::seed("https://a.test/2"));

        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.pop().unwrap().target, "https://a.test/1");
        assert_eq!(frontier.pop().unwrap().target, "https://a.test/2");
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn test_frontier_pop_on_empty_is_none_not_error() {
        let frontier = Frontier::new();
        assert!(frontier.pop().is_none());
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_visited_insert_claims_once() {
        let visited = VisitedSet::new();
        assert!(visited.insert("https://a.test/"));
        // Second insert of the same URL does not claim it again
        assert!(!visited.insert("https://a.test/"));
        assert!(visited.contains("https://a.test/"));
        assert_eq!(visited.len(), 1);
    }

    #[test]
    fn test_external_link_from_task() {
        let task = Task::new("https://b.test/x", "https://a.test/", 1);
        let link = ExternalLink::from_task(&task);
        assert_eq!(link.source, "https://a.test/");
        assert_eq!(link.target, "https://b.test/x");
        assert_eq!(link.depth, 1);
    }

    #[test]
    fn test_external_link_serializes() {
        let link = ExternalLink {
            source: "https://a.test/".to_string(),
            target: "https://b.test/x".to_string(),
            depth: 1,
        };
        let json = serde_json::to_string(&link).unwrap();
        let back: ExternalLink = serde_json::from_str(&json).unwrap();
        assert_eq!(back, link);
    }
}
