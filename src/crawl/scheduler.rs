// src/crawl/scheduler.rs
// =============================================================================
// This module drives the crawl in rounds.
//
// How it works:
// 1. Seed the frontier with one task for the start URL (depth 0)
// 2. Take up to pool_size tasks off the frontier - that's one batch
// 3. Process the whole batch concurrently and wait for ALL of it to finish
//    (including every frontier push the batch causes)
// 4. Repeat from 2. When the frontier is empty after a full drain, no task
//    is in flight and none can appear: the crawl is done
//
// Step 3 is the termination protocol. Because a round is fully drained
// before the next batch is chosen, "frontier empty between rounds" really
// does mean "no more work exists" - there is never a moment where the
// frontier is empty but an in-flight worker is about to refill it.
//
// Rust concepts:
// - buffer_unordered(N): runs up to N futures concurrently, like a
//   worker pool scoped to one batch
// - Arc: shared ownership of the frontier/visited/results across workers
// =============================================================================

use futures::stream::{self, StreamExt};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use crate::config::CrawlConfig;
use crate::fetch::{extract_links, FetchedPage, PageFetcher};

use super::classify::{classify_link, LinkClass};
use super::frontier::{ExternalLink, Frontier, Task, VisitedSet};

// HTTP statuses worth parsing a body for. Anything else means the page
// is unmodified or inaccessible and contributes no links.
const ACCEPTED_STATUSES: [u16; 4] = [200, 203, 301, 302];

// The only content type we extract links from
const HTML_CONTENT_TYPE: &str = "text/html";

/// Where the scheduler loop currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CrawlState {
    /// Choosing the next batch from the frontier
    Running,
    /// A batch is in flight; waiting for every task in it to resolve
    Draining,
    /// Frontier empty after a full drain: the crawl is finished
    Done,
}

/// One crawl run: owns the frontier, the visited set and the result sink,
/// and shares them with the workers it spawns each round.
pub struct Crawler {
    config: Arc<CrawlConfig>,
    fetcher: Arc<dyn PageFetcher>,
    frontier: Arc<Frontier>,
    visited: Arc<VisitedSet>,
    externals: Arc<Mutex<Vec<ExternalLink>>>,
}

impl Crawler {
    pub fn new(config: CrawlConfig, fetcher: Arc<dyn PageFetcher>) -> Self {
        let frontier = Arc::new(Frontier::new());
        frontier.push(Task::seed(&config.seed_url));

        Self {
            config: Arc::new(config),
            fetcher,
            frontier,
            visited: Arc::new(VisitedSet::new()),
            externals: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Runs the crawl to completion and returns every link that led
    /// outside the domain boundary, in the order they were recorded.
    pub async fn find_external_links(self) -> Vec<ExternalLink> {
        let mut state = CrawlState::Running;
        let mut rounds = 0usize;

        while state != CrawlState::Done {
            // RUNNING: choose the next batch, at most pool_size tasks
            let mut batch = Vec::with_capacity(self.config.pool_size);
            while batch.len() < self.config.pool_size {
                match self.frontier.pop() {
                    Some(task) => batch.push(task),
                    None => break,
                }
            }

            if batch.is_empty() {
                // Nothing queued and nothing in flight (the previous round
                // fully drained) - no task can appear anymore
                state = CrawlState::Done;
                continue;
            }

            // DRAINING: run the batch as one pool-bounded unit and wait
            // for every task in it, including all the frontier pushes and
            // result appends those tasks perform
            state = CrawlState::Draining;
            rounds += 1;
            debug!(
                state = ?state,
                round = rounds,
                batch = batch.len(),
                pending = self.frontier.len(),
                "dispatching batch"
            );

            stream::iter(batch)
                .map(|task| self.process_task(task))
                .buffer_unordered(self.config.pool_size)
                .collect::<Vec<()>>()
                .await;

            state = CrawlState::Running;
        }

        info!(
            rounds,
            visited = self.visited.len(),
            external = self.externals.lock().unwrap().len(),
            "crawl finished"
        );

        // The crawler is done; nothing else holds the sink
        Arc::try_unwrap(self.externals)
            .map(|m| m.into_inner().unwrap())
            .unwrap_or_default()
    }

    // Processes one task: the unit of work a pool slot executes
    async fn process_task(&self, task: Task) {
        // Authoritative dedup: atomically claim the URL. The classifier's
        // discovery-time check runs on a snapshot, so two workers in one
        // round can both have accepted this URL - the loser lands here
        // and backs off without fetching.
        if !self.visited.insert(&task.target) {
            debug!(url = %task.target, "duplicate dispatch, skipping");
            return;
        }

        // Pages at max_depth are recorded as visited but never fetched,
        // so their outbound links are never discovered
        if task.depth >= self.config.max_depth {
            debug!(url = %task.target, depth = task.depth, "depth limit, not fetching");
            return;
        }

        // Polite crawling: fixed delay before each fetch. No shared lock
        // is held here.
        if !self.config.fetch_delay.is_zero() {
            tokio::time::sleep(self.config.fetch_delay).await;
        }

        debug!(url = %task.target, depth = task.depth, "fetching");

        let page = match self.fetcher.fetch(&task.target).await {
            Ok(page) => page,
            Err(e) => {
                // Per-page failures are not fatal: the page simply
                // contributed no links
                debug!(url = %task.target, error = %e, "fetch failed");
                return;
            }
        };

        for link in self.page_links(&task, &page) {
            match classify_link(&link, &task, &self.config, &self.visited) {
                LinkClass::External(external) => {
                    let record = ExternalLink::from_task(&external);
                    self.externals.lock().unwrap().push(record);
                }
                LinkClass::Accept(new_task) => {
                    self.frontier.push(new_task);
                }
                // Duplicates and blacklisted links are dropped silently
                LinkClass::Duplicate | LinkClass::Blacklisted => {}
            }
        }
    }

    // Applies the acceptance gates to a fetched page and extracts its links
    //
    // A page contributes no links when:
    // - the fetch was redirected out of the domain (the redirect target is
    //   NOT an external result - the classifier only sees anchors)
    // - the status says the body is unmodified or inaccessible
    // - the body isn't HTML
    fn page_links(&self, task: &Task, page: &FetchedPage) -> Vec<String> {
        if !self.config.in_domain(&page.url) {
            debug!(url = %task.target, effective = %page.url, "redirected off-domain");
            return Vec::new();
        }

        if !ACCEPTED_STATUSES.contains(&page.status) {
            debug!(url = %task.target, status = page.status, "status not accepted");
            return Vec::new();
        }

        let is_html = page
            .content_type
            .as_deref()
            .map(|ct| ct == HTML_CONTENT_TYPE)
            .unwrap_or(false);
        if !is_html {
            debug!(url = %task.target, content_type = ?page.content_type, "not html");
            return Vec::new();
        }

        extract_links(page)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why rounds instead of a free-running pool?
//    - With rounds, the frontier is only refilled by tasks we are currently
//      waiting on. So when a round ends and the frontier is empty, we KNOW
//      the crawl is over - no counter of in-flight work needed.
//    - The price is that a slow page stalls its whole round. A continuous
//      pipeline with an in-flight counter would be faster, but the round
//      protocol is much easier to convince yourself is correct.
//
// 2. Why is buffer_unordered our "worker pool"?
//    - Each batch holds at most pool_size tasks, and buffer_unordered
//      polls them all concurrently. That gives exactly the bounded
//      parallelism of a fixed pool, scoped to one round.
//    - "unordered" is fine: within a round, completion order carries no
//      meaning. Ordering only matters BETWEEN rounds, and .await-ing the
//      whole stream gives us that.
//
// 3. Why does the worker re-check the visited set?
//    - classify_link checks "already visited?" against the set as it was
//      when the link was discovered. Two workers can pass that check for
//      the same URL at the same time.
//    - VisitedSet::insert is atomic, so exactly one dispatch wins and the
//      other becomes a no-op. No URL is ever fetched twice.
// -----------------------------------------------------------------------------
