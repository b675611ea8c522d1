// src/crawl/mod.rs
// =============================================================================
// This module is the crawl scheduler: it decides what gets fetched next,
// what counts as already seen, which links escape the domain boundary,
// and when the whole crawl is finished.
//
// Submodules:
// - frontier: the shared task queue, visited set and result records
// - classify: per-link verdict (external / duplicate / blacklisted / accept)
// - scheduler: the round-based crawl loop and its worker pool
//
// This file (mod.rs) is the module root - it re-exports the public API
// that the rest of the application uses.
// =============================================================================

mod classify;
mod frontier;
mod scheduler;

// Re-export public items from submodules
pub use frontier::{ExternalLink, Frontier, Task, VisitedSet};
pub use scheduler::Crawler;

// Kept public for callers that want classification without a full crawl
pub use classify::{classify_link, LinkClass};
