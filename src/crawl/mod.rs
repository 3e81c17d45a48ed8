// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Recursive crawling from a root URL, one task per page
// - Depth limit (root = depth 0)
// - Each URL is fetched at most once per crawl (visited set)
// - Every link on every fetched page is health-checked
//
// Submodules:
// - fetch: the shared HTTP client (pages and status checks)
// - resolve: href -> absolute URL
// - visited: the dedup guard
// - website: the crawl itself and the report it produces
// =============================================================================

mod fetch;
mod resolve;
mod visited;
mod website;

pub use fetch::Fetcher;
pub use website::{crawl_website, CrawlReport, PageOutcome};
