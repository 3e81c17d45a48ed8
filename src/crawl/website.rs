// src/crawl/website.rs
// =============================================================================
// This module drives the crawl.
//
// How it works:
// 1. crawl(url, depth) is the gate: it drops URLs past max_depth and URLs
//    somebody already claimed, then spawns one task for the page
// 2. The task fetches the page, checks all its links, logs the broken ones,
//    and calls crawl(child, depth + 1) for every link it could resolve
// 3. Every JoinHandle is sent to the supervisor in crawl_website(), which
//    joins them until none are left
//
// Why the supervisor can tell when we're done:
//   a task sends its children's handles *before* it finishes. So once the
//   channel is empty and every handle we've seen has finished, no task can be
//   running anymore, however deep the tree grew.
//
// Failures (bad status, timeout, unparsable page, even a panic) end only the
// branch they happen in. Nothing is retried.
// =============================================================================

use futures::stream::{FuturesUnordered, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;

use super::fetch::Fetcher;
use super::resolve::resolve_url;
use super::visited::VisitedSet;
use crate::checker::check_links;
use crate::config::CrawlConfig;
use crate::error::CrawlError;
use crate::page::Link;

// What one page task reports back
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PageOutcome {
    Fetched {
        url: String,
        depth: usize,
        links_found: usize,
        broken: Vec<Link>,
    },
    Failed {
        url: String,
        depth: usize,
        error: String,
    },
}

impl PageOutcome {
    pub fn url(&self) -> &str {
        match self {
            PageOutcome::Fetched { url, .. } | PageOutcome::Failed { url, .. } => url,
        }
    }
}

// Everything a finished crawl learned
#[derive(Debug, Serialize)]
pub struct CrawlReport {
    pub root: String,
    pub max_depth: usize,
    pub pages: Vec<PageOutcome>,
}

impl CrawlReport {
    pub fn fetched_count(&self) -> usize {
        self.pages
            .iter()
            .filter(|page| matches!(page, PageOutcome::Fetched { .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.pages.len() - self.fetched_count()
    }

    pub fn broken_count(&self) -> usize {
        self.pages
            .iter()
            .map(|page| match page {
                PageOutcome::Fetched { broken, .. } => broken.len(),
                PageOutcome::Failed { .. } => 0,
            })
            .sum()
    }

    #[cfg(test)]
    pub fn page(&self, url: &str) -> Option<&PageOutcome> {
        self.pages.iter().find(|page| page.url() == url)
    }
}

// State shared by every task of one crawl
struct Crawler {
    config: CrawlConfig,
    fetcher: Fetcher,
    visited: VisitedSet,
    spawned: mpsc::UnboundedSender<JoinHandle<PageOutcome>>,
}

impl Crawler {
    fn crawl(self: &Arc<Self>, url: String, depth: usize) {
        if depth > self.config.max_depth {
            return;
        }

        if !self.visited.claim(&url) {
            debug!(%url, depth, "already visited");
            return;
        }

        let handle = tokio::spawn(Arc::clone(self).process(url, depth));

        // The receiver lives until every handle has been joined
        if self.spawned.send(handle).is_err() {
            warn!("crawl supervisor is gone, page task will not be awaited");
        }
    }

    async fn process(self: Arc<Self>, url: String, depth: usize) -> PageOutcome {
        let page = match self.fetcher.fetch_page(&url).await {
            Ok(page) => page,
            Err(e) => {
                warn!(%url, depth, error = %e, "failed to fetch page");
                return PageOutcome::Failed {
                    url,
                    depth,
                    error: e.to_string(),
                };
            }
        };

        info!(url = %page.url, depth, links = page.links.len(), "fetched page");

        let mut targets = Vec::with_capacity(page.links.len());
        for link in &page.links {
            match resolve_url(&page.url, &link.url) {
                Ok(absolute) => targets.push(absolute),
                Err(e) => debug!(page = %page.url, error = %e, "skipping unresolvable link"),
            }
        }

        let to_check = targets.iter().cloned().map(Link::new).collect();
        let broken = check_links(&self.fetcher, to_check, self.config.verbose).await;

        if !broken.is_empty() {
            info!(page = %page.url, count = broken.len(), "broken links on page");
        }
        for link in &broken {
            warn!(page = %page.url, url = %link.url, status = %link.status, "broken link");
        }

        for child in targets {
            self.crawl(child, depth + 1);
        }

        PageOutcome::Fetched {
            url,
            depth,
            links_found: page.links.len(),
            broken,
        }
    }
}

// Crawls `root_url` up to `config.max_depth` and reports every page visited
//
// Returns Err only for problems found before the crawl starts (bad root URL,
// HTTP client that can't be built). Anything that goes wrong mid-crawl ends
// up as a PageOutcome::Failed entry instead.
pub async fn crawl_website(root_url: &str, config: CrawlConfig) -> Result<CrawlReport, CrawlError> {
    // Serialized the same way resolved links are, so "http://a.com" and a
    // later href="/" both claim "http://a.com/"
    let root = Url::parse(root_url)
        .map_err(|source| CrawlError::InvalidUrl {
            url: root_url.to_string(),
            source,
        })?
        .to_string();

    let fetcher = Fetcher::new(&config)?;
    let max_depth = config.max_depth;
    let (spawned_tx, mut spawned_rx) = mpsc::unbounded_channel();

    let crawler = Arc::new(Crawler {
        config,
        fetcher,
        visited: VisitedSet::new(),
        spawned: spawned_tx,
    });

    info!(%root, max_depth, "starting crawl");
    crawler.crawl(root.clone(), 0);

    let mut active = FuturesUnordered::new();
    let mut pages = Vec::new();

    loop {
        while let Ok(handle) = spawned_rx.try_recv() {
            active.push(handle);
        }

        match active.next().await {
            Some(Ok(outcome)) => pages.push(outcome),
            Some(Err(e)) => warn!(error = %e, "page task panicked"),
            // Nothing running and nothing queued: the whole tree is done
            None => break,
        }
    }

    info!(
        pages = pages.len(),
        claimed = crawler.visited.len(),
        "crawl finished"
    );

    Ok(CrawlReport {
        root,
        max_depth,
        pages,
    })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why `self: Arc<Self>`?
//    - A spawned task must own everything it touches ('static)
//    - Cloning the Arc gives each task its own handle to the shared Crawler
//      without copying the client or the visited set
//
// 2. What is FuturesUnordered?
//    - A collection of futures that yields results in completion order
//    - next() returns None once it is empty, which is our "all done" signal
//
// 3. Why send JoinHandles over a channel?
//    - Tasks spawn children deep inside the tree, far away from the loop
//      that waits on them
//    - The channel hands every new handle back to that one loop
//
// 4. What happens if a task panics?
//    - tokio catches it and the JoinHandle resolves to Err(JoinError)
//    - We log it and keep going; siblings are unaffected
// -----------------------------------------------------------------------------
