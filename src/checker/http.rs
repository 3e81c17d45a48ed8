// src/checker/http.rs
// =============================================================================
// This module checks whether links are alive.
//
// How it works (fan-out / fan-in):
// 1. Fan out: spawn one tokio task per link; each does a GET and keeps
//    only the status code
// 2. Fan in: join_all() waits on every JoinHandle, so we return only after
//    the last check has finished
// 3. Keep the links whose status is 4xx or 5xx
//
// Classification:
// - 400..=599          -> broken
// - 2xx / 3xx          -> fine (redirects are followed by reqwest anyway)
// - no response at all -> Unreachable: logged as a warning, NOT reported
//                         as broken
//
// Rust concepts:
// - tokio::spawn: each check runs on its own task, so one slow host never
//   holds up the others
// - JoinHandle: a future that resolves to the task's return value
// =============================================================================

use futures::future::join_all;
use tracing::{info, warn};

use crate::crawl::Fetcher;
use crate::page::{Link, LinkStatus};

// Checks every link concurrently and returns the broken ones
//
// Parameters:
//   fetcher: shared HTTP client (cloned into each task)
//   links: absolute URLs to check
//   verbose: log a line when each check starts and when it finishes
//
// Returns: the subset of `links` that came back 4xx/5xx, with status set.
// Order follows the input order.
pub async fn check_links(fetcher: &Fetcher, links: Vec<Link>, verbose: bool) -> Vec<Link> {
    let handles: Vec<_> = links
        .into_iter()
        .map(|link| {
            let fetcher = fetcher.clone();
            tokio::spawn(async move { check_single_link(fetcher, link, verbose).await })
        })
        .collect();

    join_all(handles)
        .await
        .into_iter()
        .filter_map(|joined| match joined {
            Ok(link) => Some(link),
            Err(e) => {
                warn!(error = %e, "link check task failed");
                None
            }
        })
        .filter(|link| link.is_broken())
        .collect()
}

async fn check_single_link(fetcher: Fetcher, mut link: Link, verbose: bool) -> Link {
    if verbose {
        info!(url = %link.url, "checking link");
    }

    // A failed check is reported even when quiet, but it is neither broken
    // nor valid
    link.status = match fetcher.fetch_status(&link.url).await {
        Ok(code) => LinkStatus::Code(code),
        Err(e) => {
            warn!(url = %link.url, error = %e, "could not check link");
            LinkStatus::Unreachable
        }
    };

    if verbose {
        match link.status {
            LinkStatus::Code(_) if link.is_broken() => {
                info!(url = %link.url, status = %link.status, "broken link")
            }
            LinkStatus::Code(_) => info!(url = %link.url, status = %link.status, "valid link"),
            LinkStatus::Unreachable | LinkStatus::Unchecked => {
                info!(url = %link.url, "unreachable link")
            }
        }
    }

    link
}
