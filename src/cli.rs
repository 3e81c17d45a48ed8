// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Usage:
//   link-crawler --url https://example.com --depth 2 --verbose
//
// Bad input (missing --url, an unparseable URL, a negative depth) is rejected
// by clap before any crawling starts: it prints the problem and exits with
// code 2.
// =============================================================================

use clap::Parser;
use std::num::NonZeroUsize;
use std::time::Duration;
use url::Url;

use crate::config::{CrawlConfig, DEFAULT_TIMEOUT_SECS};

#[derive(Parser, Debug)]
#[command(
    name = "link-crawler",
    version,
    about = "Crawl a website and report broken links",
    long_about = "link-crawler starts at a URL, follows links up to a maximum depth, and \
                  checks every link it finds. Links answering 4xx or 5xx are reported as broken."
)]
pub struct Cli {
    /// The starting URL for crawling
    #[arg(long, value_parser = parse_root_url)]
    pub url: String,

    /// Maximum crawl depth (0 = only the starting page)
    ///
    /// Links on the deepest crawled pages are still checked, just not crawled.
    #[arg(long, default_value_t = 1, value_parser = parse_depth, allow_negative_numbers = true)]
    pub depth: usize,

    /// Log every link check as it starts and finishes
    #[arg(long)]
    pub verbose: bool,

    /// Per-request timeout in seconds (0 = wait forever)
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Maximum number of requests in flight at once (default: no limit)
    #[arg(long)]
    pub max_concurrency: Option<NonZeroUsize>,

    /// Print the crawl report as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig {
            max_depth: self.depth,
            verbose: self.verbose,
            request_timeout: (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs)),
            max_concurrency: self.max_concurrency,
        }
    }
}

fn parse_root_url(value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        return Err("the URL must not be empty".to_string());
    }
    Url::parse(value)
        .map(|_| value.to_string())
        .map_err(|e| format!("'{}' is not a valid URL: {}", value, e))
}

fn parse_depth(value: &str) -> Result<usize, String> {
    let depth: i64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if depth < 0 {
        return Err("depth must be a non-negative integer".to_string());
    }
    usize::try_from(depth).map_err(|_| format!("depth {} is too large", depth))
}
