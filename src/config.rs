// src/config.rs
// =============================================================================
// Settings for one crawl invocation.
//
// The CLI builds one of these (see cli.rs); tests build them directly with
// struct update syntax: CrawlConfig { max_depth: 3, ..CrawlConfig::default() }
// =============================================================================

use std::num::NonZeroUsize;
use std::time::Duration;

/// Default per-request timeout, also the CLI default for --timeout-secs
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Deepest level that is still fetched as a page (root = 0)
    pub max_depth: usize,
    /// Log every link check at dispatch and at result
    pub verbose: bool,
    /// Applied to every request; None waits forever
    pub request_timeout: Option<Duration>,
    /// Cap on requests in flight at once; None means no cap
    pub max_concurrency: Option<NonZeroUsize>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: 1,
            verbose: false,
            request_timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            max_concurrency: None,
        }
    }
}
