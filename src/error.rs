// src/error.rs
// =============================================================================
// Error kinds produced while crawling.
//
// Every one of these is handled inside the task where it happens: the crawl
// logs it and moves on. Only a bad root URL or a client that cannot be built
// ever reaches main().
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlError {
    /// A base URL or href could not be parsed / resolved
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The request could not be sent, timed out, or the body could not be read
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A page fetch answered with something other than 200
    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// The body could not be turned into a document
    #[error("could not parse {url}: {reason}")]
    Parse { url: String, reason: String },

    /// The shared HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl CrawlError {
    pub(crate) fn transport(url: &str, source: reqwest::Error) -> Self {
        CrawlError::Transport {
            url: url.to_string(),
            source,
        }
    }
}
