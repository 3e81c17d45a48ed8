// src/page.rs
// =============================================================================
// The two records that flow through a crawl: a Page and the Links found on it.
//
// A Page is built fresh by every fetch and owned by the task that fetched it.
// Its links keep the raw href text and stay Unchecked; only copies handed to
// the link checker ever get a status.
// =============================================================================

use serde::Serialize;
use std::fmt;

/// What a health check learned about a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStatus {
    /// Freshly extracted, never checked
    Unchecked,
    /// No response could be obtained (DNS, connection refused, timeout, ...)
    Unreachable,
    /// The server answered with this HTTP status
    Code(u16),
}

impl LinkStatus {
    /// Numeric form used in log lines; 0 stands for "no status"
    pub fn code(&self) -> u16 {
        match self {
            LinkStatus::Code(code) => *code,
            LinkStatus::Unchecked | LinkStatus::Unreachable => 0,
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkStatus::Unchecked => write!(f, "unchecked"),
            LinkStatus::Unreachable => write!(f, "unreachable"),
            LinkStatus::Code(code) => write!(f, "{}", code),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub url: String,
    pub status: LinkStatus,
}

impl Link {
    pub fn new(url: impl Into<String>) -> Self {
        Link {
            url: url.into(),
            status: LinkStatus::Unchecked,
        }
    }

    /// Only explicit 4xx/5xx answers count as broken.
    /// Unreachable links are not reported.
    pub fn is_broken(&self) -> bool {
        matches!(self.status, LinkStatus::Code(code) if (400..600).contains(&code))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub url: String,
    pub links: Vec<Link>,
}
