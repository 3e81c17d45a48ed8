// src/checker/html.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a tree of nodes (built on html5ever)
// - Lets us walk every node in document order
//
// The extractor only reads the tree. It does no URL resolution (that's
// crawl::resolve) and no network I/O, so running it twice over the same
// document always gives the same list.
//
// Rust concepts:
// - Iterators: descendants() walks the tree lazily
// - filter_map: keep only the nodes that are anchors with an href
// =============================================================================

use scraper::Html;

use crate::error::CrawlError;
use crate::page::Link;

// Collects every <a href="..."> in document order
//
// descendants() is a pre-order walk (a node comes before its children, and
// children come in source order), which is exactly "document order".
//
// Returns raw href values, e.g. "/docs", "../about", "https://other.com".
pub fn extract_links(document: &Html) -> Vec<Link> {
    document
        .tree
        .root()
        .descendants()
        .filter_map(|node| node.value().as_element())
        .filter(|element| element.name() == "a")
        // attr() returns the first matching attribute; anchors without one are skipped
        .filter_map(|element| element.attr("href"))
        .map(Link::new)
        .collect()
}

// Turns a response body into the list of links on that page
//
// Parameters:
//   url: the page URL (only used for error messages)
//   body: raw response bytes
//
// The parser accepts any text (html5ever recovers from broken markup), so the
// only thing we reject is a body that isn't text at all.
pub fn parse_links(url: &str, body: &[u8]) -> Result<Vec<Link>, CrawlError> {
    let text = std::str::from_utf8(body).map_err(|e| CrawlError::Parse {
        url: url.to_string(),
        reason: format!("body is not valid UTF-8: {}", e),
    })?;

    let document = Html::parse_document(text);
    Ok(extract_links(&document))
}
