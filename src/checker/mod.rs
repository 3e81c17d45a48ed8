// src/checker/mod.rs
// =============================================================================
// This module contains the link checking logic.
//
// Submodules:
// - html: Extracts links from a parsed HTML page
// - http: Checks links concurrently and picks out the broken ones
// =============================================================================

mod html;
mod http;

pub use html::parse_links;
pub use http::check_links;
