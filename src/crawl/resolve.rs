// src/crawl/resolve.rs
// =============================================================================
// Resolves an href found on a page into an absolute URL.
//
// Url::join() follows the same rules a browser uses:
//   base = "http://a.com/x/"
//   "y"              -> "http://a.com/x/y"
//   "/y"             -> "http://a.com/y"
//   "//b.com/z"      -> "http://b.com/z"   (scheme-relative)
//   "#top"           -> "http://a.com/x/#top"
//   "http://b.com/z" -> "http://b.com/z"   (already absolute)
// =============================================================================

use url::Url;

use crate::error::CrawlError;

pub fn resolve_url(base: &str, href: &str) -> Result<String, CrawlError> {
    let base_url = Url::parse(base).map_err(|source| CrawlError::InvalidUrl {
        url: base.to_string(),
        source,
    })?;

    let absolute = base_url.join(href).map_err(|source| CrawlError::InvalidUrl {
        url: href.to_string(),
        source,
    })?;

    Ok(absolute.to_string())
}
