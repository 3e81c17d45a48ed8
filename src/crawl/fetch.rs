// src/crawl/fetch.rs
// =============================================================================
// All outbound HTTP goes through the Fetcher.
//
// It owns:
// - one reqwest Client (connection pool shared by every task, cheap to clone)
// - an optional Semaphore when --max-concurrency is set
//
// A permit is held for exactly one request and released before the caller
// does anything else, so a page task that waits on its own link checks never
// sits on a permit.
// =============================================================================

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::debug;

use crate::checker::parse_links;
use crate::config::CrawlConfig;
use crate::error::CrawlError;
use crate::page::Page;

// Content types we parse; anything else is treated as a page with no links
const HTML_CONTENT_TYPES: [&str; 2] = ["text/html", "application/xhtml+xml"];

#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    limiter: Option<Arc<Semaphore>>,
}

impl Fetcher {
    pub fn new(config: &CrawlConfig) -> Result<Self, CrawlError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(CrawlError::Client)?;

        let limiter = config
            .max_concurrency
            .map(|limit| Arc::new(Semaphore::new(limit.get())));

        Ok(Self { client, limiter })
    }

    async fn permit(&self) -> Option<OwnedSemaphorePermit> {
        match &self.limiter {
            // acquire_owned() only fails on a closed semaphore; we never close it
            Some(limiter) => Arc::clone(limiter).acquire_owned().await.ok(),
            None => None,
        }
    }

    // Fetches one page and returns the raw links found on it
    //
    // Errors:
    //   Transport  - request failed, timed out, or body couldn't be read
    //   HttpStatus - anything other than 200
    //   Parse      - body isn't text
    pub async fn fetch_page(&self, url: &str) -> Result<Page, CrawlError> {
        let body = {
            let _permit = self.permit().await;

            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| CrawlError::transport(url, e))?;

            let status = response.status();
            if status != StatusCode::OK {
                return Err(CrawlError::HttpStatus {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }

            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);

            if let Some(content_type) = content_type.as_deref() {
                if !is_html(content_type) {
                    debug!(url, content_type, "skipping non-HTML page");
                    return Ok(Page {
                        url: url.to_string(),
                        links: Vec::new(),
                    });
                }
            }

            response
                .bytes()
                .await
                .map_err(|e| CrawlError::transport(url, e))?
        };

        let links = parse_links(url, &body)?;
        Ok(Page {
            url: url.to_string(),
            links,
        })
    }

    // Issues a full GET and reports only the status code.
    // The body is dropped unread.
    pub async fn fetch_status(&self, url: &str) -> Result<u16, CrawlError> {
        let _permit = self.permit().await;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CrawlError::transport(url, e))?;

        Ok(response.status().as_u16())
    }
}

fn is_html(content_type: &str) -> bool {
    let mime = content_type.split(';').next().unwrap_or(content_type).trim();
    HTML_CONTENT_TYPES
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(mime))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Link;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn html(body: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/html; charset=utf-8")
    }

    fn fetcher() -> Fetcher {
        Fetcher::new(&CrawlConfig::default()).unwrap()
    }

    #[test]
    fn test_is_html() {
        assert!(is_html("text/html"));
        assert!(is_html("text/html; charset=UTF-8"));
        assert!(is_html("Application/XHTML+XML"));
        assert!(!is_html("application/pdf"));
        assert!(!is_html("image/png"));
    }

    #[tokio::test]
    async fn test_fetch_page_returns_links_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/index"))
            .respond_with(html(r#"<a href="/a">A</a><p><a href="b">B</a></p>"#))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/index", server.uri());
        let page = fetcher().fetch_page(&url).await.unwrap();

        assert_eq!(page.url, url);
        assert_eq!(page.links, vec![Link::new("/a"), Link::new("b")]);
    }

    #[tokio::test]
    async fn test_fetch_page_rejects_non_200() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = format!("{}/missing", server.uri());
        let err = fetcher().fetch_page(&url).await.unwrap_err();
        assert!(matches!(err, CrawlError::HttpStatus { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_fetch_page_rejects_204() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/empty"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let url = format!("{}/empty", server.uri());
        let err = fetcher().fetch_page(&url).await.unwrap_err();
        assert!(matches!(err, CrawlError::HttpStatus { status: 204, .. }));
    }

    #[tokio::test]
    async fn test_fetch_page_skips_non_html() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/report.pdf"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(b"%PDF-1.4 <a href=\"/nope\">".to_vec(), "application/pdf"),
            )
            .mount(&server)
            .await;

        let url = format!("{}/report.pdf", server.uri());
        let page = fetcher().fetch_page(&url).await.unwrap();
        assert!(page.links.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_page_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/garbage"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0xff, 0xfe, 0xfd], "text/html"))
            .mount(&server)
            .await;

        let url = format!("{}/garbage", server.uri());
        let err = fetcher().fetch_page(&url).await.unwrap_err();
        assert!(matches!(err, CrawlError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_fetch_page_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(html("<p>slow</p>").set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let config = CrawlConfig {
            request_timeout: Some(Duration::from_millis(50)),
            ..CrawlConfig::default()
        };
        let fetcher = Fetcher::new(&config).unwrap();
        let url = format!("{}/slow", server.uri());

        let err = fetcher.fetch_page(&url).await.unwrap_err();
        match err {
            CrawlError::Transport { source, .. } => assert!(source.is_timeout()),
            other => panic!("expected Transport, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_connection_refused() {
        // nothing listens on port 1
        let err = fetcher().fetch_page("http://127.0.0.1:1/").await.unwrap_err();
        assert!(matches!(err, CrawlError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_fetch_status_reads_only_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(410).set_body_string("gone"))
            .mount(&server)
            .await;

        let url = format!("{}/gone", server.uri());
        assert_eq!(fetcher().fetch_status(&url).await.unwrap(), 410);
    }
}
